use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated in the completion
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Payload of a completed call
///
/// Serialized untagged, matching the caller's `data` field. Reading it back
/// tries `Text` first, so a structured result whose object is a bare JSON
/// string deserializes as `Text`; every other object shape reads back as
/// `Object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionData {
    /// Free text from a text generation
    Text(String),
    /// Object from a structured generation, exactly as the engine returned it
    Object(serde_json::Value),
}

/// Result of a chat completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    /// Generated text or object
    pub data: CompletionData,
    /// Token usage
    pub usage: UsageCounters,
}

impl CallResult {
    /// Borrow the generated text, if this was a text generation
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            CompletionData::Text(text) => Some(text),
            CompletionData::Object(_) => None,
        }
    }

    /// Borrow the generated object, if this was a structured generation
    pub fn object(&self) -> Option<&serde_json::Value> {
        match &self.data {
            CompletionData::Object(object) => Some(object),
            CompletionData::Text(_) => None,
        }
    }

    /// Deserialize the generated data into a typed value
    ///
    /// Text data is parsed as JSON.
    pub fn into_object<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        match self.data {
            CompletionData::Object(object) => serde_json::from_value(object),
            CompletionData::Text(text) => serde_json::from_str(&text),
        }
    }
}

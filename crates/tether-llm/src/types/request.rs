use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::message::ChatMessage;
use super::tool::ToolDescriptor;

/// Named JSON Schema describing the desired structured output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseModel {
    /// Schema name
    pub name: String,
    /// JSON Schema the generated object must satisfy
    pub schema: serde_json::Value,
}

impl ResponseModel {
    /// Create a response model from a raw schema
    pub fn new(name: &str, schema: serde_json::Value) -> Self {
        Self {
            name: name.to_owned(),
            schema,
        }
    }

    /// Derive the response model from a Rust type
    pub fn of<T: JsonSchema>() -> Self {
        Self {
            name: T::schema_name().into_owned(),
            schema: schemars::schema_for!(T).to_value(),
        }
    }
}

/// Options for a single chat completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionOptions {
    /// Conversation messages, in order
    pub messages: Vec<ChatMessage>,
    /// Structured output schema; when set, the call returns an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_model: Option<ResponseModel>,
    /// Tools the model may call during free-text generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDescriptor>>,
}

impl ChatCompletionOptions {
    /// Create options for a free-text call without tools
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            response_model: None,
            tools: None,
        }
    }

    /// Request structured output matching the given model
    #[must_use]
    pub fn with_response_model(mut self, response_model: ResponseModel) -> Self {
        self.response_model = Some(response_model);
        self
    }

    /// Offer tools to the model
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = Some(tools);
        self
    }
}

#[cfg(test)]
mod tests {
    use schemars::JsonSchema;
    use serde_json::json;

    use super::*;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Weather {
        city: String,
        celsius: f64,
    }

    #[test]
    fn response_model_from_type() {
        let model = ResponseModel::of::<Weather>();

        assert_eq!(model.name, "Weather");
        assert_eq!(model.schema["type"], "object");
        assert!(model.schema["properties"]["city"].is_object());
        assert!(model.schema["properties"]["celsius"].is_object());
    }

    #[test]
    fn options_parse_from_json() {
        let options: ChatCompletionOptions = serde_json::from_value(json!({
            "messages": [{"role": "user", "content": "hi"}],
            "response_model": {"name": "Answer", "schema": {"type": "object"}},
            "tools": [{"name": "search", "description": "web search", "parameters": {"type": "object"}}]
        }))
        .unwrap();

        assert_eq!(options.messages.len(), 1);
        assert_eq!(options.response_model.unwrap().name, "Answer");
        assert_eq!(options.tools.unwrap()[0].name, "search");
    }
}

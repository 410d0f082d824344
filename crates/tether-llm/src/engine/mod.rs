//! Generation engine trait and implementations

pub mod openai;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{CoreMessage, ToolSpec};

/// Request for a structured object matching a schema
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRequest {
    /// Normalized conversation
    pub messages: Vec<CoreMessage>,
    /// Schema name
    pub schema_name: String,
    /// JSON Schema the object must satisfy
    pub schema: serde_json::Value,
}

/// Request for free text, optionally with tools
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    /// Normalized conversation
    pub messages: Vec<CoreMessage>,
    /// Tools offered to the model; empty means no tools
    pub tools: ToolSpec,
}

/// Token counters as reported by the engine, any of which may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: Option<u32>,
    /// Tokens generated in the completion
    pub completion_tokens: Option<u32>,
    /// Total tokens
    pub total_tokens: Option<u32>,
}

/// Result of a structured generation
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGeneration {
    /// Generated object
    pub object: serde_json::Value,
    /// Reported token usage
    pub usage: EngineUsage,
}

/// Result of a text generation
#[derive(Debug, Clone, PartialEq)]
pub struct TextGeneration {
    /// Generated text
    pub text: String,
    /// Reported token usage
    pub usage: EngineUsage,
}

/// A text/object generation backend
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Identifier of the model this engine generates with
    fn model_id(&self) -> &str;

    /// Generate an object that satisfies the request schema
    async fn generate_object(&self, request: ObjectRequest) -> Result<ObjectGeneration, LlmError>;

    /// Generate free text, letting the model see the offered tools
    async fn generate_text(&self, request: TextRequest) -> Result<TextGeneration, LlmError>;
}

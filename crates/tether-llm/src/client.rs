//! Chat-completion client facade over a generation engine

use std::sync::Arc;

use async_trait::async_trait;
use tether_config::{EngineConfig, EngineType};

use crate::dispatch::dispatch;
use crate::engine::GenerationEngine;
use crate::engine::openai::OpenAiEngine;
use crate::error::LlmError;
use crate::normalize::normalize_messages;
use crate::types::{CallResult, ChatCompletionOptions};

/// Client type reported by [`EngineClient`]
const ENGINE_CLIENT_TYPE: &str = "engine";

/// Generic LLM client interface
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short label identifying the client implementation
    fn client_type(&self) -> &'static str;

    /// Model the client generates with
    fn model_name(&self) -> &str;

    /// Whether the client accepts image input natively
    fn has_vision(&self) -> bool;

    /// Run one chat completion
    async fn create_chat_completion(&self, options: &ChatCompletionOptions) -> Result<CallResult, LlmError>;
}

/// Client that normalizes messages and hands them to a generation engine
#[derive(Clone)]
pub struct EngineClient {
    engine: Arc<dyn GenerationEngine>,
}

impl EngineClient {
    /// Wrap an existing engine
    pub fn new(engine: Arc<dyn GenerationEngine>) -> Self {
        Self { engine }
    }

    /// Build the engine described by `config` and wrap it
    pub fn from_config(config: &EngineConfig) -> Result<Self, LlmError> {
        let engine: Arc<dyn GenerationEngine> = match config.engine_type {
            EngineType::Openai => Arc::new(OpenAiEngine::new(config)?),
        };

        tracing::info!(engine = ?config.engine_type, model = %config.model, "engine client ready");

        Ok(Self::new(engine))
    }
}

#[async_trait]
impl LlmClient for EngineClient {
    fn client_type(&self) -> &'static str {
        ENGINE_CLIENT_TYPE
    }

    fn model_name(&self) -> &str {
        self.engine.model_id()
    }

    fn has_vision(&self) -> bool {
        false
    }

    async fn create_chat_completion(&self, options: &ChatCompletionOptions) -> Result<CallResult, LlmError> {
        let messages = normalize_messages(&options.messages);
        dispatch(self.engine.as_ref(), messages, options).await
    }
}

//! Chat-completion adapter over a text/object generation engine
//!
//! Callers hand over role-tagged messages, optional tools and an optional
//! response schema. Messages are normalized into the engine's message model,
//! then a single structured or free-text generation runs and its output and
//! token usage come back as a [`CallResult`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod client;
pub mod convert;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod protocol;
pub mod types;

pub use client::{EngineClient, LlmClient};
pub use dispatch::{build_tool_spec, dispatch};
pub use engine::GenerationEngine;
pub use engine::openai::OpenAiEngine;
pub use error::LlmError;
pub use normalize::{normalize_message, normalize_messages};
pub use types::{CallResult, ChatCompletionOptions, ChatMessage, CompletionData, ResponseModel, UsageCounters};

//! Caller-facing and engine-facing types
//!
//! Caller types describe what a client hands to the adapter; normalized types
//! describe what the generation engine receives.

pub mod message;
pub mod normalized;
pub mod request;
pub mod response;
pub mod tool;

pub use message::{ChatMessage, ContentPart, ImageData, MessageContent, Role};
pub use normalized::{AssistantContent, AssistantPart, CoreMessage, UserContent, UserPart};
pub use request::{ChatCompletionOptions, ResponseModel};
pub use response::{CallResult, CompletionData, UsageCounters};
pub use tool::{ToolDescriptor, ToolSpec, ToolSpecEntry};

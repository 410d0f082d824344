//! Selection between structured and free-text generation
//!
//! Exactly one engine call is made per dispatch. Engine errors are returned
//! as-is.

use crate::engine::{EngineUsage, GenerationEngine, ObjectRequest, TextRequest};
use crate::error::LlmError;
use crate::types::{
    CallResult, ChatCompletionOptions, CompletionData, CoreMessage, ToolDescriptor, ToolSpec, ToolSpecEntry,
    UsageCounters,
};

/// Run one generation for already-normalized messages
///
/// A response model selects structured generation; otherwise free text is
/// generated with whatever tools the options carry.
pub async fn dispatch(
    engine: &dyn GenerationEngine,
    messages: Vec<CoreMessage>,
    options: &ChatCompletionOptions,
) -> Result<CallResult, LlmError> {
    if let Some(response_model) = &options.response_model {
        let generation = engine
            .generate_object(ObjectRequest {
                messages,
                schema_name: response_model.name.clone(),
                schema: response_model.schema.clone(),
            })
            .await?;

        return Ok(CallResult {
            data: CompletionData::Object(generation.object),
            usage: generation.usage.into(),
        });
    }

    let tools = options.tools.as_deref().map(build_tool_spec).unwrap_or_default();

    let generation = engine.generate_text(TextRequest { messages, tools }).await?;

    Ok(CallResult {
        data: CompletionData::Text(generation.text),
        usage: generation.usage.into(),
    })
}

/// Key tool descriptors by name; a later duplicate replaces an earlier one
pub fn build_tool_spec(tools: &[ToolDescriptor]) -> ToolSpec {
    let mut spec = ToolSpec::with_capacity(tools.len());

    for tool in tools {
        spec.insert(
            tool.name.clone(),
            ToolSpecEntry {
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        );
    }

    spec
}

impl From<EngineUsage> for UsageCounters {
    fn from(usage: EngineUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens.unwrap_or(0),
            completion_tokens: usage.completion_tokens.unwrap_or(0),
            total_tokens: usage.total_tokens.unwrap_or(0),
        }
    }
}

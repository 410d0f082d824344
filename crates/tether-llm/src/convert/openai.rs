//! Conversion between normalized types and `OpenAI` wire format

use base64::Engine as _;
use serde_json::{Map, Value, json};

use crate::engine::{EngineUsage, ObjectGeneration, ObjectRequest, TextGeneration, TextRequest};
use crate::error::LlmError;
use crate::protocol::openai::{
    OpenAiContent, OpenAiContentPart, OpenAiFunction, OpenAiImageUrl, OpenAiJsonSchema, OpenAiMessage, OpenAiRequest,
    OpenAiResponse, OpenAiResponseFormat, OpenAiTool, OpenAiUsage,
};
use crate::types::{AssistantContent, AssistantPart, CoreMessage, ImageData, ToolSpec, UserContent, UserPart};

/// Media type assumed for base64 images that arrive without one
const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Longest schema name the API accepts
const MAX_SCHEMA_NAME_LEN: usize = 64;

// -- Outbound: normalized request -> OpenAI wire request --

/// Build a free-text request
pub fn text_request(model: &str, request: &TextRequest) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_owned(),
        messages: request.messages.iter().map(Into::into).collect(),
        tools: tools_to_openai(&request.tools),
        response_format: None,
    }
}

/// Build a structured-output request
pub fn object_request(model: &str, request: &ObjectRequest) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_owned(),
        messages: request.messages.iter().map(Into::into).collect(),
        tools: None,
        response_format: Some(OpenAiResponseFormat::JsonSchema {
            json_schema: OpenAiJsonSchema {
                name: schema_name(&request.schema_name),
                schema: strict_schema(&request.schema),
                strict: true,
            },
        }),
    }
}

impl From<&CoreMessage> for OpenAiMessage {
    fn from(msg: &CoreMessage) -> Self {
        let (role, content) = match msg {
            CoreMessage::System(text) => ("system", OpenAiContent::Text(text.clone())),
            CoreMessage::User(UserContent::Text(text)) => ("user", OpenAiContent::Text(text.clone())),
            CoreMessage::User(UserContent::Parts(parts)) => {
                ("user", OpenAiContent::Parts(parts.iter().map(Into::into).collect()))
            }
            CoreMessage::Assistant(AssistantContent::Text(text)) => ("assistant", OpenAiContent::Text(text.clone())),
            CoreMessage::Assistant(AssistantContent::Parts(parts)) => (
                "assistant",
                OpenAiContent::Parts(
                    parts
                        .iter()
                        .map(|AssistantPart::Text { text }| OpenAiContentPart::Text { text: text.clone() })
                        .collect(),
                ),
            ),
        };

        Self {
            role: role.to_owned(),
            content,
        }
    }
}

impl From<&UserPart> for OpenAiContentPart {
    fn from(part: &UserPart) -> Self {
        match part {
            UserPart::Text { text } => Self::Text { text: text.clone() },
            UserPart::Image { image } => Self::ImageUrl {
                image_url: OpenAiImageUrl { url: image_url(image) },
            },
        }
    }
}

/// Turn image data into something the `image_url` field accepts
///
/// URLs and data URIs pass through; anything else is treated as base64.
fn image_url(image: &ImageData) -> String {
    match image {
        ImageData::Reference(reference)
            if reference.starts_with("http://")
                || reference.starts_with("https://")
                || reference.starts_with("data:") =>
        {
            reference.clone()
        }
        ImageData::Reference(encoded) => format!("data:{DEFAULT_IMAGE_MEDIA_TYPE};base64,{encoded}"),
        ImageData::Bytes(bytes) => format!(
            "data:{DEFAULT_IMAGE_MEDIA_TYPE};base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ),
    }
}

/// Convert a tool spec to `OpenAI` function tools, or `None` when empty
fn tools_to_openai(tools: &ToolSpec) -> Option<Vec<OpenAiTool>> {
    if tools.is_empty() {
        return None;
    }

    Some(
        tools
            .iter()
            .map(|(name, entry)| OpenAiTool {
                tool_type: "function".to_owned(),
                function: OpenAiFunction {
                    name: name.clone(),
                    description: Some(entry.description.clone()).filter(|d| !d.is_empty()),
                    parameters: Some(entry.parameters.clone()).filter(|p| !p.is_null()),
                },
            })
            .collect(),
    )
}

/// Restrict a schema name to the characters and length the API accepts
fn schema_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .take(MAX_SCHEMA_NAME_LEN)
        .collect();

    if sanitized.is_empty() {
        "response".to_owned()
    } else {
        sanitized
    }
}

/// Rewrite a JSON Schema into the subset strict structured output accepts
///
/// Every object schema lists all of its properties in `required` and forbids
/// additional properties. Properties that were optional become nullable.
fn strict_schema(schema: &Value) -> Value {
    let mut strict = schema.clone();
    if let Value::Object(root) = &mut strict {
        root.remove("$schema");
    }
    make_strict(&mut strict);
    strict
}

fn make_strict(node: &mut Value) {
    let Value::Object(map) = node else {
        return;
    };

    let is_object = map.get("type").is_some_and(|t| t == "object") || map.contains_key("properties");
    if is_object {
        let required: Vec<String> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).map(str::to_owned).collect())
            .unwrap_or_default();

        let mut names = Vec::new();
        if let Some(Value::Object(properties)) = map.get_mut("properties") {
            for (name, property) in properties.iter_mut() {
                if !required.contains(name) {
                    make_nullable(property);
                }
                names.push(Value::String(name.clone()));
            }
        } else {
            map.insert("properties".to_owned(), Value::Object(Map::new()));
        }

        map.insert("required".to_owned(), Value::Array(names));
        map.insert("additionalProperties".to_owned(), Value::Bool(false));
    }

    for key in ["properties", "$defs", "definitions"] {
        if let Some(Value::Object(children)) = map.get_mut(key) {
            children.values_mut().for_each(make_strict);
        }
    }
    for key in ["anyOf", "oneOf", "allOf", "prefixItems"] {
        if let Some(Value::Array(children)) = map.get_mut(key) {
            children.iter_mut().for_each(make_strict);
        }
    }
    if let Some(items) = map.get_mut("items") {
        make_strict(items);
    }
}

/// Allow `null` in addition to whatever the schema already accepts
fn make_nullable(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };

    if let Some(ty) = map.get_mut("type") {
        let widened = match ty {
            Value::String(name) if name.as_str() != "null" => Some(json!([name.clone(), "null"])),
            Value::Array(names) if !names.iter().any(|n| n == "null") => {
                names.push(json!("null"));
                None
            }
            _ => None,
        };
        if let Some(widened) = widened {
            *ty = widened;
        }
        return;
    }

    if let Some(Value::Array(variants)) = map.get_mut("anyOf") {
        if !variants.iter().any(|v| v.get("type").is_some_and(|t| t == "null")) {
            variants.push(json!({"type": "null"}));
        }
        return;
    }

    let original = std::mem::take(schema);
    *schema = json!({"anyOf": [original, {"type": "null"}]});
}

// -- Inbound: OpenAI wire response -> generation results --

impl From<Option<&OpenAiUsage>> for EngineUsage {
    fn from(usage: Option<&OpenAiUsage>) -> Self {
        usage.map_or_else(Self::default, |u| Self {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
    }
}

/// Extract generated text from the first choice; missing content is empty text
pub fn text_generation(response: &OpenAiResponse) -> TextGeneration {
    let text = response
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    TextGeneration {
        text,
        usage: response.usage.as_ref().into(),
    }
}

/// Parse the first choice's content as the generated object
pub fn object_generation(response: &OpenAiResponse) -> Result<ObjectGeneration, LlmError> {
    let Some(choice) = response.choices.first() else {
        return Err(LlmError::NoObjectGenerated("response contained no choices".to_owned()));
    };

    if let Some(refusal) = &choice.message.refusal {
        return Err(LlmError::NoObjectGenerated(format!("model refused: {refusal}")));
    }

    let Some(content) = choice.message.content.as_deref() else {
        return Err(LlmError::NoObjectGenerated("response contained no content".to_owned()));
    };

    let object = serde_json::from_str(content)
        .map_err(|e| LlmError::NoObjectGenerated(format!("content is not valid JSON: {e}")))?;

    Ok(ObjectGeneration {
        object,
        usage: response.usage.as_ref().into(),
    })
}

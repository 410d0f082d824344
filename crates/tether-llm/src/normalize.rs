//! Conversion from caller messages to the engine's message representation
//!
//! Normalization is total: missing text or image fields become empty
//! strings instead of errors.

use crate::types::{
    AssistantContent, AssistantPart, ChatMessage, ContentPart, CoreMessage, MessageContent, Role, UserContent, UserPart,
};

/// Normalize a conversation, preserving length and order
pub fn normalize_messages(messages: &[ChatMessage]) -> Vec<CoreMessage> {
    messages.iter().map(normalize_message).collect()
}

/// Normalize a single message according to its role and content shape
pub fn normalize_message(message: &ChatMessage) -> CoreMessage {
    match &message.content {
        Some(MessageContent::Parts(parts)) => from_parts(message.role, parts),
        Some(MessageContent::Text(text)) => from_text(message.role, text.clone()),
        None => from_text(message.role, String::new()),
    }
}

fn from_text(role: Role, text: String) -> CoreMessage {
    match role {
        Role::System => CoreMessage::System(text),
        Role::User => CoreMessage::User(UserContent::Text(text)),
        Role::Assistant => CoreMessage::Assistant(AssistantContent::Text(text)),
    }
}

fn from_parts(role: Role, parts: &[ContentPart]) -> CoreMessage {
    match role {
        Role::System => CoreMessage::System(join_text(parts)),
        Role::User => CoreMessage::User(UserContent::Parts(parts.iter().map(to_user_part).collect())),
        // Assistant turns cannot carry attachments
        Role::Assistant => CoreMessage::Assistant(AssistantContent::Parts(
            parts
                .iter()
                .map(to_user_part)
                .filter_map(|part| match part {
                    UserPart::Text { text } => Some(AssistantPart::Text { text }),
                    UserPart::Image { .. } => None,
                })
                .collect(),
        )),
    }
}

/// Join every part's text with newlines; text-less parts contribute ""
fn join_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .map(|part| match part {
            ContentPart::Text { text } | ContentPart::Other { text, .. } => text.as_deref().unwrap_or_default(),
            ContentPart::Image { .. } => "",
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_user_part(part: &ContentPart) -> UserPart {
    match part {
        ContentPart::Image { image } => UserPart::Image {
            image: image.clone().unwrap_or_default(),
        },
        ContentPart::Text { text } | ContentPart::Other { text, .. } => UserPart::Text {
            text: text.clone().unwrap_or_default(),
        },
    }
}

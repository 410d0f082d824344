//! Engine-native message shapes produced by normalization
//!
//! Each role has its own content type so that, for example, an assistant
//! message cannot carry an image part.

use serde::{Deserialize, Serialize};

use super::message::ImageData;

/// Message in the generation engine's representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum CoreMessage {
    /// System instruction, always a single string
    System(String),
    /// User turn, text or ordered text/image parts
    User(UserContent),
    /// Assistant turn, text or text-only parts
    Assistant(AssistantContent),
}

/// Content of a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    /// Plain text
    Text(String),
    /// Ordered text and image parts
    Parts(Vec<UserPart>),
}

/// Part of a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserPart {
    /// Text block
    Text {
        /// The text string
        text: String,
    },
    /// Image block
    Image {
        /// Encoded image or reference to one
        image: ImageData,
    },
}

/// Content of an assistant message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssistantContent {
    /// Plain text
    Text(String),
    /// Ordered text parts
    Parts(Vec<AssistantPart>),
}

/// Part of an assistant message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantPart {
    /// Text block
    Text {
        /// The text string
        text: String,
    },
}

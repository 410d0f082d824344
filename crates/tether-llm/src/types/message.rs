use serde::{Deserialize, Serialize};

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

/// Message in a conversation, as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: Role,
    /// Message content; absent or null content is treated as empty text
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: &str) -> Self {
        Self::text(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: &str) -> Self {
        Self::text(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: &str) -> Self {
        Self::text(Role::Assistant, content)
    }

    /// Create a plain-text message with the given role
    pub fn text(role: Role, content: &str) -> Self {
        Self {
            role,
            content: Some(MessageContent::Text(content.to_owned())),
        }
    }

    /// Create a multipart message with the given role
    pub fn parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: Some(MessageContent::Parts(parts)),
        }
    }
}

/// Message content, either plain text or structured parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Ordered text/image parts
    Parts(Vec<ContentPart>),
}

/// Individual part within a multipart message
///
/// Fields are optional on input; normalization fills in empty defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContentPart", into = "RawContentPart")]
pub enum ContentPart {
    /// Text content block
    Text {
        /// The text string
        text: Option<String>,
    },
    /// Image content block
    Image {
        /// Encoded image or reference to one
        image: Option<ImageData>,
    },
    /// Any other part type; only its text is kept
    Other {
        /// Original `type` tag
        kind: String,
        /// The text string, if the part had one
        text: Option<String>,
    },
}

/// Wire shape shared by every part type
#[derive(Serialize, Deserialize)]
struct RawContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<ImageData>,
}

impl From<RawContentPart> for ContentPart {
    fn from(raw: RawContentPart) -> Self {
        match raw.kind.as_str() {
            "text" => Self::Text { text: raw.text },
            "image" => Self::Image { image: raw.image },
            _ => Self::Other {
                kind: raw.kind,
                text: raw.text,
            },
        }
    }
}

impl From<ContentPart> for RawContentPart {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => Self {
                kind: "text".to_owned(),
                text,
                image: None,
            },
            ContentPart::Image { image } => Self {
                kind: "image".to_owned(),
                text: None,
                image,
            },
            ContentPart::Other { kind, text } => Self {
                kind,
                text,
                image: None,
            },
        }
    }
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: &str) -> Self {
        Self::Text {
            text: Some(text.to_owned()),
        }
    }

    /// Create an image part
    pub fn image(image: impl Into<ImageData>) -> Self {
        Self::Image {
            image: Some(image.into()),
        }
    }
}

/// Image payload: a URL, a data URI, a base64 string, or raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageData {
    /// URL, data URI, or base64-encoded data
    Reference(String),
    /// Raw image bytes
    Bytes(Vec<u8>),
}

impl Default for ImageData {
    fn default() -> Self {
        Self::Reference(String::new())
    }
}

impl From<&str> for ImageData {
    fn from(value: &str) -> Self {
        Self::Reference(value.to_owned())
    }
}

impl From<String> for ImageData {
    fn from(value: String) -> Self {
        Self::Reference(value)
    }
}

impl From<Vec<u8>> for ImageData {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

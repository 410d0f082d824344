use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tool descriptor as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name; the last descriptor with a given name wins
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the tool parameters, forwarded verbatim
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl ToolDescriptor {
    /// Create a tool descriptor
    pub fn new(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            parameters,
        }
    }
}

/// Description and parameter schema of a tool, keyed by name in a [`ToolSpec`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpecEntry {
    /// Human-readable description
    pub description: String,
    /// JSON Schema for the tool parameters
    pub parameters: serde_json::Value,
}

/// Tools offered to the engine, keyed by name in first-seen order
pub type ToolSpec = IndexMap<String, ToolSpecEntry>;

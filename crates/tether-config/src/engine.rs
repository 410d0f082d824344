use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for the generation engine
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine protocol type
    #[serde(rename = "type")]
    pub engine_type: EngineType,
    /// Model identifier sent with every request
    pub model: String,
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Per-request timeout enforced by the engine's HTTP client (e.g. "30s", "2m")
    #[serde(default)]
    pub timeout: Option<String>,
}

impl EngineConfig {
    /// Build a config for an OpenAI-compatible engine with no key or overrides
    pub fn openai(model: impl Into<String>) -> Self {
        Self {
            engine_type: EngineType::Openai,
            model: model.into(),
            api_key: None,
            base_url: None,
            timeout: None,
        }
    }

    /// Parsed request timeout, if one is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not a valid duration
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid engine timeout '{raw}': {e}")))
            .transpose()
    }
}

/// Supported generation engine protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    /// OpenAI-compatible chat completions API
    Openai,
}

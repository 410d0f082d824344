//! Configuration helpers for integration tests

use tether_config::{Config, EngineConfig};

/// Engine config pointing at a mock server, loaded through the TOML loader
pub fn engine_config(base_url: &str) -> EngineConfig {
    let raw = format!(
        r#"
[engine]
type = "openai"
model = "mock-model-1"
api_key = "test-key"
base_url = "{base_url}"
timeout = "10s"
"#
    );

    Config::from_toml_str(&raw).unwrap().engine
}

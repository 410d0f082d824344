#![allow(clippy::must_use_candidate)]

//! Configuration for Tether
//!
//! A single TOML file describes the generation engine the adapter talks to
//! and how logs are emitted.

pub mod engine;
mod env;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use engine::*;
pub use telemetry::*;

/// Top-level Tether configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Generation engine configuration
    pub engine: EngineConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

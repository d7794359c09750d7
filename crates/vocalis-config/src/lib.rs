#![allow(clippy::must_use_candidate)]

mod duration;
mod env;
pub mod llm;
mod loader;
pub mod pipeline;
pub mod server;
pub mod stt;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use llm::*;
pub use pipeline::*;
pub use server::*;
pub use stt::*;
pub use telemetry::TelemetryConfig;
pub use tts::*;

/// Top-level Vocalis configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Worker HTTP surface
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech-to-text upstream
    pub stt: SttConfig,
    /// Chat completion upstream
    pub llm: LlmConfig,
    /// Text-to-speech upstream
    pub tts: TtsConfig,
    /// Persona and per-stage limits
    pub pipeline: PipelineConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

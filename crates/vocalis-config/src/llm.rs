use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Chat completion upstream (`OpenAI`-compatible)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key for authentication
    pub api_key: SecretString,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Per-request timeout
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

const fn default_temperature() -> f64 {
    0.5
}

const fn default_max_tokens() -> u32 {
    2048
}

const fn default_top_p() -> f64 {
    1.0
}

const fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Text-to-speech upstream (`OpenAI` speech API)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// API key
    pub api_key: SecretString,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Voice identifier
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Output audio format (mp3, opus, aac, flac, wav, pcm)
    #[serde(default = "default_format")]
    pub response_format: String,
    /// Speech speed multiplier (0.25 to 4.0)
    #[serde(default)]
    pub speed: Option<f64>,
    /// Per-request timeout
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "onyx".to_string()
}

fn default_format() -> String {
    "mp3".to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

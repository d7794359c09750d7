use std::{path::PathBuf, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech-to-text upstream (any Whisper-compatible API)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// API key
    pub api_key: SecretString,
    /// Base URL override, defaults to the Groq `OpenAI`-compatible endpoint
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Whether to translate into English or transcribe in the source language
    #[serde(default)]
    pub task: SttTask,
    /// Where decoded audio lives while it is uploaded
    #[serde(default)]
    pub staging: AudioStaging,
    /// Directory for staged audio files, system temp dir when unset
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
    /// File name announced to the upstream; its extension hints the container format
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Per-request timeout
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

/// Whisper endpoint flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SttTask {
    /// `/audio/translations`, output is always English
    #[default]
    Translate,
    /// `/audio/transcriptions`, output keeps the spoken language
    Transcribe,
}

/// Audio staging strategy for uploads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioStaging {
    /// Write to a temporary file and stream it from disk
    #[default]
    File,
    /// Keep the buffer in memory
    Memory,
}

fn default_model() -> String {
    "whisper-large-v3".to_string()
}

fn default_filename() -> String {
    "audio.wav".to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

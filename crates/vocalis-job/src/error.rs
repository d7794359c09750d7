use std::{fmt, time::Duration};

use stt::SttError;
use thiserror::Error;
use tts::TtsError;
use vocalis_llm::LlmError;

/// Pipeline stage that talks to an upstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcription,
    Completion,
    Synthesis,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::Completion => "completion",
            Self::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can end a job in the `error` state
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid input type: {0}")]
    InvalidInputType(String),

    #[error("Missing input field: {0}")]
    MissingField(&'static str),

    #[error("Invalid input field: {0} must be a string")]
    NotAString(&'static str),

    #[error("Audio decode error: {0}")]
    Decode(String),

    #[error("Audio processing error: {0}")]
    AudioProcessing(#[from] SttError),

    #[error("LLM processing error: {0}")]
    LlmProcessing(#[from] LlmError),

    #[error("TTS generation error: {0}")]
    TtsGeneration(#[from] TtsError),

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: Stage, after: Duration },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl JobError {
    /// Whether the caller sent something unusable, as opposed to an upstream fault
    pub const fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputType(_) | Self::MissingField(_) | Self::NotAString(_) | Self::Decode(_)
        )
    }
}

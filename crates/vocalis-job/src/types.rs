//! Job envelope as exchanged with the hosting platform

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::JobError;

/// Incoming job
#[derive(Debug, Clone, Deserialize)]
pub struct JobRequest {
    /// Job identifier, echoed back in the response
    #[serde(default)]
    pub id: String,
    /// Job payload
    pub input: JobInput,
}

/// Raw job payload before validation
///
/// Fields stay untyped JSON so a wrong value in a field the declared kind
/// does not read cannot reject the job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobInput {
    /// Declared input kind, `text` or `audio`
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    /// User text, read when the kind is `text`
    #[serde(default)]
    pub text: Option<Value>,
    /// Base64 audio, read when the kind is `audio`
    #[serde(default)]
    pub audio: Option<Value>,
}

/// What the user said, as reported back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UserInput {
    Text { text: String },
    Audio { transcription: String },
}

impl UserInput {
    /// The text that was sent to the model
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } => text,
            Self::Audio { transcription } => transcription,
        }
    }
}

/// The assistant's reply as text and base64 audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantResponse {
    pub text: String,
    pub audio: String,
}

/// Output of a completed job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutput {
    pub user_input: UserInput,
    pub assistant_response: AssistantResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Error,
}

impl JobStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

/// Final job result
///
/// Exactly one of `output` and `error` is set; the other serialises as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub status: JobStatus,
    pub output: Option<JobOutput>,
    pub error: Option<String>,
}

impl JobResponse {
    pub fn completed(id: impl Into<String>, output: JobOutput) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Completed,
            output: Some(output),
            error: None,
        }
    }

    pub fn failed(id: impl Into<String>, error: &JobError) -> Self {
        Self::rejected(id, error)
    }

    /// Error response for a job that never reached the pipeline
    pub fn rejected(id: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Error,
            output: None,
            error: Some(reason.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

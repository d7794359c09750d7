//! Validation of the raw job payload

use serde_json::Value;

use crate::{codec, error::JobError, types::JobInput};

/// Validated job input, ready for the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedInput {
    Text(String),
    Audio(Vec<u8>),
}

impl NormalizedInput {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Audio(_) => "audio",
        }
    }
}

/// Check the declared input kind and decode audio
///
/// The declared `type` governs: only the field it names is read.
pub fn normalize(input: &JobInput) -> Result<NormalizedInput, JobError> {
    match input.kind.as_ref() {
        Some(Value::String(kind)) if kind == "text" => {
            let text = string_field(input.text.as_ref(), "text")?;
            Ok(NormalizedInput::Text(text.to_string()))
        }
        Some(Value::String(kind)) if kind == "audio" => {
            let encoded = string_field(input.audio.as_ref(), "audio")?;
            let audio = codec::decode_audio(encoded).map_err(|e| JobError::Decode(e.to_string()))?;

            if audio.is_empty() {
                return Err(JobError::Decode("audio payload is empty".to_string()));
            }

            Ok(NormalizedInput::Audio(audio))
        }
        Some(Value::String(other)) => Err(JobError::InvalidInputType(other.clone())),
        None | Some(Value::Null) => Err(JobError::InvalidInputType("None".to_string())),
        Some(other) => Err(JobError::InvalidInputType(other.to_string())),
    }
}

fn string_field<'a>(value: Option<&'a Value>, name: &'static str) -> Result<&'a str, JobError> {
    match value {
        None | Some(Value::Null) => Err(JobError::MissingField(name)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(JobError::NotAString(name)),
    }
}

//! Base64 transport encoding for audio

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Decode transport base64 into raw audio bytes
///
/// Surrounding whitespace and a `data:<mime>;base64,` prefix are tolerated.
pub fn decode_audio(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = encoded.trim();
    let payload = strip_data_url(trimmed).unwrap_or(trimmed);

    STANDARD.decode(payload)
}

/// Encode raw audio bytes for transport
pub fn encode_audio(audio: &[u8]) -> String {
    STANDARD.encode(audio)
}

fn strip_data_url(value: &str) -> Option<&str> {
    let rest = value.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;
    Some(payload)
}

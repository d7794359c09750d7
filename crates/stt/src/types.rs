use serde::Deserialize;
use vocalis_config::SttTask;

use crate::staging::StagedAudio;

/// Upload handed to a provider
#[derive(Debug)]
pub(crate) struct TranscriptionRequest {
    /// Audio, in memory or on disk
    pub audio: StagedAudio,
    /// File name announced in the multipart form
    pub filename: String,
    /// Content type of the audio part
    pub content_type: &'static str,
    /// Model identifier (e.g. "whisper-large-v3")
    pub model: String,
    /// Translate to English or keep the source language
    pub task: SttTask,
    /// Always `json`, the only format we parse
    pub response_format: &'static str,
    /// Sampling temperature, fixed at zero
    pub temperature: f32,
}

/// Transcript returned by the upstream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed (or translated) text
    pub text: String,
}

/// Guess the audio MIME type from a file name's extension
pub(crate) fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::content_type_for;

    #[test]
    fn known_extensions() {
        assert_eq!(content_type_for("audio.wav"), "audio/wav");
        assert_eq!(content_type_for("clip.MP3"), "audio/mpeg");
        assert_eq!(content_type_for("voice.note.webm"), "audio/webm");
    }

    #[test]
    fn unknown_or_missing_extension() {
        assert_eq!(content_type_for("audio"), "application/octet-stream");
        assert_eq!(content_type_for("audio.xyz"), "application/octet-stream");
    }
}

/// Speech synthesis request following the `OpenAI` TTS API format
#[derive(Debug, Clone)]
pub(crate) struct SpeechRequest {
    /// Model identifier (e.g. "tts-1")
    pub model: String,
    /// Text to synthesize into speech
    pub input: String,
    /// Voice identifier (e.g. "onyx")
    pub voice: String,
    /// Output audio format (mp3, opus, aac, flac, wav, pcm)
    pub response_format: String,
    /// Speech speed multiplier (0.25 to 4.0)
    pub speed: Option<f64>,
}

/// Synthesized audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResponse {
    /// Raw audio bytes, chunks concatenated in arrival order
    pub audio: Vec<u8>,
}

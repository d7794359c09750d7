//! Seams between the orchestrator and the upstream adapters

use async_trait::async_trait;
use stt::{SttError, Transcriber};
use tts::{Synthesizer, TtsError};
use vocalis_llm::{Completer, LlmError};

/// Turns decoded audio into text
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, SttError>;
}

/// Produces the assistant's reply to the user's text
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, text: &str) -> Result<String, LlmError>;
}

/// Turns the reply into audio bytes
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError>;
}

#[async_trait]
impl SpeechToText for Transcriber {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, SttError> {
        let response = Transcriber::transcribe(self, audio).await?;
        Ok(response.text)
    }
}

#[async_trait]
impl ChatCompletion for Completer {
    async fn complete(&self, text: &str) -> Result<String, LlmError> {
        let response = Completer::complete(self, text).await?;
        Ok(response.text)
    }
}

#[async_trait]
impl TextToSpeech for Synthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let response = Synthesizer::synthesize(self, text).await?;
        Ok(response.audio)
    }
}

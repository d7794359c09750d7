use vocalis_config::TtsConfig;

use crate::{
    error::TtsError,
    provider::{TtsProvider, openai_tts::OpenAiTtsProvider},
    types::{SpeechRequest, SpeechResponse},
};

/// Synthesis adapter shared by every job
pub struct Synthesizer {
    provider: Box<dyn TtsProvider>,
    model: String,
    voice: String,
    response_format: String,
    speed: Option<f64>,
}

impl Synthesizer {
    /// Turn `text` into audio with the configured voice and format
    pub async fn synthesize(&self, text: &str) -> crate::error::Result<SpeechResponse> {
        let request = SpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: self.voice.clone(),
            response_format: self.response_format.clone(),
            speed: self.speed,
        };

        tracing::debug!(provider = self.provider.name(), "dispatching speech synthesis");

        self.provider.synthesize(request).await
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }
}

/// Builder for constructing the synthesizer from configuration
pub struct SynthesizerBuilder<'a> {
    config: &'a TtsConfig,
}

impl<'a> SynthesizerBuilder<'a> {
    pub const fn new(config: &'a TtsConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Synthesizer> {
        let client = vocalis_core::http_client(self.config.timeout).map_err(|e| TtsError::ConfigError(e.to_string()))?;

        let provider = OpenAiTtsProvider::new(client, self.config.api_key.clone(), self.config.base_url.as_ref());

        tracing::debug!(
            model = %self.config.model,
            voice = %self.config.voice,
            format = %self.config.response_format,
            "TTS synthesizer initialized"
        );

        Ok(self.with_provider(Box::new(provider)))
    }

    pub(crate) fn with_provider(self, provider: Box<dyn TtsProvider>) -> Synthesizer {
        Synthesizer {
            provider,
            model: self.config.model.clone(),
            voice: self.config.voice.clone(),
            response_format: self.config.response_format.clone(),
            speed: self.config.speed,
        }
    }
}

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use vocalis_config::SttTask;

use crate::{
    error::SttError,
    types::{TranscriptionRequest, TranscriptionResponse},
};

use super::SttProvider;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

/// Whisper-compatible STT provider (Groq, `OpenAI`, local whisper servers)
pub(crate) struct WhisperProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl WhisperProvider {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<&Url>) -> Self {
        let base_url = base_url.map_or(DEFAULT_API_URL, Url::as_str).trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self, task: SttTask) -> String {
        match task {
            SttTask::Translate => format!("{}/audio/translations", self.base_url),
            SttTask::Transcribe => format!("{}/audio/transcriptions", self.base_url),
        }
    }
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse> {
        let url = self.endpoint(request.task);

        tracing::debug!(
            bytes = request.audio.byte_len(),
            model = %request.model,
            task = ?request.task,
            "whisper request"
        );

        let file = request
            .audio
            .to_part()?
            .file_name(request.filename)
            .mime_str(request.content_type)
            .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", request.model)
            .text("response_format", request.response_format)
            .text("temperature", request.temperature.to_string());

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Whisper: {e}"))
            })?;

        if !response.status().is_success() {
            let failure = vocalis_core::read_failure(response).await;

            tracing::error!("Whisper API error ({}): {}", failure.status, failure.message());

            return Err(failure.into());
        }

        let result: TranscriptionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            SttError::MalformedResponse(e.to_string())
        })?;

        tracing::debug!(chars = result.text.len(), "whisper transcription complete");

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "whisper"
    }
}

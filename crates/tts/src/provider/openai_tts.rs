use std::fmt::Display;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::TtsError,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Upper bound on the buffer reserved from a declared `Content-Length`
const MAX_PREALLOC_BYTES: u64 = 8 * 1024 * 1024;

/// `OpenAI` TTS provider
pub(crate) struct OpenAiTtsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl OpenAiTtsProvider {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<&Url>) -> Self {
        let base_url = base_url
            .map_or(DEFAULT_OPENAI_API_URL, Url::as_str)
            .trim_end_matches('/')
            .to_string();

        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[derive(serde::Serialize)]
struct OpenAiTtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
}

#[async_trait]
impl TtsProvider for OpenAiTtsProvider {
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        let url = format!("{}/audio/speech", self.base_url);

        tracing::debug!(
            model = %request.model,
            voice = %request.voice,
            input_len = request.input.len(),
            "OpenAI TTS request"
        );

        let body = OpenAiTtsRequest {
            model: &request.model,
            input: &request.input,
            voice: &request.voice,
            response_format: &request.response_format,
            speed: request.speed,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI TTS request failed: {e}");
                TtsError::ConnectionError(format!("Failed to send request to OpenAI TTS: {e}"))
            })?;

        if !response.status().is_success() {
            let failure = vocalis_core::read_failure(response).await;

            tracing::error!("OpenAI TTS API error ({}): {}", failure.status, failure.message());

            return Err(failure.into());
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let size_hint = response.content_length().unwrap_or_default();
        let audio = collect_chunks(response.bytes_stream(), size_hint).await?;

        tracing::debug!(%content_type, "OpenAI TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechResponse { audio })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Concatenate a chunked audio body in arrival order
///
/// A stream that breaks midway fails the whole synthesis; partial audio is
/// never returned. `size_hint` is the declared body length and only seeds
/// the buffer, capped at [`MAX_PREALLOC_BYTES`].
pub(crate) async fn collect_chunks<S, B, E>(stream: S, size_hint: u64) -> crate::error::Result<Vec<u8>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let reserve = usize::try_from(size_hint.min(MAX_PREALLOC_BYTES)).unwrap_or_default();
    let mut audio = Vec::with_capacity(reserve);
    let mut chunks = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::error!(chunks, "OpenAI TTS stream interrupted: {e}");
            TtsError::ConnectionError(format!("Audio stream interrupted: {e}"))
        })?;

        audio.extend_from_slice(chunk.as_ref());
        chunks += 1;
    }

    tracing::trace!(chunks, bytes = audio.len(), "audio stream drained");

    if audio.is_empty() {
        return Err(TtsError::EmptyAudio);
    }

    Ok(audio)
}

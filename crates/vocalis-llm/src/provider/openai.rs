//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::Provider;
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default base URL, Groq's OpenAI-compatible endpoint
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl OpenAiProvider {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<&Url>) -> Self {
        let base_url = base_url
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let wire_request = OpenAiRequest::from(request);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %request.model, error = %e, "upstream request failed");
                LlmError::Connection(e.to_string())
            })?;

        if !response.status().is_success() {
            let failure = vocalis_core::read_failure(response).await;
            tracing::warn!(
                model = %request.model,
                status = %failure.status,
                "upstream returned error"
            );
            return Err(failure.into());
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("failed to parse response: {e}")))?;

        let text = wire_response.first_text().ok_or(LlmError::EmptyCompletion)?.to_owned();

        let model = if wire_response.model.is_empty() {
            request.model.clone()
        } else {
            wire_response.model
        };

        Ok(CompletionResponse {
            text,
            model,
            total_tokens: wire_response.usage.map(|usage| usage.total_tokens),
        })
    }
}

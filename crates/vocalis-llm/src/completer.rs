use vocalis_config::LlmConfig;

use crate::{
    error::LlmError,
    provider::{Provider, openai::OpenAiProvider},
    types::{CompletionParams, CompletionRequest, CompletionResponse, Message},
};

/// Chat completion adapter shared by every job
///
/// Each call is a fresh two-message conversation: the persona prompt
/// followed by the user's text. Nothing is carried between calls.
pub struct Completer {
    provider: Box<dyn Provider>,
    model: String,
    system_prompt: String,
    params: CompletionParams,
}

impl Completer {
    /// Ask the model to reply to `text` in the configured persona
    pub async fn complete(&self, text: &str) -> Result<CompletionResponse, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(self.system_prompt.as_str()), Message::user(text)],
            params: self.params.clone(),
        };

        tracing::debug!(provider = self.provider.name(), model = %self.model, "dispatching completion");

        let response = self.provider.complete(&request).await?;

        if let Some(total_tokens) = response.total_tokens {
            tracing::debug!(total_tokens, "completion usage");
        }

        Ok(response)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Builder for constructing the completer from configuration
pub struct CompleterBuilder<'a> {
    config: &'a LlmConfig,
    system_prompt: &'a str,
}

impl<'a> CompleterBuilder<'a> {
    pub const fn new(config: &'a LlmConfig, system_prompt: &'a str) -> Self {
        Self { config, system_prompt }
    }

    pub fn build(self) -> Result<Completer, LlmError> {
        let client = vocalis_core::http_client(self.config.timeout).map_err(|e| LlmError::Internal(e.into()))?;

        let provider = OpenAiProvider::new(client, self.config.api_key.clone(), self.config.base_url.as_ref());

        tracing::debug!(
            model = %self.config.model,
            temperature = self.config.temperature,
            max_tokens = self.config.max_tokens,
            "LLM completer initialized"
        );

        Ok(self.with_provider(Box::new(provider)))
    }

    pub(crate) fn with_provider(self, provider: Box<dyn Provider>) -> Completer {
        Completer {
            provider,
            model: self.config.model.clone(),
            system_prompt: self.system_prompt.to_owned(),
            params: CompletionParams {
                temperature: Some(self.config.temperature),
                top_p: Some(self.config.top_p),
                max_tokens: Some(self.config.max_tokens),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;
    use secrecy::SecretString;

    use super::*;
    use crate::types::Role;

    struct RecordingProvider {
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
        reply: Result<&'static str, u16>,
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());

            match self.reply {
                Ok(text) => Ok(CompletionResponse {
                    text: text.to_string(),
                    model: request.model.clone(),
                    total_tokens: Some(42),
                }),
                Err(status) => Err(LlmError::Upstream {
                    status,
                    message: "model overloaded".to_string(),
                }),
            }
        }
    }

    fn config() -> LlmConfig {
        LlmConfig {
            api_key: SecretString::from("test-key"),
            base_url: None,
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.5,
            max_tokens: 2048,
            top_p: 1.0,
            timeout: Duration::from_secs(5),
        }
    }

    fn completer(reply: Result<&'static str, u16>) -> (Completer, Arc<Mutex<Vec<CompletionRequest>>>) {
        let config = config();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = RecordingProvider {
            seen: Arc::clone(&seen),
            reply,
        };

        let completer = CompleterBuilder::new(&config, "You are Jarvis.").with_provider(Box::new(provider));
        (completer, seen)
    }

    #[tokio::test]
    async fn sends_persona_then_user_text() {
        let (completer, seen) = completer(Ok("Good evening, sir."));

        let response = completer.complete("Hello").await.unwrap();
        assert_eq!(response.text, "Good evening, sir.");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);

        let request = &seen[0];
        assert_eq!(request.model, "llama-3.3-70b-versatile");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, "You are Jarvis.");
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Hello");
    }

    #[tokio::test]
    async fn sampling_parameters_come_from_config() {
        let (completer, seen) = completer(Ok("ok"));
        completer.complete("Hi").await.unwrap();

        let seen = seen.lock().unwrap();
        let params = &seen[0].params;
        assert_eq!(params.temperature, Some(0.5));
        assert_eq!(params.top_p, Some(1.0));
        assert_eq!(params.max_tokens, Some(2048));
    }

    #[tokio::test]
    async fn calls_do_not_share_history() {
        let (completer, seen) = completer(Ok("ok"));
        completer.complete("first").await.unwrap();
        completer.complete("second").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[1].messages.len(), 2);
        assert_eq!(seen[1].messages[1].content, "second");
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let (completer, _seen) = completer(Err(503));

        let err = completer.complete("Hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Upstream { status: 503, .. }));
        assert_eq!(err.to_string(), "upstream error (503): model overloaded");
    }
}

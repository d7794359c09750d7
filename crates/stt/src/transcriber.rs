use std::path::PathBuf;

use vocalis_config::{AudioStaging, SttConfig, SttTask};

use crate::{
    error::SttError,
    provider::{SttProvider, whisper::WhisperProvider},
    staging::StagedAudio,
    types::{TranscriptionRequest, TranscriptionResponse, content_type_for},
};

/// Transcription adapter shared by every job
///
/// Holds the provider and its connection pool; built once at startup.
pub struct Transcriber {
    provider: Box<dyn SttProvider>,
    model: String,
    task: SttTask,
    staging: AudioStaging,
    staging_dir: Option<PathBuf>,
    filename: String,
}

impl Transcriber {
    /// Stage decoded audio and transcribe it
    ///
    /// Staged files are removed before this returns, on success and on error.
    pub async fn transcribe(&self, audio: Vec<u8>) -> crate::error::Result<TranscriptionResponse> {
        let audio = StagedAudio::stage(audio, self.staging, self.staging_dir.as_deref(), &self.filename).await?;

        let request = TranscriptionRequest {
            audio,
            filename: self.filename.clone(),
            content_type: content_type_for(&self.filename),
            model: self.model.clone(),
            task: self.task,
            response_format: "json",
            temperature: 0.0,
        };

        tracing::debug!(provider = self.provider.name(), "dispatching transcription");

        self.provider.transcribe(request).await
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Builder for constructing the transcriber from configuration
pub struct TranscriberBuilder<'a> {
    config: &'a SttConfig,
}

impl<'a> TranscriberBuilder<'a> {
    pub const fn new(config: &'a SttConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Transcriber> {
        let client = vocalis_core::http_client(self.config.timeout).map_err(|e| SttError::ConfigError(e.to_string()))?;

        let provider = WhisperProvider::new(client, self.config.api_key.clone(), self.config.base_url.as_ref());

        tracing::debug!(
            model = %self.config.model,
            staging = ?self.config.staging,
            "STT transcriber initialized"
        );

        Ok(self.with_provider(Box::new(provider)))
    }

    pub(crate) fn with_provider(self, provider: Box<dyn SttProvider>) -> Transcriber {
        Transcriber {
            provider,
            model: self.config.model.clone(),
            task: self.config.task,
            staging: self.config.staging,
            staging_dir: self.config.staging_dir.clone(),
            filename: self.config.filename.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::Path,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;
    use secrecy::SecretString;

    use super::*;

    /// Records what the provider saw while the request was in flight
    #[derive(Default)]
    struct Observed {
        path: Option<PathBuf>,
        existed_during_call: bool,
        content_type: Option<&'static str>,
        response_format: Option<&'static str>,
    }

    struct FakeProvider {
        observed: Arc<Mutex<Observed>>,
        fail: bool,
    }

    #[async_trait]
    impl SttProvider for FakeProvider {
        async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse> {
            {
                let mut observed = self.observed.lock().unwrap();
                observed.path = request.audio.path().map(Path::to_path_buf);
                observed.existed_during_call = request.audio.path().is_some_and(Path::exists);
                observed.content_type = Some(request.content_type);
                observed.response_format = Some(request.response_format);
            }

            if self.fail {
                return Err(SttError::ProviderApiError {
                    status: 503,
                    message: "overloaded".to_string(),
                });
            }

            Ok(TranscriptionResponse {
                text: "hello there".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn config(staging: AudioStaging, dir: &Path) -> SttConfig {
        SttConfig {
            api_key: SecretString::from("test-key"),
            base_url: None,
            model: "whisper-large-v3".to_string(),
            task: SttTask::Translate,
            staging,
            staging_dir: Some(dir.to_path_buf()),
            filename: "audio.wav".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn transcriber(config: &SttConfig, fail: bool) -> (Transcriber, Arc<Mutex<Observed>>) {
        let observed = Arc::new(Mutex::new(Observed::default()));
        let provider = FakeProvider {
            observed: Arc::clone(&observed),
            fail,
        };
        (TranscriberBuilder::new(config).with_provider(Box::new(provider)), observed)
    }

    #[tokio::test]
    async fn staged_file_exists_only_during_the_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(AudioStaging::File, dir.path());
        let (transcriber, observed) = transcriber(&config, false);

        let response = transcriber.transcribe(b"fake wav".to_vec()).await.unwrap();
        assert_eq!(response.text, "hello there");

        let observed = observed.lock().unwrap();
        assert!(observed.existed_during_call);
        assert!(!observed.path.as_ref().unwrap().exists());
        assert_eq!(observed.content_type, Some("audio/wav"));
        assert_eq!(observed.response_format, Some("json"));
    }

    #[tokio::test]
    async fn staged_file_is_removed_when_upstream_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(AudioStaging::File, dir.path());
        let (transcriber, observed) = transcriber(&config, true);

        let err = transcriber.transcribe(b"fake wav".to_vec()).await.unwrap_err();
        assert!(matches!(err, SttError::ProviderApiError { status: 503, .. }));

        assert!(observed.lock().unwrap().existed_during_call);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn memory_staging_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(AudioStaging::Memory, dir.path());
        let (transcriber, observed) = transcriber(&config, false);

        transcriber.transcribe(b"fake wav".to_vec()).await.unwrap();

        assert!(observed.lock().unwrap().path.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn missing_staging_dir_is_a_staging_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(AudioStaging::File, &dir.path().join("does-not-exist"));
        let (transcriber, _observed) = transcriber(&config, false);

        let err = transcriber.transcribe(b"fake wav".to_vec()).await.unwrap_err();
        assert!(matches!(err, SttError::Staging(_)));
    }
}

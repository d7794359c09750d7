//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use vocalis_config::{
    AudioStaging, Config, HealthConfig, LlmConfig, PipelineConfig, ServerConfig, SttConfig, SttTask, TtsConfig,
};

pub const SYSTEM_PROMPT: &str = "You are a concise test assistant.";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Point all three upstreams at `base_url`
    pub fn new(base_url: &str) -> Self {
        let base_url: Url = base_url.parse().expect("valid URL");
        let timeout = Duration::from_secs(10);

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                stt: SttConfig {
                    api_key: SecretString::from("test-key"),
                    base_url: Some(base_url.clone()),
                    model: "whisper-large-v3".to_owned(),
                    task: SttTask::Translate,
                    staging: AudioStaging::Memory,
                    staging_dir: None,
                    filename: "audio.wav".to_owned(),
                    timeout,
                },
                llm: LlmConfig {
                    api_key: SecretString::from("test-key"),
                    base_url: Some(base_url.clone()),
                    model: "llama-3.3-70b-versatile".to_owned(),
                    temperature: 0.5,
                    max_tokens: 2048,
                    top_p: 1.0,
                    timeout,
                },
                tts: TtsConfig {
                    api_key: SecretString::from("test-key"),
                    base_url: Some(base_url),
                    model: "tts-1".to_owned(),
                    voice: "onyx".to_owned(),
                    response_format: "mp3".to_owned(),
                    speed: None,
                    timeout,
                },
                pipeline: PipelineConfig {
                    system_prompt: SYSTEM_PROMPT.to_owned(),
                    stage_timeout: None,
                },
                telemetry: None,
            },
        }
    }

    /// Stage uploads as temporary files in `dir`
    pub fn with_file_staging(mut self, dir: &Path) -> Self {
        self.config.stt.staging = AudioStaging::File;
        self.config.stt.staging_dir = Some(dir.to_path_buf());
        self
    }

    /// Use the transcription endpoint instead of translation
    pub fn with_transcription(mut self) -> Self {
        self.config.stt.task = SttTask::Transcribe;
        self
    }

    pub fn with_voice(mut self, voice: &str) -> Self {
        self.config.tts.voice = voice.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}

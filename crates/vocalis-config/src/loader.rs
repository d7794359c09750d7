use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Credentials are checked here so a worker with a missing key never
    /// starts accepting jobs.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        require_key("stt", &self.stt.api_key)?;
        require_key("llm", &self.llm.api_key)?;
        require_key("tts", &self.tts.api_key)?;

        self.validate_llm()?;
        self.validate_tts()?;
        self.validate_pipeline()?;

        Ok(())
    }

    fn validate_llm(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be between 0.0 and 2.0, got {}", self.llm.temperature);
        }

        if !(0.0..=1.0).contains(&self.llm.top_p) {
            anyhow::bail!("llm.top_p must be between 0.0 and 1.0, got {}", self.llm.top_p);
        }

        if self.llm.max_tokens == 0 {
            anyhow::bail!("llm.max_tokens must be greater than 0");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        if self.tts.voice.trim().is_empty() {
            anyhow::bail!("tts.voice must not be empty");
        }

        if let Some(speed) = self.tts.speed
            && !(0.25..=4.0).contains(&speed)
        {
            anyhow::bail!("tts.speed must be between 0.25 and 4.0, got {speed}");
        }

        Ok(())
    }

    fn validate_pipeline(&self) -> anyhow::Result<()> {
        if self.pipeline.system_prompt.trim().is_empty() {
            anyhow::bail!("pipeline.system_prompt must not be empty");
        }

        if self.pipeline.stage_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("pipeline.stage_timeout must be greater than zero");
        }

        Ok(())
    }
}

fn require_key(section: &str, key: &SecretString) -> anyhow::Result<()> {
    if key.expose_secret().trim().is_empty() {
        anyhow::bail!("{section}.api_key must not be empty");
    }
    Ok(())
}

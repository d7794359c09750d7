#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod synthesizer;
mod types;

use std::sync::Arc;

pub use error::{Result, TtsError};
pub use synthesizer::{Synthesizer, SynthesizerBuilder};
pub use types::SpeechResponse;

/// Build the synthesizer from configuration
pub fn build_synthesizer(config: &vocalis_config::TtsConfig) -> anyhow::Result<Arc<Synthesizer>> {
    let synthesizer = SynthesizerBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize TTS synthesizer: {e}"))?;

    Ok(Arc::new(synthesizer))
}

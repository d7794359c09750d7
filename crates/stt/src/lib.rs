#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod staging;
mod transcriber;
mod types;

use std::sync::Arc;

pub use error::{Result, SttError};
pub use transcriber::{Transcriber, TranscriberBuilder};
pub use types::TranscriptionResponse;

/// Build the transcriber from configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created
pub fn build_transcriber(config: &vocalis_config::SttConfig) -> anyhow::Result<Arc<Transcriber>> {
    let transcriber = TranscriberBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize STT transcriber: {e}"))?;

    Ok(Arc::new(transcriber))
}

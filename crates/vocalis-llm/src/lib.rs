//! Chat completion client for Vocalis
//!
//! Sends a persona prompt plus the user's text to an `OpenAI`-compatible
//! chat completions endpoint and returns the first choice's text.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod completer;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod types;

use std::sync::Arc;

pub use completer::{Completer, CompleterBuilder};
pub use error::LlmError;
pub use provider::Provider;
pub use types::{CompletionRequest, CompletionResponse, Message, Role};

/// Build the completer from configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created
pub fn build_completer(config: &vocalis_config::LlmConfig, system_prompt: &str) -> anyhow::Result<Arc<Completer>> {
    let completer = CompleterBuilder::new(config, system_prompt)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize LLM completer: {e}"))?;

    Ok(Arc::new(completer))
}

//! Job orchestration for Vocalis
//!
//! Validates a job, transcribes audio when needed, asks the model for a
//! reply, synthesizes it, and always answers with a well-formed
//! [`JobResponse`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod codec;
mod error;
mod input;
mod orchestrator;
pub mod stage;
mod types;

use std::sync::Arc;

use vocalis_config::Config;

pub use error::{JobError, Stage};
pub use input::{NormalizedInput, normalize};
pub use orchestrator::Orchestrator;
pub use types::{AssistantResponse, JobInput, JobOutput, JobRequest, JobResponse, JobStatus, UserInput};

/// Build the orchestrator and its upstream clients from configuration
///
/// Clients are created once here and shared by every job.
pub fn build_orchestrator(config: &Config) -> anyhow::Result<Arc<Orchestrator>> {
    let transcriber = stt::build_transcriber(&config.stt)?;
    let completer = vocalis_llm::build_completer(&config.llm, &config.pipeline.system_prompt)?;
    let synthesizer = tts::build_synthesizer(&config.tts)?;

    tracing::info!(
        stt_model = transcriber.model(),
        llm_model = completer.model(),
        voice = synthesizer.voice(),
        "pipeline ready"
    );

    let orchestrator =
        Orchestrator::new(transcriber, completer, synthesizer).with_stage_timeout(config.pipeline.stage_timeout);

    Ok(Arc::new(orchestrator))
}

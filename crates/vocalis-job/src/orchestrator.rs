use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::Instrument;
use vocalis_telemetry::metrics::PipelineMetrics;

use crate::{
    codec,
    error::{JobError, Stage},
    input::{NormalizedInput, normalize},
    stage::{ChatCompletion, SpeechToText, TextToSpeech},
    types::{AssistantResponse, JobInput, JobOutput, JobRequest, JobResponse, UserInput},
};

/// Runs one job through normalise, transcribe, complete and synthesize
///
/// Shared read-only across concurrent jobs. Stages run strictly in order and
/// the first failure ends the job.
pub struct Orchestrator {
    stt: Arc<dyn SpeechToText>,
    llm: Arc<dyn ChatCompletion>,
    tts: Arc<dyn TextToSpeech>,
    stage_timeout: Option<Duration>,
    metrics: PipelineMetrics,
}

impl Orchestrator {
    pub fn new(stt: Arc<dyn SpeechToText>, llm: Arc<dyn ChatCompletion>, tts: Arc<dyn TextToSpeech>) -> Self {
        Self {
            stt,
            llm,
            tts,
            stage_timeout: None,
            metrics: PipelineMetrics::new(),
        }
    }

    /// Bound every upstream stage by `timeout`
    #[must_use]
    pub const fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Process a job; failures become an `error` response, never a panic or `Err`
    pub async fn handle(&self, request: JobRequest) -> JobResponse {
        let span = tracing::info_span!("job", job.id = %request.id);

        async move {
            let started = Instant::now();
            let input_kind = input_kind(&request.input);

            let response = match self.run(&request.input).await {
                Ok(output) => {
                    tracing::info!(elapsed_ms = elapsed_ms(started), "job completed");
                    JobResponse::completed(request.id, output)
                }
                Err(error) => {
                    if error.is_caller_fault() {
                        tracing::warn!(error = %error, "job rejected");
                    } else {
                        tracing::error!(error = %error, "job failed");
                    }
                    JobResponse::failed(request.id, &error)
                }
            };

            self.metrics.record_job(response.status.as_str(), input_kind);

            response
        }
        .instrument(span)
        .await
    }

    async fn run(&self, input: &JobInput) -> Result<JobOutput, JobError> {
        let user_input = match normalize(input)? {
            NormalizedInput::Text(text) => UserInput::Text { text },
            NormalizedInput::Audio(audio) => {
                tracing::debug!(bytes = audio.len(), "audio decoded");
                let transcription = self.stage(Stage::Transcription, self.stt.transcribe(audio)).await?;
                UserInput::Audio { transcription }
            }
        };

        let reply = self.stage(Stage::Completion, self.llm.complete(user_input.text())).await?;
        let audio = self.stage(Stage::Synthesis, self.tts.synthesize(&reply)).await?;

        Ok(JobOutput {
            user_input,
            assistant_response: AssistantResponse {
                text: reply,
                audio: codec::encode_audio(&audio),
            },
        })
    }

    /// Run one upstream call under its own span, deadline and metrics
    async fn stage<T, E, F>(&self, stage: Stage, call: F) -> Result<T, JobError>
    where
        F: Future<Output = Result<T, E>>,
        JobError: From<E>,
    {
        let span = tracing::info_span!("stage", stage = stage.as_str());

        async move {
            let started = Instant::now();

            let result = match self.stage_timeout {
                Some(after) => match tokio::time::timeout(after, call).await {
                    Ok(result) => result.map_err(JobError::from),
                    Err(_) => Err(JobError::Timeout { stage, after }),
                },
                None => call.await.map_err(JobError::from),
            };

            let elapsed = started.elapsed();
            self.metrics.record_stage(stage.as_str(), elapsed, result.is_ok());
            tracing::debug!(elapsed_ms = elapsed.as_millis(), ok = result.is_ok(), "stage finished");

            result
        }
        .instrument(span)
        .await
    }
}

fn input_kind(input: &JobInput) -> &'static str {
    match input.kind.as_ref().and_then(serde_json::Value::as_str) {
        Some("text") => "text",
        Some("audio") => "audio",
        _ => "invalid",
    }
}

fn elapsed_ms(started: Instant) -> u128 {
    started.elapsed().as_millis()
}

use std::{sync::Arc, time::Instant};

use axum::{Json, body::Bytes, extract::State};
use http::StatusCode;
use serde_json::Value;
use thiserror::Error;
use vocalis_job::{JobError, JobInput, JobRequest, JobResponse, Orchestrator};
use vocalis_telemetry::{Histogram, KeyValue, metrics::record_http_duration};

#[derive(Clone)]
pub struct RunSyncState {
    pub orchestrator: Arc<Orchestrator>,
    pub request_duration: Histogram<f64>,
}

/// Reasons a body never becomes a job
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Invalid job payload: body is not valid JSON ({0})")]
    NotJson(serde_json::Error),

    #[error("Invalid job payload: missing `input` object")]
    MissingInput,
}

/// Run one job to completion and answer with its result
///
/// Answers `200` for every job that reached the pipeline, whatever its
/// outcome, and `400` for bodies that are not a job at all.
pub async fn runsync_handler(State(state): State<RunSyncState>, body: Bytes) -> (StatusCode, Json<JobResponse>) {
    let started = Instant::now();

    let (status, response) = match parse_job(&body) {
        Ok(request) => (StatusCode::OK, run_job(&state.orchestrator, request).await),
        Err((id, error)) => {
            tracing::warn!(job.id = %id, error = %error, "rejected job payload");
            (StatusCode::BAD_REQUEST, JobResponse::rejected(id, error))
        }
    };

    record_http_duration(
        &state.request_duration,
        started.elapsed(),
        &[
            KeyValue::new("http.route", "/runsync"),
            KeyValue::new("http.response.status_code", i64::from(status.as_u16())),
            KeyValue::new("job.status", response.status.as_str()),
        ],
    );

    (status, Json(response))
}

/// Run the job on its own task
///
/// The job finishes even if the caller disconnects mid-request. A task that
/// ends without a response is reported as `Unknown`; with `panic = "abort"`
/// that only happens when the runtime shuts down.
async fn run_job(orchestrator: &Arc<Orchestrator>, request: JobRequest) -> JobResponse {
    let id = request.id.clone();
    let orchestrator = Arc::clone(orchestrator);

    match tokio::spawn(async move { orchestrator.handle(request).await }).await {
        Ok(response) => response,
        Err(join_error) => {
            let error = JobError::Unknown(join_error.to_string());
            tracing::error!(job.id = %id, error = %error, "job task aborted");
            JobResponse::failed(id, &error)
        }
    }
}

/// Parse a request body into a job, assigning an id when none is given
///
/// On failure the id that will be echoed in the rejection is returned with
/// the error.
///
/// Input fields are passed on as raw JSON; judging them is left to the
/// orchestrator so that bad values still produce a job response.
pub fn parse_job(body: &[u8]) -> Result<JobRequest, (String, PayloadError)> {
    let mut value: Value = serde_json::from_slice(body).map_err(|e| (new_job_id(), PayloadError::NotJson(e)))?;

    let id = job_id(&value).unwrap_or_else(new_job_id);

    let Some(Value::Object(mut input)) = value.get_mut("input").map(Value::take) else {
        return Err((id, PayloadError::MissingInput));
    };

    let input = JobInput {
        kind: input.remove("type"),
        text: input.remove("text"),
        audio: input.remove("audio"),
    };

    Ok(JobRequest { id, input })
}

fn job_id(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn new_job_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

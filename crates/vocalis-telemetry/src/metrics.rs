//! Metric name constants and recording helpers

use std::time::Duration;

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};

// Pipeline metric names
pub const STAGE_DURATION: &str = "vocalis.stage.duration";
pub const JOB_COUNT: &str = "vocalis.job.count";

// HTTP metric names
pub const HTTP_REQUEST_DURATION: &str = "http.server.request.duration";

/// Meter shared by every Vocalis instrument
pub fn meter() -> Meter {
    global::meter("vocalis")
}

/// Instruments recorded by the job orchestrator
///
/// Without an installed meter provider the global no-op meter is used, so
/// recording is always safe.
#[derive(Clone)]
pub struct PipelineMetrics {
    stage_duration: Histogram<f64>,
    job_count: Counter<u64>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        let meter = meter();

        Self {
            stage_duration: meter
                .f64_histogram(STAGE_DURATION)
                .with_unit("s")
                .with_description("Time spent in one pipeline stage")
                .build(),
            job_count: meter
                .u64_counter(JOB_COUNT)
                .with_description("Finished jobs by status")
                .build(),
        }
    }

    /// Record how long `stage` took and whether it succeeded
    pub fn record_stage(&self, stage: &'static str, elapsed: Duration, success: bool) {
        self.stage_duration.record(
            elapsed.as_secs_f64(),
            &[
                KeyValue::new("stage", stage),
                KeyValue::new("outcome", if success { "ok" } else { "error" }),
            ],
        );
    }

    /// Count a finished job
    pub fn record_job(&self, status: &'static str, input_kind: &'static str) {
        self.job_count
            .add(1, &[KeyValue::new("status", status), KeyValue::new("input", input_kind)]);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Record a request duration on the HTTP histogram
pub fn record_http_duration(histogram: &Histogram<f64>, elapsed: Duration, attributes: &[KeyValue]) {
    histogram.record(elapsed.as_secs_f64(), attributes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_provider_is_a_no_op() {
        let metrics = PipelineMetrics::new();
        metrics.record_stage("completion", Duration::from_millis(12), true);
        metrics.record_job("completed", "text");
    }
}

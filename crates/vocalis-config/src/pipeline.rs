use std::time::Duration;

use serde::Deserialize;

/// Orchestration settings shared by every job
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// System instruction prepended to every completion
    pub system_prompt: String,
    /// Upper bound for any single stage, unbounded when unset
    #[serde(default, deserialize_with = "crate::duration::deserialize_opt")]
    pub stage_timeout: Option<Duration>,
}

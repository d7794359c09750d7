use std::time::Duration;

use serde::Deserialize;

use super::exporters::ExporterConfig;

/// Metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// How often the periodic reader pushes metrics
    #[serde(default = "default_interval", deserialize_with = "crate::duration::deserialize")]
    pub export_interval: Duration,
    /// Override the default exporter for metrics
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
}

const fn default_interval() -> Duration {
    Duration::from_secs(30)
}

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, ValueEnum};
use vocalis_telemetry::LogFormat;

/// Vocalis voice assistant worker
#[derive(Debug, Parser)]
#[command(name = "vocalis", about = "Voice assistant job worker: speech in, speech out")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "vocalis.toml", env = "VOCALIS_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOCALIS_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Run a single job given as JSON, print the response and exit
    #[arg(long, value_name = "JSON")]
    pub test_input: Option<String>,

    /// Log filter directives
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log: String,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogStyle::Text, env = "VOCALIS_LOG_FORMAT")]
    pub log_format: LogStyle,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogStyle {
    Text,
    Json,
}

impl From<LogStyle> for LogFormat {
    fn from(style: LogStyle) -> Self {
        match style {
            LogStyle::Text => Self::Text,
            LogStyle::Json => Self::Json,
        }
    }
}

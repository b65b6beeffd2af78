//! Output and logging configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the transcript is written by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// When set, the full transcript page is rewritten here after each exchange.
    pub html_path: Option<PathBuf>,
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` directive scoped to the querydesk crates.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Trace => "querydesk=trace",
            Self::Debug => "querydesk=debug",
            Self::Info => "querydesk=info",
            Self::Warn => "querydesk=warn",
            Self::Error => "querydesk=error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

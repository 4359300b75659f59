use std::io;
use thiserror::Error;

/// Custom error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metric collection failed: {0}")]
    MetricRead(String),

    /// The metric cannot be measured on this host (no sensor, unsupported platform)
    #[error("Metric not available: {0}")]
    Unavailable(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Fatal monitor error: {0}")]
    Fatal(String),
}

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MonitorError::Config(msg.into())
    }

    pub fn metric_read<S: Into<String>>(msg: S) -> Self {
        MonitorError::MetricRead(msg.into())
    }

    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        MonitorError::Unavailable(msg.into())
    }

    pub fn notification<S: Into<String>>(msg: S) -> Self {
        MonitorError::Notification(msg.into())
    }

    pub fn fatal<S: Into<String>>(msg: S) -> Self {
        MonitorError::Fatal(msg.into())
    }

    /// True when the error only means "nothing to measure here"
    pub fn is_unavailable(&self) -> bool {
        matches!(self, MonitorError::Unavailable(_))
    }
}

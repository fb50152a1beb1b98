//! Domain errors for the Turnwatch completion monitor.
//!
//! Observation and dispatch failures are not errors here: the monitor folds
//! them into one of the terminal [`MonitorResult`] values. Only configuration
//! problems and caller-initiated cancellation surface as `Err`.
//!
//! [`MonitorResult`]: crate::domain::models::MonitorResult

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid timeout_ms: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid poll_interval_ms: {0}. Must be positive")]
    InvalidPollInterval(u64),

    #[error("Invalid stability_window_ms: {0}. Must be positive")]
    InvalidStabilityWindow(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Failed to extract configuration: {0}")]
    Extraction(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extraction(err.to_string())
    }
}

/// Errors from a cancellable monitoring run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MonitorError {
    #[error("Monitoring was cancelled by the caller")]
    Cancelled,
}

pub type MonitorOutcome<T> = Result<T, MonitorError>;

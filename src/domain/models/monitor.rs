//! Monitor configuration, terminal results, and run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::errors::ConfigError;

/// Floor applied to the poll interval so an unvalidated zero cannot spin.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Options for one `wait_until_complete` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Overall deadline, measured from call start. A pre-wait that sees no
    /// activity hands the monitoring phase a fresh deadline of the same length.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum unchanged-length duration to count as stable.
    #[serde(default = "default_stability_window_ms")]
    pub stability_window_ms: u64,

    /// Cadence between observations.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Attempt to resume truncated output automatically.
    #[serde(default = "default_true")]
    pub auto_continue: bool,

    /// Retry budget for auto-continue per monitoring session.
    #[serde(default = "default_max_continuation_attempts")]
    pub max_continuation_attempts: u32,

    /// Settle delay after a successful continuation dispatch.
    #[serde(default = "default_continuation_settle_ms")]
    pub continuation_settle_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    120_000
}

const fn default_stability_window_ms() -> u64 {
    2_000
}

const fn default_poll_interval_ms() -> u64 {
    500
}

const fn default_true() -> bool {
    true
}

const fn default_max_continuation_attempts() -> u32 {
    1
}

const fn default_continuation_settle_ms() -> u64 {
    1_500
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            stability_window_ms: default_stability_window_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            auto_continue: default_true(),
            max_continuation_attempts: default_max_continuation_attempts(),
            continuation_settle_ms: default_continuation_settle_ms(),
        }
    }
}

impl MonitorConfig {
    /// Overall deadline.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Stability window.
    pub const fn stability_window(&self) -> Duration {
        Duration::from_millis(self.stability_window_ms)
    }

    /// Poll interval, never shorter than [`MIN_POLL_INTERVAL`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms).max(MIN_POLL_INTERVAL)
    }

    /// Continuation settle delay.
    pub const fn continuation_settle(&self) -> Duration {
        Duration::from_millis(self.continuation_settle_ms)
    }

    /// Reject option combinations the polling loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_ms));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval(self.poll_interval_ms));
        }
        if self.stability_window_ms == 0 {
            return Err(ConfigError::InvalidStabilityWindow(self.stability_window_ms));
        }
        Ok(())
    }
}

/// Terminal outcome of a monitoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorResult {
    /// Generation finished.
    Complete,
    /// Output was truncated and not auto-resolved.
    ContinuationRequired,
    /// The deadline elapsed without a terminal decision.
    TimedOut,
    /// Not a single snapshot could be obtained during the whole call.
    NoSnapshotObserved,
}

impl MonitorResult {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::ContinuationRequired => "continuation_required",
            Self::TimedOut => "timed_out",
            Self::NoSnapshotObserved => "no_snapshot_observed",
        }
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for MonitorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of the monitoring state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorPhase {
    /// Waiting for the first sign that generation has begun.
    AwaitingFirstToken,
    /// Evaluating truncation and quorum on every poll.
    Monitoring,
    /// A terminal result has been reached.
    Finished(MonitorResult),
}

/// Terminal result plus the statistics of the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorReport {
    /// Identifier of this monitoring run (also attached to its tracing span).
    pub run_id: Uuid,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Terminal result.
    pub result: MonitorResult,
    /// Time from call start to the terminal decision.
    pub elapsed_ms: u64,
    /// Snapshot requests issued.
    pub polls: u64,
    /// Snapshot requests that returned a snapshot.
    pub snapshots_observed: u64,
    /// Action dispatcher invocations.
    pub continuation_attempts: u32,
    /// Whether the first-activity pre-wait saw generation begin.
    pub first_activity_seen: bool,
    /// Text length of the last observed snapshot.
    pub final_text_length: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MonitorConfig::default();
        assert_eq!(config.max_continuation_attempts, 1);
        assert!(config.auto_continue);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = MonitorConfig {
            poll_interval_ms: 0,
            ..MonitorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPollInterval(0))
        ));
    }

    #[test]
    fn test_poll_interval_is_floored() {
        let config = MonitorConfig {
            poll_interval_ms: 0,
            ..MonitorConfig::default()
        };
        assert_eq!(config.poll_interval(), MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = MonitorConfig {
            timeout_ms: 0,
            ..MonitorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout(0))));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: MonitorConfig =
            serde_yaml::from_str("timeout_ms: 5000\nauto_continue: false\n").expect("should parse");
        assert_eq!(config.timeout_ms, 5000);
        assert!(!config.auto_continue);
        assert_eq!(config.stability_window_ms, 2_000);
        assert_eq!(config.continuation_settle_ms, 1_500);
    }

    #[test]
    fn test_result_labels() {
        assert_eq!(MonitorResult::Complete.to_string(), "complete");
        assert_eq!(
            MonitorResult::ContinuationRequired.as_str(),
            "continuation_required"
        );
        assert!(!MonitorResult::TimedOut.is_complete());
    }
}

//! Common test utilities for integration tests
//!
//! Provides shared fixtures for driving the completion monitor with scripted
//! sessions on a paused tokio clock.

use std::sync::Arc;

use turnwatch::adapters::scripted::{ScriptFrame, ScriptedSession, SessionScript};
use turnwatch::{CompletionMonitor, MonitorConfig, TurnSnapshot};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Monitor options with a short settle delay for fast scenarios.
#[allow(dead_code)]
pub fn config(timeout_ms: u64, stability_window_ms: u64, poll_interval_ms: u64) -> MonitorConfig {
    MonitorConfig {
        timeout_ms,
        stability_window_ms,
        poll_interval_ms,
        continuation_settle_ms: 200,
        ..MonitorConfig::default()
    }
}

/// Streaming frames every `step_ms` from `0` up to (excluding) `until_ms`,
/// with the length growing linearly to reach `final_len` at `until_ms`.
#[allow(dead_code)]
pub fn growth_frames(until_ms: u64, step_ms: u64, final_len: usize) -> Vec<ScriptFrame> {
    let steps = until_ms / step_ms;
    (0..steps)
        .map(|step| {
            let length = usize::try_from(step).unwrap() * final_len / usize::try_from(steps).unwrap();
            ScriptFrame::at(
                step * step_ms,
                TurnSnapshot::with_length(length).streaming(true),
            )
        })
        .collect()
}

/// A monitor wired to a single scripted session for all three ports.
#[allow(dead_code)]
pub fn scripted_monitor(script: SessionScript) -> (CompletionMonitor, Arc<ScriptedSession>) {
    let session = Arc::new(ScriptedSession::new(script));
    let monitor = CompletionMonitor::new(session.clone(), session.clone(), session.clone());
    (monitor, session)
}

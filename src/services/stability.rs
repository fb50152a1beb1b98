//! Stability tracking for the observed text length.
//!
//! A length is stable once it has been unchanged for at least the configured
//! window. Any change, including a single-character flicker, restarts the
//! window; there is no hysteresis. A length that stays at zero is "stable at
//! zero" here; the quorum vote is what refuses to trust that.

use std::time::Duration;
use tokio::time::Instant;

/// Result of folding one observation into the tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityVerdict {
    /// Time of the most recent length change.
    pub last_change: Instant,
    /// The length has been unchanged for at least the window.
    pub is_stable: bool,
}

/// Pure stability step.
///
/// `previous` is the length recorded on the prior observation, `None` before
/// the first one. A differing length (or the very first observation) resets
/// `last_change` to `now` and is never stable on that step.
pub fn advance(
    previous: Option<usize>,
    current: usize,
    last_change: Instant,
    now: Instant,
    window: Duration,
) -> StabilityVerdict {
    if previous != Some(current) {
        return StabilityVerdict {
            last_change: now,
            is_stable: false,
        };
    }

    StabilityVerdict {
        last_change,
        is_stable: now.saturating_duration_since(last_change) >= window,
    }
}

/// Owned stability state for one monitoring session.
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    window: Duration,
    previous: Option<usize>,
    last_change: Instant,
}

impl StabilityTracker {
    pub const fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            previous: None,
            last_change: now,
        }
    }

    /// Record an observed length and report whether it is stable.
    pub fn observe(&mut self, length: usize, now: Instant) -> bool {
        let verdict = advance(self.previous, length, self.last_change, now, self.window);
        self.previous = Some(length);
        self.last_change = verdict.last_change;
        verdict.is_stable
    }

    /// Forget the previous length and start a fresh baseline at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.previous = None;
        self.last_change = now;
    }

    pub const fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub const fn last_change(&self) -> Instant {
        self.last_change
    }
}

/// Domain model for a single observation of the monitored turn.
///
/// A snapshot is produced fresh by the [`SnapshotProvider`] on every poll and
/// discarded once it has been folded into the stability tracker and the
/// quorum vote.
///
/// [`SnapshotProvider`]: crate::domain::ports::SnapshotProvider
use serde::{Deserialize, Serialize};

/// Point-in-time, read-only view of the most recent generation turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TurnSnapshot {
    /// Correlation identifier of the turn, if the surface exposes one.
    ///
    /// Only ever compared across polls, never dereferenced.
    #[serde(default)]
    pub turn_id: Option<String>,

    /// Length (in characters) of the visible text of the turn.
    #[serde(default)]
    pub text_length: usize,

    /// Whether the turn currently contains a code block.
    #[serde(default)]
    pub has_code: bool,

    /// A "generation in progress" affordance is visible.
    #[serde(default)]
    pub streaming: bool,

    /// A "generation finished, can retry" affordance is visible.
    #[serde(default)]
    pub regenerate_available: bool,

    /// A "output was truncated, can resume" affordance is visible.
    #[serde(default)]
    pub continuation_available: bool,
}

impl TurnSnapshot {
    /// Snapshot with only a text length set; everything else defaults.
    pub fn with_length(text_length: usize) -> Self {
        Self {
            text_length,
            ..Self::default()
        }
    }

    /// Builder-style setter for the turn identifier.
    pub fn turn(mut self, turn_id: impl Into<String>) -> Self {
        self.turn_id = Some(turn_id.into());
        self
    }

    /// Builder-style setter for the streaming affordance.
    pub fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Builder-style setter for the regenerate affordance.
    pub fn regenerate(mut self, available: bool) -> Self {
        self.regenerate_available = available;
        self
    }

    /// Builder-style setter for the continuation affordance.
    pub fn continuation(mut self, available: bool) -> Self {
        self.continuation_available = available;
        self
    }

    /// Builder-style setter for the code-block flag.
    pub fn code(mut self, has_code: bool) -> Self {
        self.has_code = has_code;
        self
    }

    /// Generation has visibly started: either text exists or the stream is live.
    pub const fn shows_activity(&self) -> bool {
        self.text_length > 0 || self.streaming
    }

    /// Truncation can only be acted on once the stream has stopped.
    pub const fn truncation_actionable(&self) -> bool {
        self.continuation_available && !self.streaming
    }
}

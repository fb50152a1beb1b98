//! Quorum vote over the three independent completion signals.
//!
//! Each signal alone is unreliable: the stop affordance can vanish during a
//! re-render, the regenerate affordance can show up early, and the text can
//! plateau mid-generation. Generation is finished when at least
//! [`QUORUM_THRESHOLD`] of the three agree.

use serde::Serialize;

use crate::domain::models::TurnSnapshot;

/// Number of agreeing signals required to declare completion.
pub const QUORUM_THRESHOLD: usize = 2;

/// The three signals for a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuorumVote {
    /// No "generation in progress" affordance is visible.
    pub not_streaming: bool,
    /// The "regenerate" affordance is visible.
    pub regenerate_available: bool,
    /// Text exists and its length is stable.
    pub stable_with_text: bool,
}

impl QuorumVote {
    /// Tally the signals of `snapshot` with the stability verdict for its length.
    pub const fn tally(snapshot: &TurnSnapshot, is_stable: bool) -> Self {
        Self {
            not_streaming: !snapshot.streaming,
            regenerate_available: snapshot.regenerate_available,
            stable_with_text: is_stable && snapshot.text_length > 0,
        }
    }

    /// Number of signals voting "finished".
    pub fn votes(&self) -> usize {
        [
            self.not_streaming,
            self.regenerate_available,
            self.stable_with_text,
        ]
        .into_iter()
        .filter(|&signal| signal)
        .count()
    }

    pub fn is_finished(&self) -> bool {
        self.votes() >= QUORUM_THRESHOLD
    }
}

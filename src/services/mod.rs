//! Decision engine: stability tracking, quorum voting, continuation handling
//! and the completion monitor that composes them.

pub mod completion_monitor;
pub mod continuation;
pub mod final_text;
pub mod quorum;
pub mod stability;
pub mod timing;

pub use completion_monitor::{CompletionMonitor, FIRST_ACTIVITY_WINDOW};
pub use continuation::{ContinuationDecision, ContinuationGovernor, RequiredReason};
pub use final_text::FinalTextExtractor;
pub use quorum::{QuorumVote, QUORUM_THRESHOLD};
pub use stability::{advance, StabilityTracker, StabilityVerdict};

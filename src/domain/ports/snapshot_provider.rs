//! Snapshot provider port - observation of the monitored surface.

use async_trait::async_trait;

use crate::domain::models::TurnSnapshot;

/// Produces point-in-time observations of the most recent turn.
///
/// Implementations must be fast and must not mutate the observed surface.
/// The monitor issues at most one request at a time.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Observe the current state of the latest turn.
    ///
    /// `None` means "could not observe right now", never "no turn exists".
    async fn take_snapshot(&self) -> Option<TurnSnapshot>;
}

//! Action dispatcher port - the single continuation action.

use async_trait::async_trait;

/// Triggers the "resume truncated generation" affordance.
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Attempt the continuation action once.
    ///
    /// Returns `false` when there was nothing to click or the click failed.
    /// The ordinary "not found" case must not panic.
    async fn try_continue(&self) -> bool;
}

//! Full-text reader port.

use async_trait::async_trait;

/// Reads the complete visible text of the most recent turn.
#[async_trait]
pub trait FullTextReader: Send + Sync {
    /// `None` when the text cannot be read right now.
    async fn read_latest_text(&self) -> Option<String>;
}

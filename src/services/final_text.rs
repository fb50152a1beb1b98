//! Final text extraction.

use std::sync::Arc;
use tracing::debug;

use crate::domain::ports::FullTextReader;

/// Single best-effort read of the finished turn text.
///
/// Not a retry loop: callers needing retries wrap [`extract`](Self::extract)
/// in their own loop.
pub struct FinalTextExtractor {
    reader: Arc<dyn FullTextReader>,
}

impl FinalTextExtractor {
    pub fn new(reader: Arc<dyn FullTextReader>) -> Self {
        Self { reader }
    }

    /// Return the latest turn text if it has at least `min_len` characters.
    pub async fn extract(&self, min_len: usize) -> Option<String> {
        let text = self.reader.read_latest_text().await?;
        let length = text.chars().count();
        if length < min_len {
            debug!(length, min_len, "Final text shorter than required minimum");
            return None;
        }
        Some(text)
    }
}

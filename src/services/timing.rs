//! Cancellable suspension points shared by the monitor and the governor.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::{MonitorError, MonitorOutcome};

/// Sleep for `duration` unless `cancel` fires first.
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> MonitorOutcome<()> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(MonitorError::Cancelled),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Clamp `wanted` so the sleep never runs past `deadline`.
pub fn clamp_to_deadline(wanted: Duration, deadline: Instant) -> Duration {
    wanted.min(deadline.saturating_duration_since(Instant::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_full_duration() {
        let token = CancellationToken::new();
        let start = Instant::now();
        pause(Duration::from_millis(250), &token)
            .await
            .expect("uncancelled pause should succeed");
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_returns_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let start = Instant::now();
        assert_eq!(
            pause(Duration::from_secs(60), &token).await,
            Err(MonitorError::Cancelled)
        );
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clamp_to_deadline() {
        let deadline = Instant::now() + Duration::from_millis(40);
        assert_eq!(
            clamp_to_deadline(Duration::from_millis(100), deadline),
            Duration::from_millis(40)
        );
        assert_eq!(
            clamp_to_deadline(Duration::from_millis(10), deadline),
            Duration::from_millis(10)
        );
        tokio::time::advance(Duration::from_millis(50)).await;
        assert_eq!(
            clamp_to_deadline(Duration::from_millis(10), deadline),
            Duration::ZERO
        );
    }
}

//! Continuation governor for truncated generations.
//!
//! Invoked only when a snapshot shows the continuation affordance and the
//! stream has visibly stopped. Each detected truncation event gets at most one
//! dispatch; across a monitoring session the dispatcher is called at most
//! `max_continuation_attempts` times.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::errors::MonitorOutcome;
use crate::domain::models::MonitorConfig;
use crate::domain::ports::ActionDispatcher;

use super::stability::StabilityTracker;
use super::timing::{clamp_to_deadline, pause};

/// Why a truncation is surfaced to the caller instead of resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredReason {
    AutoContinueDisabled,
    BudgetExhausted,
    DispatchFailed,
}

impl RequiredReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AutoContinueDisabled => "auto_continue_disabled",
            Self::BudgetExhausted => "budget_exhausted",
            Self::DispatchFailed => "dispatch_failed",
        }
    }
}

/// Outcome of handling one truncation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationDecision {
    /// The resume action fired; polling restarts from a fresh baseline.
    Resumed,
    /// Terminal: the caller must resolve the truncation.
    Required(RequiredReason),
}

/// Bounded-retry recovery path for truncated output.
pub struct ContinuationGovernor {
    dispatcher: Arc<dyn ActionDispatcher>,
    auto_continue: bool,
    max_attempts: u32,
    settle: Duration,
    attempts: u32,
}

impl ContinuationGovernor {
    pub fn new(dispatcher: Arc<dyn ActionDispatcher>, config: &MonitorConfig) -> Self {
        Self {
            dispatcher,
            auto_continue: config.auto_continue,
            max_attempts: config.max_continuation_attempts,
            settle: config.continuation_settle(),
            attempts: 0,
        }
    }

    /// Dispatcher invocations so far in this session.
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Handle one detected truncation event.
    ///
    /// On a successful dispatch the tracker is reset before the settle delay,
    /// so the resumed text is measured against a new window rather than
    /// extending the old one. The settle delay never runs past `deadline`.
    pub async fn handle_truncation(
        &mut self,
        tracker: &mut StabilityTracker,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> MonitorOutcome<ContinuationDecision> {
        if !self.auto_continue {
            info!("Truncation detected with auto-continue disabled");
            return Ok(ContinuationDecision::Required(
                RequiredReason::AutoContinueDisabled,
            ));
        }

        if self.attempts >= self.max_attempts {
            warn!(
                attempts = self.attempts,
                max_attempts = self.max_attempts,
                "Truncation detected but continuation budget is exhausted"
            );
            return Ok(ContinuationDecision::Required(RequiredReason::BudgetExhausted));
        }

        self.attempts += 1;
        if !self.dispatcher.try_continue().await {
            warn!(attempt = self.attempts, "Continuation dispatch failed");
            return Ok(ContinuationDecision::Required(RequiredReason::DispatchFailed));
        }

        tracker.reset(Instant::now());
        info!(
            attempt = self.attempts,
            max_attempts = self.max_attempts,
            settle_ms = self.settle.as_millis(),
            "Continuation dispatched, resuming monitoring from a fresh baseline"
        );
        pause(clamp_to_deadline(self.settle, deadline), cancel).await?;

        Ok(ContinuationDecision::Resumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingDispatcher {
        succeed: bool,
        calls: AtomicU32,
    }

    impl CountingDispatcher {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                succeed,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ActionDispatcher for CountingDispatcher {
        async fn try_continue(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.succeed
        }
    }

    fn config(auto_continue: bool, max_continuation_attempts: u32) -> MonitorConfig {
        MonitorConfig {
            auto_continue,
            max_continuation_attempts,
            continuation_settle_ms: 500,
            ..MonitorConfig::default()
        }
    }

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(600)
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_dispatch_resets_tracker_and_settles() {
        let dispatcher = CountingDispatcher::new(true);
        let mut governor = ContinuationGovernor::new(dispatcher.clone(), &config(true, 1));
        let mut tracker = StabilityTracker::new(Duration::from_secs(1), Instant::now());
        tracker.observe(400, Instant::now());

        let start = Instant::now();
        let decision = governor
            .handle_truncation(&mut tracker, far_deadline(), &CancellationToken::new())
            .await
            .expect("not cancelled");

        assert_eq!(decision, ContinuationDecision::Resumed);
        assert_eq!(dispatcher.calls(), 1);
        assert_eq!(governor.attempts(), 1);
        assert_eq!(tracker.previous(), None);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_dispatch_is_terminal_without_retry() {
        let dispatcher = CountingDispatcher::new(false);
        let mut governor = ContinuationGovernor::new(dispatcher.clone(), &config(true, 3));
        let mut tracker = StabilityTracker::new(Duration::from_secs(1), Instant::now());

        let decision = governor
            .handle_truncation(&mut tracker, far_deadline(), &CancellationToken::new())
            .await
            .expect("not cancelled");

        assert_eq!(
            decision,
            ContinuationDecision::Required(RequiredReason::DispatchFailed)
        );
        assert_eq!(dispatcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhausted_after_max_attempts() {
        let dispatcher = CountingDispatcher::new(true);
        let mut governor = ContinuationGovernor::new(dispatcher.clone(), &config(true, 2));
        let mut tracker = StabilityTracker::new(Duration::from_secs(1), Instant::now());
        let token = CancellationToken::new();

        for _ in 0..2 {
            assert_eq!(
                governor
                    .handle_truncation(&mut tracker, far_deadline(), &token)
                    .await,
                Ok(ContinuationDecision::Resumed)
            );
        }
        assert_eq!(
            governor
                .handle_truncation(&mut tracker, far_deadline(), &token)
                .await,
            Ok(ContinuationDecision::Required(RequiredReason::BudgetExhausted))
        );
        assert_eq!(dispatcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_continue_disabled_never_dispatches() {
        let dispatcher = CountingDispatcher::new(true);
        let mut governor = ContinuationGovernor::new(dispatcher.clone(), &config(false, 5));
        let mut tracker = StabilityTracker::new(Duration::from_secs(1), Instant::now());

        let decision = governor
            .handle_truncation(&mut tracker, far_deadline(), &CancellationToken::new())
            .await;

        assert_eq!(
            decision,
            Ok(ContinuationDecision::Required(
                RequiredReason::AutoContinueDisabled
            ))
        );
        assert_eq!(dispatcher.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_delay_clamped_to_deadline() {
        let dispatcher = CountingDispatcher::new(true);
        let mut governor = ContinuationGovernor::new(dispatcher, &config(true, 1));
        let mut tracker = StabilityTracker::new(Duration::from_secs(1), Instant::now());
        let start = Instant::now();
        let deadline = start + Duration::from_millis(200);

        governor
            .handle_truncation(&mut tracker, deadline, &CancellationToken::new())
            .await
            .expect("not cancelled");

        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }
}

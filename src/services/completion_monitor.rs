//! Completion monitor: decides when an externally generated turn has
//! actually finished.
//!
//! The monitor is a single cooperative polling task. It moves through
//! [`MonitorPhase::AwaitingFirstToken`] and [`MonitorPhase::Monitoring`] into
//! one of four terminal results. Snapshots are strictly sequential and every
//! suspension point (poll waits and the continuation settle delay) races the
//! caller's [`CancellationToken`].
//!
//! Per iteration of the monitoring phase, truncation handling always runs
//! before the quorum check: a regenerate affordance can coexist with a
//! truncated response, so such a snapshot is recoverable, not complete.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn, Instrument};
use uuid::Uuid;

use crate::domain::errors::{MonitorError, MonitorOutcome};
use crate::domain::models::{
    MonitorConfig, MonitorPhase, MonitorReport, MonitorResult, TurnSnapshot,
};
use crate::domain::ports::{ActionDispatcher, FullTextReader, SnapshotProvider};

use super::continuation::{ContinuationDecision, ContinuationGovernor};
use super::final_text::FinalTextExtractor;
use super::quorum::QuorumVote;
use super::stability::StabilityTracker;
use super::timing::{clamp_to_deadline, pause};

/// Upper bound of the pre-wait for first activity.
pub const FIRST_ACTIVITY_WINDOW: Duration = Duration::from_millis(12_000);

/// Counters accumulated over one call.
#[derive(Debug, Default)]
struct RunStats {
    polls: u64,
    snapshots_observed: u64,
    first_activity_seen: bool,
    final_text_length: Option<usize>,
}

impl RunStats {
    fn record(&mut self, snapshot: Option<&TurnSnapshot>) {
        self.polls += 1;
        if let Some(snapshot) = snapshot {
            self.snapshots_observed += 1;
            self.final_text_length = Some(snapshot.text_length);
        }
    }
}

/// Heuristic state machine over a snapshot provider, a full-text reader and
/// an action dispatcher.
///
/// One instance assumes exclusive use of its collaborators for the duration
/// of a call; running two monitors against the same session is unsupported.
pub struct CompletionMonitor {
    provider: Arc<dyn SnapshotProvider>,
    dispatcher: Arc<dyn ActionDispatcher>,
    extractor: FinalTextExtractor,
    /// Turn id of the last turn this monitor declared complete.
    last_turn_id: Option<String>,
}

impl CompletionMonitor {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        reader: Arc<dyn FullTextReader>,
        dispatcher: Arc<dyn ActionDispatcher>,
    ) -> Self {
        Self {
            provider,
            dispatcher,
            extractor: FinalTextExtractor::new(reader),
            last_turn_id: None,
        }
    }

    /// Turn id remembered from the last `Complete` result.
    pub fn last_turn_id(&self) -> Option<&str> {
        self.last_turn_id.as_deref()
    }

    /// Block until the latest turn reaches a terminal result.
    ///
    /// Never fails: every observation or dispatch problem resolves to one of
    /// the four [`MonitorResult`] values. The pre-wait is bounded by
    /// [`FIRST_ACTIVITY_WINDOW`]; when it sees no activity the monitoring
    /// phase still runs for a full `timeout_ms`.
    pub async fn wait_until_complete(&mut self, config: &MonitorConfig) -> MonitorResult {
        // Nobody else holds this token, so the run cannot be cancelled.
        let token = CancellationToken::new();
        match self.watch(config, &token).await {
            Ok(report) => report.result,
            // Unreachable: this token is never cancelled.
            Err(MonitorError::Cancelled) => MonitorResult::TimedOut,
        }
    }

    /// Same algorithm as [`wait_until_complete`](Self::wait_until_complete),
    /// returning the full run report and stopping early when `cancel` fires.
    pub async fn watch(
        &mut self,
        config: &MonitorConfig,
        cancel: &CancellationToken,
    ) -> MonitorOutcome<MonitorReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("monitor", %run_id);
        self.run(run_id, config, cancel).instrument(span).await
    }

    /// Read the finished text once; `None` if unreadable or shorter than `min_len`.
    pub async fn extract_final_text(&self, min_len: usize) -> Option<String> {
        self.extractor.extract(min_len).await
    }

    async fn run(
        &mut self,
        run_id: Uuid,
        config: &MonitorConfig,
        cancel: &CancellationToken,
    ) -> MonitorOutcome<MonitorReport> {
        let started = Instant::now();
        let started_at = Utc::now();
        let mut deadline = started + config.timeout();
        let mut stats = RunStats::default();
        let mut governor = ContinuationGovernor::new(self.dispatcher.clone(), config);

        info!(
            timeout_ms = config.timeout_ms,
            stability_window_ms = config.stability_window_ms,
            poll_interval_ms = config.poll_interval_ms,
            auto_continue = config.auto_continue,
            "Completion monitor started"
        );

        let mut phase = MonitorPhase::AwaitingFirstToken;
        let result = loop {
            phase = match phase {
                MonitorPhase::AwaitingFirstToken => {
                    let seen = self
                        .await_first_activity(config, started, cancel, &mut stats)
                        .await?;
                    stats.first_activity_seen = seen;
                    if !seen {
                        // A miss must not starve the monitoring phase.
                        deadline = Instant::now() + config.timeout();
                        warn!(
                            timeout_ms = config.timeout_ms,
                            "No generation activity observed during pre-wait, monitoring with a fresh deadline"
                        );
                    }
                    MonitorPhase::Monitoring
                }
                MonitorPhase::Monitoring => MonitorPhase::Finished(
                    self.monitor(config, deadline, cancel, &mut governor, &mut stats)
                        .await?,
                ),
                MonitorPhase::Finished(result) => break result,
            };
            debug!(phase = ?phase, "Monitor phase transition");
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            result = %result,
            elapsed_ms,
            polls = stats.polls,
            snapshots_observed = stats.snapshots_observed,
            continuation_attempts = governor.attempts(),
            "Completion monitor finished"
        );

        Ok(MonitorReport {
            run_id,
            started_at,
            result,
            elapsed_ms,
            polls: stats.polls,
            snapshots_observed: stats.snapshots_observed,
            continuation_attempts: governor.attempts(),
            first_activity_seen: stats.first_activity_seen,
            final_text_length: stats.final_text_length,
        })
    }

    /// Poll until generation visibly begins or the pre-wait window closes.
    async fn await_first_activity(
        &self,
        config: &MonitorConfig,
        started: Instant,
        cancel: &CancellationToken,
        stats: &mut RunStats,
    ) -> MonitorOutcome<bool> {
        let window_end = started + FIRST_ACTIVITY_WINDOW.min(config.timeout());

        loop {
            let snapshot = self.provider.take_snapshot().await;
            stats.record(snapshot.as_ref());

            if let Some(snapshot) = snapshot {
                if snapshot.shows_activity() && !self.is_previous_turn(&snapshot) {
                    debug!(
                        text_length = snapshot.text_length,
                        streaming = snapshot.streaming,
                        "First activity observed"
                    );
                    return Ok(true);
                }
            }

            if Instant::now() >= window_end {
                return Ok(false);
            }
            pause(clamp_to_deadline(config.poll_interval(), window_end), cancel).await?;
        }
    }

    /// A finished turn this monitor already reported, still on screen.
    fn is_previous_turn(&self, snapshot: &TurnSnapshot) -> bool {
        !snapshot.streaming
            && snapshot.turn_id.is_some()
            && snapshot.turn_id == self.last_turn_id
    }

    async fn monitor(
        &mut self,
        config: &MonitorConfig,
        deadline: Instant,
        cancel: &CancellationToken,
        governor: &mut ContinuationGovernor,
        stats: &mut RunStats,
    ) -> MonitorOutcome<MonitorResult> {
        let mut tracker = StabilityTracker::new(config.stability_window(), Instant::now());
        let mut observed_turn: Option<String> = None;

        while Instant::now() < deadline {
            let snapshot = self.provider.take_snapshot().await;
            stats.record(snapshot.as_ref());

            let Some(snapshot) = snapshot else {
                trace!("Snapshot unavailable, retrying next poll");
                pause(clamp_to_deadline(config.poll_interval(), deadline), cancel).await?;
                continue;
            };

            let now = Instant::now();
            if let Some(turn_id) = snapshot.turn_id.as_deref() {
                if observed_turn.as_deref().is_some_and(|seen| seen != turn_id) {
                    debug!(turn_id, "New turn replaced the observed one, resetting stability");
                    tracker.reset(now);
                }
                observed_turn = Some(turn_id.to_string());
            }
            let is_stable = tracker.observe(snapshot.text_length, now);

            if snapshot.truncation_actionable() {
                match governor.handle_truncation(&mut tracker, deadline, cancel).await? {
                    ContinuationDecision::Resumed => continue,
                    ContinuationDecision::Required(reason) => {
                        info!(reason = reason.as_str(), "Truncated output requires continuation");
                        return Ok(MonitorResult::ContinuationRequired);
                    }
                }
            }

            let vote = QuorumVote::tally(&snapshot, is_stable);
            trace!(
                text_length = snapshot.text_length,
                not_streaming = vote.not_streaming,
                regenerate_available = vote.regenerate_available,
                stable_with_text = vote.stable_with_text,
                votes = vote.votes(),
                unchanged_ms = now.saturating_duration_since(tracker.last_change()).as_millis(),
                "Quorum tallied"
            );
            if vote.is_finished() {
                self.last_turn_id = snapshot.turn_id;
                return Ok(MonitorResult::Complete);
            }

            pause(clamp_to_deadline(config.poll_interval(), deadline), cancel).await?;
        }

        if stats.snapshots_observed == 0 {
            Ok(MonitorResult::NoSnapshotObserved)
        } else {
            Ok(MonitorResult::TimedOut)
        }
    }
}

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

use crate::domain::models::TurnSnapshot;
use crate::domain::ports::{ActionDispatcher, FullTextReader, SnapshotProvider};

use super::script::SessionScript;

/// Plays a [`SessionScript`] back against the monitor's ports.
///
/// The timeline starts when the session is created and follows `tokio::time`,
/// so a paused test clock drives it deterministically.
pub struct ScriptedSession {
    script: SessionScript,
    started: Instant,
    outcomes: Mutex<std::vec::IntoIter<bool>>,
    successful_continuations: AtomicU32,
    dispatch_calls: AtomicU32,
    snapshot_calls: AtomicU64,
}

impl ScriptedSession {
    pub fn new(script: SessionScript) -> Self {
        let outcomes = script.dispatch_outcomes.clone().into_iter();
        Self {
            script,
            started: Instant::now(),
            outcomes: Mutex::new(outcomes),
            successful_continuations: AtomicU32::new(0),
            dispatch_calls: AtomicU32::new(0),
            snapshot_calls: AtomicU64::new(0),
        }
    }

    /// Number of `try_continue` invocations so far.
    pub fn dispatch_calls(&self) -> u32 {
        self.dispatch_calls.load(Ordering::SeqCst)
    }

    /// Number of `take_snapshot` invocations so far.
    pub fn snapshot_calls(&self) -> u64 {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn continuations(&self) -> u32 {
        self.successful_continuations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotProvider for ScriptedSession {
    async fn take_snapshot(&self) -> Option<TurnSnapshot> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        let elapsed_ms = self.elapsed_ms();
        let snapshot = self
            .script
            .frame_at(elapsed_ms, self.continuations())
            .and_then(|frame| frame.snapshot.clone());
        trace!(elapsed_ms, observed = snapshot.is_some(), "Scripted snapshot");
        snapshot
    }
}

#[async_trait]
impl FullTextReader for ScriptedSession {
    async fn read_latest_text(&self) -> Option<String> {
        let elapsed_ms = self.elapsed_ms();
        self.script
            .text_at(elapsed_ms, self.continuations())
            .map(str::to_string)
    }
}

#[async_trait]
impl ActionDispatcher for ScriptedSession {
    async fn try_continue(&self) -> bool {
        self.dispatch_calls.fetch_add(1, Ordering::SeqCst);
        let succeeded = self.outcomes.lock().await.next().unwrap_or(false);
        if succeeded {
            self.successful_continuations.fetch_add(1, Ordering::SeqCst);
        }
        trace!(succeeded, "Scripted continuation dispatch");
        succeeded
    }
}

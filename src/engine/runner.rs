//! Countdown runner: the single task that owns the timer engine.
//!
//! Intents from the control surface and scheduled ticks are serialized
//! through one `select!` loop, so every transition commits before the next
//! one starts. After each commit the tick scheduler is re-synchronized and a
//! fresh [`Snapshot`] is published for renderers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::scheduler::TickScheduler;
use super::timer::{TickOutcome, TimerEngine, TimerEvent};
use crate::types::{clamp_duration, CountdownConfig, Snapshot};

// ============================================================================
// Intent
// ============================================================================

/// User intents forwarded by the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The configured duration changed (clamped before use)
    SetDuration(u64),
    /// Move the configured duration by a signed amount (clamped before use)
    StepDuration(i64),
    /// Start or pause
    Toggle,
    /// Restore the configured duration, honoring the reset policy
    Reset,
    /// Flip the reset policy
    TogglePauseOnReset,
}

// ============================================================================
// RunnerHandle
// ============================================================================

/// Handle used by the control surface to drive a running countdown.
///
/// Dropping every handle unmounts the countdown: the pending tick is
/// cancelled and the runner task ends.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    intent_tx: mpsc::UnboundedSender<Intent>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl RunnerHandle {
    /// Forwards an intent to the runner.
    ///
    /// # Errors
    ///
    /// Returns an error if the runner has stopped.
    pub fn send(&self, intent: Intent) -> Result<()> {
        self.intent_tx
            .send(intent)
            .context("countdown runner is no longer running")
    }

    /// Returns the latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        *self.snapshot_rx.borrow()
    }

    /// Returns a receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }
}

// ============================================================================
// CountdownRunner
// ============================================================================

/// Owns the engine, the tick scheduler and the caller-side settings.
pub struct CountdownRunner {
    engine: TimerEngine,
    scheduler: TickScheduler,
    /// Configured duration (already clamped)
    total_ms: u64,
    pause_on_reset: bool,
    complete: Arc<AtomicBool>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl CountdownRunner {
    /// Creates a runner and synchronizes the countdown to the configured
    /// duration, the way mounting the widget does.
    pub fn new(config: CountdownConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let total_ms = clamp_duration(config.duration_ms);
        let mut engine = TimerEngine::new(total_ms, event_tx);
        let complete = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&complete);
        engine.set_on_complete(move || flag.store(true, Ordering::SeqCst));
        engine.set_total(total_ms);

        let snapshot = Snapshot::new(engine.state(), total_ms, config.pause_on_reset, false);
        let (snapshot_tx, _) = watch::channel(snapshot);

        Self {
            engine,
            scheduler: TickScheduler::new(config.cadence),
            total_ms,
            pause_on_reset: config.pause_on_reset,
            complete,
            snapshot_tx,
        }
    }

    /// Adds a completion callback, run once when the countdown finishes.
    pub fn with_on_complete(mut self, mut hook: impl FnMut() + Send + 'static) -> Self {
        let flag = Arc::clone(&self.complete);
        self.engine.set_on_complete(move || {
            flag.store(true, Ordering::SeqCst);
            hook();
        });
        self
    }

    /// Spawns the runner on the current tokio runtime.
    pub fn spawn(self) -> (RunnerHandle, JoinHandle<()>) {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let handle = RunnerHandle {
            intent_tx,
            snapshot_rx: self.snapshot_tx.subscribe(),
        };
        let task = tokio::spawn(self.run(intent_rx));
        (handle, task)
    }

    /// Runs until every intent sender is dropped.
    pub async fn run(mut self, mut intents: mpsc::UnboundedReceiver<Intent>) {
        tracing::info!(
            total_ms = self.total_ms,
            pause_on_reset = self.pause_on_reset,
            cadence = self.scheduler.cadence().as_str(),
            "countdown mounted"
        );

        loop {
            self.scheduler.sync(self.engine.watched());

            tokio::select! {
                biased;
                intent = intents.recv() => match intent {
                    Some(intent) => self.apply(intent),
                    None => break,
                },
                () = self.scheduler.fired() => {
                    if self.engine.tick() == TickOutcome::Completed {
                        tracing::info!("completion notified");
                    }
                }
            }

            self.publish();
        }

        self.scheduler.cancel();
        tracing::info!("countdown unmounted");
    }

    fn apply(&mut self, intent: Intent) {
        if self.is_complete() {
            tracing::debug!(?intent, "ignoring intent after completion");
            return;
        }

        match intent {
            Intent::SetDuration(ms) => self.change_total(ms),
            Intent::StepDuration(delta) => {
                self.change_total(self.total_ms.saturating_add_signed(delta))
            }
            Intent::Toggle => self.engine.toggle(),
            Intent::Reset => self.engine.reset(self.total_ms, self.pause_on_reset),
            Intent::TogglePauseOnReset => {
                self.pause_on_reset = !self.pause_on_reset;
                tracing::debug!(pause_on_reset = self.pause_on_reset, "reset policy changed");
            }
        }
    }

    fn change_total(&mut self, ms: u64) {
        let total_ms = clamp_duration(ms);
        if total_ms != self.total_ms {
            self.total_ms = total_ms;
            self.engine.set_total(total_ms);
        }
    }

    fn is_complete(&self) -> bool {
        self.complete.load(Ordering::SeqCst)
    }

    fn publish(&self) {
        let next = Snapshot::new(
            self.engine.state(),
            self.total_ms,
            self.pause_on_reset,
            self.is_complete(),
        );
        self.snapshot_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Timer engine for the countdown.
//!
//! This module provides the countdown state machine:
//! - Duration sync, toggle, reset and tick transitions
//! - Completion notification through a replaceable hook
//! - Event firing for renderers and logging

use tokio::sync::mpsc;

use crate::types::{TimerState, TICK_MS};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for renderers and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Remaining time was re-synchronized to the configured duration
    DurationSynced {
        /// New remaining time
        remaining_ms: u64,
    },
    /// The active flag was flipped
    Toggled {
        /// Active flag after the flip
        is_active: bool,
    },
    /// The countdown was reset
    Reset {
        /// Remaining time after the reset
        remaining_ms: u64,
        /// Active flag after the reset
        is_active: bool,
    },
    /// One second elapsed
    Tick {
        /// Remaining time after the tick
        remaining_ms: u64,
    },
    /// The countdown reached zero
    Completed,
}

// ============================================================================
// TickOutcome
// ============================================================================

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was paused; nothing changed.
    Idle,
    /// Remaining time went down by one tick.
    Decremented,
    /// The countdown finished and the completion hook fired.
    Completed,
}

/// Completion callback invoked once per finished countdown.
pub type CompletionHook = Box<dyn FnMut() + Send>;

/// The values whose change forces the tick driver to be re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchedDeps {
    /// Whether the countdown is advancing
    pub is_active: bool,
    /// Remaining time
    pub remaining_ms: u64,
    /// Configured duration
    pub total_ms: u64,
    /// Identity of the current completion hook
    pub hook_epoch: u64,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Countdown state machine.
///
/// All transitions are total: none of them can fail. The configured duration
/// (`total_ms`) is owned by the caller and must already be clamped.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Configured duration, restored on completion
    total_ms: u64,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Completion callback
    on_complete: Option<CompletionHook>,
    /// Bumped whenever `on_complete` is replaced
    hook_epoch: u64,
}

impl TimerEngine {
    /// Creates a TimerEngine with `remaining_ms = 0` and the timer paused.
    ///
    /// The caller is expected to sync the duration right after construction,
    /// see [`TimerEngine::set_total`].
    pub fn new(total_ms: u64, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(),
            total_ms,
            event_tx,
            on_complete: None,
            hook_epoch: 0,
        }
    }

    /// Replaces the completion hook.
    pub fn set_on_complete(&mut self, hook: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(hook));
        self.hook_epoch += 1;
    }

    /// Updates the configured duration and re-synchronizes the countdown to it.
    pub fn set_total(&mut self, total_ms: u64) {
        self.total_ms = total_ms;
        self.set_duration(total_ms);
    }

    /// Sets the remaining time, leaving the active flag untouched.
    pub fn set_duration(&mut self, ms: u64) {
        self.state.remaining_ms = ms;
        tracing::debug!(remaining_ms = ms, "duration synced");
        self.emit(TimerEvent::DurationSynced { remaining_ms: ms });
    }

    /// Flips the active flag.
    pub fn toggle(&mut self) {
        self.state.is_active = !self.state.is_active;
        tracing::debug!(is_active = self.state.is_active, "toggled");
        self.emit(TimerEvent::Toggled {
            is_active: self.state.is_active,
        });
    }

    /// Restores the remaining time; resumes immediately unless `pause_on_reset`.
    pub fn reset(&mut self, ms: u64, pause_on_reset: bool) {
        self.state.remaining_ms = ms;
        self.state.is_active = !pause_on_reset;
        tracing::debug!(remaining_ms = ms, is_active = self.state.is_active, "reset");
        self.emit(TimerEvent::Reset {
            remaining_ms: ms,
            is_active: self.state.is_active,
        });
    }

    /// Advances the countdown by one tick.
    ///
    /// Reaching zero ends the countdown in the same tick: the timer pauses,
    /// the remaining time goes back to the configured duration and the
    /// completion hook runs once.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_active {
            return TickOutcome::Idle;
        }

        if self.state.remaining_ms > 0 {
            self.state.remaining_ms = self.state.remaining_ms.saturating_sub(TICK_MS);
            if self.state.remaining_ms > 0 {
                self.emit(TimerEvent::Tick {
                    remaining_ms: self.state.remaining_ms,
                });
                return TickOutcome::Decremented;
            }
            self.emit(TimerEvent::Tick { remaining_ms: 0 });
        }

        self.complete();
        TickOutcome::Completed
    }

    fn complete(&mut self) {
        self.state.is_active = false;
        self.state.remaining_ms = self.total_ms;
        tracing::info!(total_ms = self.total_ms, "countdown completed");
        self.emit(TimerEvent::Completed);
        if let Some(hook) = self.on_complete.as_mut() {
            hook();
        }
    }

    fn emit(&self, event: TimerEvent) {
        // Nobody listening is fine; events are informational.
        if self.event_tx.send(event).is_err() {
            tracing::trace!("timer event dropped: receiver closed");
        }
    }

    /// Returns the current timer state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the configured duration.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Returns the values the tick driver watches.
    pub fn watched(&self) -> WatchedDeps {
        WatchedDeps {
            is_active: self.state.is_active,
            remaining_ms: self.state.remaining_ms,
            total_ms: self.total_ms,
            hook_epoch: self.hook_epoch,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

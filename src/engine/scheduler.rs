//! Tick scheduling for the countdown.
//!
//! The scheduler owns the single pending tick. It is re-evaluated after every
//! committed state change and cancels the pending tick before arming a new
//! one, so at most one tick is ever outstanding.

use std::pin::Pin;

use tokio::time::{interval_at, sleep, Duration, Instant, Interval, MissedTickBehavior, Sleep};

use super::timer::WatchedDeps;
use crate::types::{Cadence, TICK_MS};

/// Delay between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS);

enum Pending {
    /// One-shot tick, re-armed by the next `sync`.
    Once(Pin<Box<Sleep>>),
    /// Free-running tick kept while the timer stays active.
    Every(Interval),
}

/// Cancellable one-second tick driver.
pub struct TickScheduler {
    cadence: Cadence,
    /// Dependencies the pending tick was armed for
    armed_for: Option<WatchedDeps>,
    pending: Option<Pending>,
}

impl TickScheduler {
    /// Creates a scheduler with nothing armed.
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            armed_for: None,
            pending: None,
        }
    }

    /// Returns the cadence this scheduler was built with.
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Re-evaluates the pending tick against the current dependencies.
    pub fn sync(&mut self, deps: WatchedDeps) {
        match self.cadence {
            Cadence::Rearm => {
                if self.armed_for == Some(deps) {
                    return;
                }
                self.cancel();
                if deps.is_active {
                    self.pending = Some(Pending::Once(Box::pin(sleep(TICK_PERIOD))));
                    tracing::trace!(remaining_ms = deps.remaining_ms, "tick armed");
                }
            }
            Cadence::Interval => {
                if !deps.is_active {
                    self.cancel();
                } else if self.pending.is_none() {
                    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    self.pending = Some(Pending::Every(ticker));
                    tracing::trace!("interval armed");
                }
            }
        }
        self.armed_for = Some(deps);
    }

    /// Drops the pending tick, if any.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("pending tick cancelled");
        }
        self.armed_for = None;
    }

    /// Returns true if a tick is pending.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the pending tick.
    ///
    /// Never resolves when nothing is armed. Cancel safe: dropping the future
    /// keeps the pending tick in place.
    pub async fn fired(&mut self) {
        let one_shot = match self.pending.as_mut() {
            Some(Pending::Once(delay)) => {
                delay.as_mut().await;
                true
            }
            Some(Pending::Every(ticker)) => {
                ticker.tick().await;
                false
            }
            None => return std::future::pending().await,
        };

        if one_shot {
            self.pending = None;
            self.armed_for = None;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "expected ~{:?}, got {:?}",
            expected,
            elapsed
        );
    }

    fn deps(is_active: bool, remaining_ms: u64) -> WatchedDeps {
        WatchedDeps {
            is_active,
            remaining_ms,
            total_ms: 5_000,
            hook_epoch: 0,
        }
    }

    #[test]
    fn test_new_scheduler_is_not_armed() {
        let scheduler = TickScheduler::new(Cadence::Rearm);
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.cadence(), Cadence::Rearm);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inactive_deps_do_not_arm() {
        let mut scheduler = TickScheduler::new(Cadence::Rearm);
        scheduler.sync(deps(false, 5_000));
        assert!(!scheduler.is_armed());

        let result = timeout(Duration::from_secs(5), scheduler.fired()).await;
        assert!(result.is_err(), "nothing armed, nothing should fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_fires_after_one_second() {
        let mut scheduler = TickScheduler::new(Cadence::Rearm);
        let start = Instant::now();
        scheduler.sync(deps(true, 5_000));
        assert!(scheduler.is_armed());

        scheduler.fired().await;
        assert_elapsed(start, TICK_PERIOD);
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_on_dependency_change() {
        let mut scheduler = TickScheduler::new(Cadence::Rearm);
        let start = Instant::now();
        scheduler.sync(deps(true, 5_000));

        tokio::time::sleep(Duration::from_millis(400)).await;
        scheduler.sync(deps(true, 6_000));

        scheduler.fired().await;
        assert_elapsed(start, Duration::from_millis(1_400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_same_deps_keeps_pending_tick() {
        let mut scheduler = TickScheduler::new(Cadence::Rearm);
        let start = Instant::now();
        scheduler.sync(deps(true, 5_000));

        tokio::time::sleep(Duration::from_millis(400)).await;
        scheduler.sync(deps(true, 5_000));

        scheduler.fired().await;
        assert_elapsed(start, TICK_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivation_cancels() {
        for cadence in [Cadence::Rearm, Cadence::Interval] {
            let mut scheduler = TickScheduler::new(cadence);
            scheduler.sync(deps(true, 5_000));
            scheduler.sync(deps(false, 5_000));
            assert!(!scheduler.is_armed(), "{:?} should cancel", cadence);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ignores_remaining_changes() {
        let mut scheduler = TickScheduler::new(Cadence::Interval);
        let start = Instant::now();
        scheduler.sync(deps(true, 5_000));

        tokio::time::sleep(Duration::from_millis(400)).await;
        scheduler.sync(deps(true, 6_000));

        scheduler.fired().await;
        assert_elapsed(start, TICK_PERIOD);

        // Still armed for the next period.
        assert!(scheduler.is_armed());
        scheduler.sync(deps(true, 5_000));
        scheduler.fired().await;
        assert_elapsed(start, TICK_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let mut scheduler = TickScheduler::new(Cadence::Rearm);
        scheduler.cancel();
        scheduler.sync(deps(true, 5_000));
        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_armed());
    }
}

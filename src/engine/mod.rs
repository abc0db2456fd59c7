//! Countdown engine.
//!
//! This module contains the countdown core:
//! - `timer`: State machine with duration sync, toggle, reset and tick
//! - `scheduler`: Cancellable one-second tick driver
//! - `runner`: Single task serializing intents and ticks

pub mod runner;
pub mod scheduler;
pub mod timer;

pub use runner::{CountdownRunner, Intent, RunnerHandle};
pub use scheduler::{TickScheduler, TICK_PERIOD};
pub use timer::{CompletionHook, TickOutcome, TimerEngine, TimerEvent, WatchedDeps};

//! Countdown Timer Library
//!
//! This library provides the core functionality for the countdown CLI.
//! It includes:
//! - Timer engine with toggle, reset, duration sync and tick transitions
//! - Cancellable one-second tick scheduling
//! - A runner task serializing user intents and ticks
//! - CLI command parsing, terminal controls and display utilities
//! - Type definitions for configuration and state

pub mod cli;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{CountdownRunner, Intent, RunnerHandle, TickOutcome, TimerEngine, TimerEvent};
pub use types::{Cadence, ConfigError, CountdownConfig, Snapshot, TimerState};

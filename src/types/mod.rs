//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Timer state (remaining time and the active flag)
//! - Duration bounds shared by the engine and the control surface
//! - Timer configuration with validation
//! - Snapshots read by the renderer

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Duration bounds
// ============================================================================

/// Shortest duration the duration control accepts.
pub const MIN_DURATION_MS: u64 = 1_000;

/// Longest duration the duration control accepts.
pub const MAX_DURATION_MS: u64 = 20_000;

/// Step of the duration control.
pub const DURATION_STEP_MS: u64 = 1_000;

/// Duration configured when nothing else is given.
pub const DEFAULT_DURATION_MS: u64 = 10_000;

/// Amount removed from the countdown by one tick.
pub const TICK_MS: u64 = 1_000;

/// Clamps a requested duration into the control's range and snaps it down
/// to a whole step.
pub fn clamp_duration(ms: u64) -> u64 {
    let clamped = ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS);
    clamped - clamped % DURATION_STEP_MS
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors raised while loading or validating a [`CountdownConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Duration outside `[MIN_DURATION_MS, MAX_DURATION_MS]`.
    #[error(
        "duration must be between {min} and {max} ms, got {0}",
        min = MIN_DURATION_MS,
        max = MAX_DURATION_MS
    )]
    DurationOutOfRange(u64),

    /// Duration that is not a whole number of steps.
    #[error("duration must be a multiple of {step} ms, got {0}", step = DURATION_STEP_MS)]
    DurationNotStepAligned(u64),

    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Cadence
// ============================================================================

/// How the one-second tick driver is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// A single-shot tick re-armed after every state change.
    #[default]
    Rearm,
    /// One free-running interval kept alive while the timer is active.
    Interval,
}

impl Cadence {
    /// Returns the string representation of the cadence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Rearm => "rearm",
            Cadence::Interval => "interval",
        }
    }
}

// ============================================================================
// CountdownConfig
// ============================================================================

/// Configuration for a countdown session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownConfig {
    /// Configured duration in milliseconds (1000-20000, step 1000)
    pub duration_ms: u64,
    /// Whether `reset` leaves the timer paused
    pub pause_on_reset: bool,
    /// Tick driver scheduling
    pub cadence: Cadence,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            pause_on_reset: true,
            cadence: Cadence::Rearm,
        }
    }
}

impl CountdownConfig {
    /// Returns the configuration with the given duration.
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Returns the configuration with the given reset policy.
    pub fn with_pause_on_reset(mut self, pause_on_reset: bool) -> Self {
        self.pause_on_reset = pause_on_reset;
        self
    }

    /// Returns the configuration with the given cadence.
    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DURATION_MS..=MAX_DURATION_MS).contains(&self.duration_ms) {
            return Err(ConfigError::DurationOutOfRange(self.duration_ms));
        }
        if self.duration_ms % DURATION_STEP_MS != 0 {
            return Err(ConfigError::DurationNotStepAligned(self.duration_ms));
        }
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Countdown state owned by the timer engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Milliseconds left in the current countdown
    pub remaining_ms: u64,
    /// Whether the tick loop is running
    pub is_active: bool,
}

impl TimerState {
    /// Creates the initial state: nothing left, paused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the remaining time in whole seconds.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_ms / 1000
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Milliseconds left in the current countdown
    pub remaining_ms: u64,
    /// Whether the countdown is advancing
    pub is_active: bool,
    /// Configured duration
    pub total_ms: u64,
    /// Current reset policy
    pub pause_on_reset: bool,
    /// Set once the completion notification has fired; never cleared
    pub complete: bool,
}

impl Snapshot {
    /// Builds a snapshot from engine state and the caller-owned settings.
    pub fn new(state: TimerState, total_ms: u64, pause_on_reset: bool, complete: bool) -> Self {
        Self {
            remaining_ms: state.remaining_ms,
            is_active: state.is_active,
            total_ms,
            pause_on_reset,
            complete,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

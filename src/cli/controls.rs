//! Terminal controls for the countdown.
//!
//! Each stdin line is one control: the terminal stand-in for the toggle
//! button, the reset button, the reset-policy switch and the duration slider.

use thiserror::Error;

use crate::engine::Intent;
use crate::types::DURATION_STEP_MS;

/// Errors raised for input that is not a known control.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    /// Unrecognized command
    #[error("unknown command: {0:?} (try: s, r, p, +, -, d <secs>, q)")]
    Unknown(String),

    /// `d` without an argument
    #[error("missing seconds, e.g. \"d 5\"")]
    MissingSeconds,

    /// `d` with a non-numeric argument
    #[error("invalid seconds: {0:?}")]
    InvalidSeconds(String),
}

/// One parsed control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// START / PAUSE button
    Toggle,
    /// RESET button
    Reset,
    /// Reset-policy switch
    TogglePolicy,
    /// Slider one step up
    StepUp,
    /// Slider one step down
    StepDown,
    /// Slider set to a number of seconds
    SetSeconds(u64),
    /// Leave the session
    Quit,
}

impl Control {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, ControlError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Control::Toggle);
        };

        match command.to_ascii_lowercase().as_str() {
            "s" | "t" | "start" | "pause" | "toggle" => Ok(Control::Toggle),
            "r" | "reset" => Ok(Control::Reset),
            "p" | "policy" => Ok(Control::TogglePolicy),
            "+" => Ok(Control::StepUp),
            "-" => Ok(Control::StepDown),
            "d" | "duration" => {
                let raw = words.next().ok_or(ControlError::MissingSeconds)?;
                raw.parse()
                    .map(Control::SetSeconds)
                    .map_err(|_| ControlError::InvalidSeconds(raw.to_string()))
            }
            "q" | "quit" | "exit" => Ok(Control::Quit),
            _ => Err(ControlError::Unknown(line.trim().to_string())),
        }
    }

    /// Maps the control onto an engine intent. `Quit` has none.
    ///
    /// Slider steps are relative so that several steps sent before the
    /// runner publishes all apply. The runner clamps every duration.
    pub fn to_intent(self) -> Option<Intent> {
        match self {
            Control::Toggle => Some(Intent::Toggle),
            Control::Reset => Some(Intent::Reset),
            Control::TogglePolicy => Some(Intent::TogglePauseOnReset),
            Control::StepUp => Some(Intent::StepDuration(DURATION_STEP_MS as i64)),
            Control::StepDown => Some(Intent::StepDuration(-(DURATION_STEP_MS as i64))),
            Control::SetSeconds(seconds) => {
                Some(Intent::SetDuration(seconds.saturating_mul(1000)))
            }
            Control::Quit => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

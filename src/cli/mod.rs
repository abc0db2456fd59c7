//! CLI module for the countdown timer.
//!
//! This module provides the terminal control surface:
//! - `commands`: Command definitions using clap derive
//! - `controls`: Parsing of interactive input lines
//! - `display`: Output formatting and display logic
//! - `session`: Interactive loop wiring input, runner and display

pub mod commands;
pub mod controls;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use controls::{Control, ControlError};
pub use display::Display;
pub use session::{Session, SessionOutcome};

//! Command definitions for the countdown CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{Cadence, ConfigError, CountdownConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown Timer CLI
#[derive(Parser, Debug)]
#[command(
    name = "countdown",
    version,
    about = "Terminal countdown timer with start/pause/reset controls",
    long_about = "A single countdown timer driven from the terminal.\n\
                  Type commands on stdin to start, pause, reset and change the duration.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive countdown
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Countdown duration in seconds (1-20)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u64).range(1..=20)
    )]
    pub duration: Option<u64>,

    /// Resume counting immediately after a reset instead of pausing
    #[arg(short, long)]
    pub resume_on_reset: bool,

    /// Tick scheduling strategy
    #[arg(long, value_enum)]
    pub cadence: Option<Cadence>,

    /// JSON config file (flags take precedence)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print one JSON snapshot per line instead of the text view
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Builds the session configuration: defaults, then the config file,
    /// then explicit flags.
    pub fn to_config(&self) -> Result<CountdownConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => CountdownConfig::from_json_file(path)?,
            None => CountdownConfig::default(),
        };

        if let Some(seconds) = self.duration {
            config = config.with_duration_ms(seconds * 1000);
        }
        if self.resume_on_reset {
            config = config.with_pause_on_reset(false);
        }
        if let Some(cadence) = self.cadence {
            config = config.with_cadence(cadence);
        }

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

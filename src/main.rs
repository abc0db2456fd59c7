//! Countdown Timer CLI
//!
//! A single countdown with start/pause/reset controls and a configurable
//! duration between 1 and 20 seconds.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use countdown::cli::{Cli, Commands, Display, RunArgs, Session};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so that `--json` output on stdout stays machine readable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => run(args).await?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive countdown on stdin/stdout.
async fn run(args: RunArgs) -> Result<()> {
    let config = args.to_config().context("invalid configuration")?;
    tracing::info!(?config, "starting countdown");

    if !args.json {
        Display::show_controls();
    }

    let outcome = Session::new(config, args.json)
        .run(spawn_stdin_reader(), tokio::io::stdout())
        .await?;
    tracing::debug!(?outcome, "countdown finished");

    Ok(())
}

/// Reads stdin lines on a plain thread, so a pending read never holds up
/// runtime shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    use std::io::BufRead;

    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["countdown"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["countdown", "run", "-d", "5"]);
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.duration, Some(5)),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["countdown", "--verbose", "run"]);
        assert!(cli.verbose);
    }
}

//! End-to-End Tests for the countdown CLI.
//!
//! These tests run the compiled binary and verify complete user workflows:
//! - Help and shell completions
//! - A full countdown ending in the TIMES UP view
//! - Quitting from the paused view
//! - JSON snapshot output
//! - Configuration errors

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

use countdown::types::Snapshot;

// ============================================================================
// Test Helpers
// ============================================================================

fn countdown() -> Command {
    Command::cargo_bin("countdown").unwrap()
}

// ============================================================================
// Help and completions
// ============================================================================

#[test]
fn help_lists_subcommands() {
    countdown()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn completions_generate_script() {
    countdown()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("countdown"));
}

// ============================================================================
// Interactive runs
// ============================================================================

#[test]
fn quit_shows_paused_view() {
    countdown()
        .args(["run", "--duration", "2"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 seconds"))
        .stdout(predicate::str::contains("PAUSED"))
        .stdout(predicate::str::contains("[START] [RESET]"));
}

#[test]
fn full_countdown_ends_with_times_up() {
    countdown()
        .args(["run", "--duration", "1"])
        .write_stdin("s\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("COUNTING DOWN"))
        .stdout(predicate::str::contains("TIMES UP!"));
}

#[test]
fn unknown_input_is_reported_not_fatal() {
    countdown()
        .args(["run", "--duration", "2"])
        .write_stdin("jump\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn json_mode_prints_snapshots() {
    let output = countdown()
        .args(["run", "--duration", "1", "--json"])
        .write_stdin("s\n")
        .timeout(std::time::Duration::from_secs(10))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let snapshots: Vec<Snapshot> = stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let first = snapshots.first().unwrap();
    assert_eq!(first.total_ms, 1_000);
    assert!(!first.is_active);
    assert!(snapshots.last().unwrap().complete);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn duration_out_of_range_is_rejected() {
    countdown()
        .args(["run", "--duration", "30"])
        .assert()
        .failure();
}

#[test]
fn config_file_sets_duration() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"durationMs": 4000}}"#).unwrap();

    countdown()
        .args(["run", "--config"])
        .arg(file.path())
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 seconds"));
}

#[test]
fn invalid_config_file_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"durationMs": 4500}}"#).unwrap();

    countdown()
        .args(["run", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

//! Display utilities for the countdown CLI.
//!
//! This module renders a [`Snapshot`] as:
//! - The countdown view (seconds, status, slider and buttons)
//! - The terminal "TIMES UP!" view
//! - One-line JSON for scripting

use crate::types::{Snapshot, DURATION_STEP_MS, MAX_DURATION_MS};

/// Shown once the countdown has completed.
pub const TIMES_UP: &str = "⏰ TIMES UP!";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Remaining time as whole seconds.
    pub fn seconds_line(snapshot: &Snapshot) -> String {
        format!("{} seconds", snapshot.remaining_ms / 1000)
    }

    /// Status text under the seconds.
    pub fn status_text(snapshot: &Snapshot) -> &'static str {
        if snapshot.is_active {
            "COUNTING DOWN"
        } else {
            "PAUSED"
        }
    }

    /// Label of the start/pause button.
    pub fn toggle_label(snapshot: &Snapshot) -> &'static str {
        if snapshot.is_active {
            "PAUSE"
        } else {
            "START"
        }
    }

    /// Label of the reset-policy switch.
    pub fn policy_label(snapshot: &Snapshot) -> &'static str {
        if snapshot.pause_on_reset {
            "PAUSE ON RESET"
        } else {
            "RESUME ON RESET"
        }
    }

    /// The duration slider, one cell per step.
    pub fn slider(snapshot: &Snapshot) -> String {
        let steps = (MAX_DURATION_MS / DURATION_STEP_MS) as usize;
        let filled = ((snapshot.total_ms / DURATION_STEP_MS) as usize).min(steps);
        format!(
            "[{}{}] {}s",
            "#".repeat(filled),
            "-".repeat(steps - filled),
            snapshot.total_ms / 1000
        )
    }

    /// Renders a full frame.
    pub fn render(snapshot: &Snapshot) -> String {
        if snapshot.complete {
            return TIMES_UP.to_string();
        }

        format!(
            "{}\n{}\n{}\n[{}] [RESET] [{}]",
            Self::seconds_line(snapshot),
            Self::status_text(snapshot),
            Self::slider(snapshot),
            Self::toggle_label(snapshot),
            Self::policy_label(snapshot),
        )
    }

    /// Renders a snapshot as a single JSON line.
    pub fn render_json(snapshot: &Snapshot) -> serde_json::Result<String> {
        serde_json::to_string(snapshot)
    }

    /// Shows the help line for terminal controls.
    pub fn show_controls() {
        println!("controls: s=start/pause  r=reset  p=reset policy  +/-=duration  d <secs>  q=quit");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(remaining_ms: u64, is_active: bool) -> Snapshot {
        Snapshot {
            remaining_ms,
            is_active,
            total_ms: 10_000,
            pause_on_reset: true,
            complete: false,
        }
    }

    #[test]
    fn test_seconds_line() {
        assert_eq!(Display::seconds_line(&snapshot(10_000, false)), "10 seconds");
        assert_eq!(Display::seconds_line(&snapshot(0, false)), "0 seconds");
    }

    #[test]
    fn test_labels_follow_active_flag() {
        let paused = snapshot(5_000, false);
        assert_eq!(Display::status_text(&paused), "PAUSED");
        assert_eq!(Display::toggle_label(&paused), "START");

        let running = snapshot(5_000, true);
        assert_eq!(Display::status_text(&running), "COUNTING DOWN");
        assert_eq!(Display::toggle_label(&running), "PAUSE");
    }

    #[test]
    fn test_policy_label() {
        let mut s = snapshot(5_000, false);
        assert_eq!(Display::policy_label(&s), "PAUSE ON RESET");
        s.pause_on_reset = false;
        assert_eq!(Display::policy_label(&s), "RESUME ON RESET");
    }

    #[test]
    fn test_slider() {
        let s = snapshot(5_000, false);
        assert_eq!(Display::slider(&s), format!("[{}{}] 10s", "#".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn test_render_frame() {
        let frame = Display::render(&snapshot(4_000, true));
        let lines: Vec<_> = frame.lines().collect();
        assert_eq!(lines[0], "4 seconds");
        assert_eq!(lines[1], "COUNTING DOWN");
        assert_eq!(lines[3], "[PAUSE] [RESET] [PAUSE ON RESET]");
    }

    #[test]
    fn test_render_complete_is_times_up() {
        let mut s = snapshot(3_000, false);
        s.complete = true;
        assert_eq!(Display::render(&s), TIMES_UP);
    }

    #[test]
    fn test_render_json() {
        let json = Display::render_json(&snapshot(4_000, true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["remainingMs"], 4_000);
        assert_eq!(value["isActive"], true);
        assert!(!json.contains('\n'));
    }
}

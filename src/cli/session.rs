//! Interactive countdown session.
//!
//! Reads controls line by line, forwards them to the countdown runner and
//! redraws whenever the runner publishes a new snapshot. The session ends on
//! `q`, on completion (after drawing the TIMES UP view), or once input is
//! closed and the countdown has stayed paused for a while.

use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::sleep;

use super::controls::Control;
use super::display::Display;
use crate::engine::{CountdownRunner, TimerEvent, TICK_PERIOD};
use crate::types::{CountdownConfig, Snapshot};

/// Terminal bell, rung once on completion in text mode.
const BELL: &str = "\x07";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The countdown completed
    Completed,
    /// The user quit
    Quit,
    /// Input closed while the countdown was paused
    InputClosed,
}

/// One interactive countdown.
pub struct Session {
    config: CountdownConfig,
    json: bool,
}

impl Session {
    /// Creates a session for the given configuration.
    pub fn new(config: CountdownConfig, json: bool) -> Self {
        Self { config, json }
    }

    /// Runs the session until it ends.
    ///
    /// `input` yields one control line at a time; closing it means no more
    /// input will arrive.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub async fn run<W>(
        self,
        mut input: mpsc::UnboundedReceiver<String>,
        mut output: W,
    ) -> Result<SessionOutcome>
    where
        W: AsyncWrite + Unpin,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (handle, task) = CountdownRunner::new(self.config.clone(), event_tx).spawn();
        let mut snapshots = handle.subscribe();
        let mut input_open = true;

        let first = *snapshots.borrow_and_update();
        self.draw(&mut output, &first).await?;

        let outcome = loop {
            tokio::select! {
                biased;
                Some(event) = event_rx.recv() => {
                    if event == TimerEvent::Completed && !self.json {
                        output.write_all(BELL.as_bytes()).await?;
                    }
                }
                changed = snapshots.changed() => {
                    changed.context("countdown runner stopped unexpectedly")?;
                    let snapshot = *snapshots.borrow_and_update();
                    self.draw(&mut output, &snapshot).await?;
                    if snapshot.complete {
                        break SessionOutcome::Completed;
                    }
                }
                line = input.recv(), if input_open => {
                    match line {
                        Some(line) => match Control::parse(&line) {
                            Ok(Control::Quit) => break SessionOutcome::Quit,
                            Ok(control) => {
                                if let Some(intent) = control.to_intent() {
                                    handle.send(intent)?;
                                }
                            }
                            Err(e) => {
                                tracing::warn!("rejected input: {}", e);
                                Display::show_error(&e.to_string());
                            }
                        },
                        None => {
                            tracing::debug!("input closed");
                            input_open = false;
                        }
                    }
                }
                // Re-armed every iteration: fires only after two ticks
                // without a new snapshot, i.e. the countdown is paused.
                () = sleep(TICK_PERIOD * 2), if !input_open => {
                    break SessionOutcome::InputClosed;
                }
            }
        };

        drop(handle);
        task.await.context("countdown runner panicked")?;
        output.flush().await?;

        tracing::info!(?outcome, "session ended");
        Ok(outcome)
    }

    async fn draw<W>(&self, output: &mut W, snapshot: &Snapshot) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let frame = if self.json {
            Display::render_json(snapshot).context("failed to encode snapshot")?
        } else {
            format!("{}\n", Display::render(snapshot))
        };
        output.write_all(frame.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

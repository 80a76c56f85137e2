//! Event loop orchestrating snapshots, engine outcomes, input and rendering.

use anyhow::Result;
use client_engine::SnapshotEvent;
use client_frontend_core::{ActionDispatcher, DispatchOutcome, Session};
use tokio::{
    sync::mpsc,
    time::{self, Duration},
};

use crate::{
    config::CliConfig, input::InputHandler, presentation::terminal::Tui, state::AppState,
};

const FRAME_INTERVAL_MS: u64 = 16;

/// Owns the session for the lifetime of the UI.
pub struct EventLoop {
    pub(crate) session: Session,
    pub(crate) dispatcher: ActionDispatcher,
    pub(crate) snapshots: mpsc::UnboundedReceiver<SnapshotEvent>,
    pub(crate) outcomes: mpsc::Receiver<DispatchOutcome>,
    pub(crate) input: InputHandler,
    pub(crate) app_state: AppState,
    pub(crate) cli_config: CliConfig,
}

impl EventLoop {
    pub fn new(
        session: Session,
        dispatcher: ActionDispatcher,
        snapshots: mpsc::UnboundedReceiver<SnapshotEvent>,
        outcomes: mpsc::Receiver<DispatchOutcome>,
        cli_config: CliConfig,
    ) -> Self {
        Self {
            session,
            dispatcher,
            snapshots,
            outcomes,
            input: InputHandler::new(),
            app_state: AppState::new(),
            cli_config,
        }
    }

    /// Runs until the player quits or a channel closes; hands the session
    /// back for teardown.
    pub async fn run(mut self, terminal: &mut Tui) -> Result<Session> {
        // Initial render
        self.render(terminal)?;

        loop {
            tokio::select! {
                event = self.snapshots.recv() => {
                    if self.handle_snapshot(event, terminal)? {
                        break;
                    }
                }
                outcome = self.outcomes.recv() => {
                    if self.handle_outcome(outcome, terminal)? {
                        break;
                    }
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(terminal).await? {
                        break;
                    }
                }
            }
        }

        Ok(self.session)
    }

    /// Apply one snapshot delivery; redraw only when something changed.
    fn handle_snapshot(&mut self, event: Option<SnapshotEvent>, terminal: &mut Tui) -> Result<bool> {
        let Some(event) = event else {
            tracing::warn!("Snapshot stream closed");
            return Ok(true);
        };

        let scope = self.session.apply_snapshot(event);
        if scope.requires_redraw() {
            self.render(terminal)?;
        }
        Ok(false)
    }

    fn handle_outcome(
        &mut self,
        outcome: Option<DispatchOutcome>,
        terminal: &mut Tui,
    ) -> Result<bool> {
        let Some(outcome) = outcome else {
            tracing::warn!("Outcome channel closed");
            return Ok(true);
        };

        let scope = self.session.apply_outcome(outcome);
        if scope.requires_redraw() {
            self.render(terminal)?;
        }
        Ok(false)
    }
}

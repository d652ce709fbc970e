//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: room state machine
//! - [`Driver`]: platform-specific I/O
//!
//! Inbound lines are decoded and applied one at a time, strictly in arrival
//! order. Cues are handed to the driver and never awaited.

use ninjutsu_proto::{RoomEndpoint, ServerMessage};

use crate::{App, AppAction, AppEvent, Driver, SessionConfig};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and session configuration.
    pub fn new(driver: D, config: SessionConfig) -> Self {
        Self::with_app(driver, App::new(config))
    }

    /// Create a runtime around an existing App.
    pub fn with_app(driver: D, app: App) -> Self {
        Self { driver, app }
    }

    /// Run the main event loop until the app quits.
    ///
    /// This is the core orchestration loop that:
    /// 1. Opens the session channel
    /// 2. Polls for input events from the driver
    /// 3. Receives one peer line, decodes it and applies it
    /// 4. Executes the resulting actions
    ///
    /// A lost connection does not end the loop; the frozen view stays up
    /// until the user quits or reconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<App, D::Error> {
        self.driver.render(&self.app)?;
        let actions = self.app.connect();
        if !self.process_actions(actions).await? {
            loop {
                if self.process_cycle().await? {
                    break;
                }
            }
        }

        self.driver.stop();
        Ok(self.app)
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if !actions.is_empty() && self.process_actions(actions).await? {
            return Ok(true);
        }

        if self.driver.is_connected() {
            if let Some(line) = self.driver.recv_line().await {
                let actions = self.handle_line(&line);
                if self.process_actions(actions).await? {
                    return Ok(true);
                }
            }
        } else if self.app.connection_state().is_connected() {
            let event = AppEvent::Disconnected { reason: "connection closed".to_owned() };
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Decode a raw peer line and feed it to the App.
    fn handle_line(&mut self, line: &str) -> Vec<AppAction> {
        match ServerMessage::decode(line) {
            Ok(message) => self.app.handle(AppEvent::Message(message)),
            Err(e) => {
                tracing::warn!("Dropping undecodable line {line:?}: {e}");
                vec![]
            },
        }
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Connect { endpoint } => {
                        let new_actions = self.connect(&endpoint).await;
                        pending_actions.extend(new_actions);
                    },
                    AppAction::Send(command) => self.driver.send_command(command).await?,
                    AppAction::PlayCue(sample) => self.driver.play_cue(&sample),
                }
            }
        }
        Ok(false)
    }

    /// Open the session channel and report the outcome to the App.
    ///
    /// A failed connect is not a runtime error: the App shows it as a lost
    /// connection.
    async fn connect(&mut self, endpoint: &RoomEndpoint) -> Vec<AppAction> {
        let mut actions = self.app.handle(AppEvent::Connecting);

        let outcome = match self.driver.connect(endpoint).await {
            Ok(()) => AppEvent::Connected,
            Err(e) => {
                tracing::warn!("Failed to connect to {endpoint}: {e}");
                AppEvent::Disconnected { reason: e.to_string() }
            },
        };
        actions.extend(self.app.handle(outcome));
        actions
    }
}

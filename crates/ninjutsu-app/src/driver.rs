//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use ninjutsu_proto::{Command, RoomEndpoint};

use crate::{App, AppAction, CueSample};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal UI and in simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for key events, ratatui for rendering, a WebSocket
///   session channel for the room peer
/// - **Simulation**: scripted peer lines and key events, captured commands
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event and let the app handle it.
    ///
    /// Returns the resulting actions, empty if nothing happened.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Send a command to the room peer.
    ///
    /// Sending on a closed session is not an error; the command is dropped.
    fn send_command(
        &mut self,
        command: Command,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive the next raw line from the room peer.
    ///
    /// Returns `None` if no line is ready. Lines are returned in arrival
    /// order.
    fn recv_line(&mut self) -> impl Future<Output = Option<String>> + Send;

    /// Open the session channel. The channel sends the join intent itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    fn connect(
        &mut self,
        endpoint: &RoomEndpoint,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Whether the session can still deliver lines.
    ///
    /// Stays true after the peer hangs up until every line it sent before
    /// that has been returned by [`recv_line`](Self::recv_line).
    fn is_connected(&self) -> bool;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Play a feedback cue. Must not block.
    fn play_cue(&mut self, sample: &CueSample);

    /// Close the session channel and clean up resources.
    fn stop(&mut self);
}

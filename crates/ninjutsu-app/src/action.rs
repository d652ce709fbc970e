//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use ninjutsu_proto::{Command, RoomEndpoint};

use crate::CueSample;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open the session channel.
    Connect {
        /// Room socket and join mode.
        endpoint: RoomEndpoint,
    },

    /// Send a command to the room peer.
    Send(Command),

    /// Play a feedback cue. Fire-and-forget.
    PlayCue(CueSample),
}

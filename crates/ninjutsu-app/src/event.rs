//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keys, resize) and system ticks.
//! - The session channel: connection lifecycle and decoded peer messages.

use ninjutsu_proto::ServerMessage;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection in progress.
    Connecting,

    /// Session channel open; join intent already sent.
    Connected,

    /// Message received from the room peer.
    Message(ServerMessage),

    /// Session channel closed or could not be opened.
    Disconnected {
        /// Why the connection ended.
        reason: String,
    },
}

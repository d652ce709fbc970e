//! Outbound commands (client to peer).

use std::fmt;

use crate::Choice;

/// A command the client sends to the room peer.
///
/// Each command encodes to exactly one line. The encoded form is what goes
/// on the wire verbatim; see [`Command::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Join the room as a participant. First message in participant mode.
    Join,
    /// Request the current room state without joining. First message in
    /// observer mode.
    GetState,
    /// Cast (or replace) this participant's vote.
    Vote(Choice),
    /// Ask the peer to start a new round.
    Reset,
}

impl Command {
    /// Wire token for this command.
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::GetState => "GETSTATE",
            Self::Vote(_) => "VOTE",
            Self::Reset => "RESET",
        }
    }

    /// Encode into a single protocol line (no trailing newline).
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vote(value) => write!(f, "{} {value}", self.token()),
            Self::Join | Self::GetState | Self::Reset => f.write_str(self.token()),
        }
    }
}

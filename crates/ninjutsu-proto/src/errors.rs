//! Error types for the ninjutsu wire protocol.
//!
//! Decoding is lenient: unknown commands and phases are not
//! errors (see [`crate::ServerMessage::Unknown`]). These errors cover the
//! cases where a recognised command carries arguments that cannot be
//! interpreted at all.

use thiserror::Error;

/// Errors produced while decoding protocol lines or room addresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Line contained no command token.
    #[error("empty message")]
    EmptyMessage,

    /// A recognised command is missing a required argument.
    #[error("{command} is missing a required argument")]
    MissingArgument {
        /// Command token that was received.
        command: &'static str,
    },

    /// Player identifier is not an unsigned integer.
    #[error("invalid player id: {token:?}")]
    InvalidPlayerId {
        /// Offending token.
        token: String,
    },

    /// A `ROOM_STATE` vote entry could not be parsed.
    #[error("malformed vote entry: {entry:?}")]
    MalformedEntry {
        /// Offending entry.
        entry: String,
    },

    /// Room page address cannot be turned into a session endpoint.
    #[error("invalid room address: {reason}")]
    InvalidAddress {
        /// Why the address was rejected.
        reason: String,
    },
}

/// Convenience alias for protocol results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

//! ninjutsu wire protocol
//!
//! The room peer and its clients exchange single-line text messages over a
//! persistent socket, one command per message, fields separated by spaces.
//!
//! # Messages
//!
//! Outbound ([`Command`]): `JOIN`, `GETSTATE`, `VOTE <value>`, `RESET`.
//!
//! Inbound ([`ServerMessage`]): `WELCOME <playerId>`, `VOTE [<playerId>]`,
//! `ROOM_STATE PROGRESS <playerId:hasVoted>...`,
//! `ROOM_STATE RESULT <playerId:value>...`.
//!
//! This crate is pure: it encodes, decodes and derives addresses. The socket
//! itself lives in `ninjutsu-client`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod endpoint;
pub mod errors;
mod message;

pub use command::Command;
pub use endpoint::{JoinMode, RoomEndpoint};
pub use errors::ProtocolError;
pub use message::{RevealedVote, RoomSnapshot, ServerMessage, VoteStatus};

/// Player identity assigned by the room peer.
pub type PlayerId = u64;

/// Vote value a participant submits.
pub type Choice = i64;

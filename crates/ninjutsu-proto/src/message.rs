//! Inbound messages (peer to client).
//!
//! A message is one text line split on the space character into a command
//! token and arguments. Unknown commands decode to [`ServerMessage::Unknown`]
//! and unknown phases to [`RoomSnapshot::Unrecognized`].
//!
//! # Invariants
//!
//! - Vote shape matches phase: a [`RoomSnapshot::Progress`] only ever holds
//!   [`VoteStatus`] entries and a [`RoomSnapshot::Result`] only ever holds
//!   [`RevealedVote`] entries.
//! - Entry order is the order the peer sent them in.
//! - A malformed entry is dropped on its own; the remaining entries of the
//!   same line are kept.

use tracing::debug;

use crate::{
    Choice, PlayerId,
    errors::{ProtocolError, Result},
};

/// Token meaning a participant has not voted in a revealed round.
const ABSTAIN_TOKEN: &str = "None";

/// A decoded message from the room peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Identity assignment, sent once after `JOIN`.
    Welcome {
        /// Identity assigned to this connection.
        player_id: PlayerId,
    },

    /// Some participant voted. Carries no vote value.
    VoteCast {
        /// Who voted, when the peer includes it.
        player_id: Option<PlayerId>,
    },

    /// Authoritative room state; replaces the client's votes wholesale.
    RoomState(RoomSnapshot),

    /// Command this client does not understand. Ignored by the state machine.
    Unknown {
        /// The unrecognised command token.
        command: String,
    },
}

impl ServerMessage {
    /// Decode one protocol line.
    ///
    /// Empty tokens are skipped, which absorbs the trailing space the peer
    /// emits for a room with no players.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::EmptyMessage`] if the line has no command token.
    /// - [`ProtocolError::MissingArgument`] / [`ProtocolError::InvalidPlayerId`]
    ///   if `WELCOME` does not carry a usable id.
    pub fn decode(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut args = line.split(' ').filter(|token| !token.is_empty());
        let command = args.next().ok_or(ProtocolError::EmptyMessage)?;

        match command {
            "WELCOME" => {
                let token =
                    args.next().ok_or(ProtocolError::MissingArgument { command: "WELCOME" })?;
                Ok(Self::Welcome { player_id: parse_player_id(token)? })
            },
            "VOTE" => {
                let player_id = args.next().and_then(|token| parse_player_id(token).ok());
                Ok(Self::VoteCast { player_id })
            },
            "ROOM_STATE" => Ok(Self::RoomState(RoomSnapshot::from_args(args))),
            other => Ok(Self::Unknown { command: other.to_owned() }),
        }
    }
}

/// Payload of a `ROOM_STATE` message, keyed by phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomSnapshot {
    /// Votes are being collected; values are withheld.
    Progress(Vec<VoteStatus>),
    /// Votes are revealed.
    Result(Vec<RevealedVote>),
    /// Phase token this client does not understand (or none at all).
    Unrecognized {
        /// The phase token, if one was present.
        phase: Option<String>,
    },
}

impl RoomSnapshot {
    /// Build a snapshot from the arguments following `ROOM_STATE`.
    fn from_args<'a>(mut args: impl Iterator<Item = &'a str>) -> Self {
        match args.next() {
            Some("PROGRESS") => Self::Progress(parse_entries(args, VoteStatus::parse)),
            Some("RESULT") => Self::Result(parse_entries(args, RevealedVote::parse)),
            other => Self::Unrecognized { phase: other.map(str::to_owned) },
        }
    }
}

/// Vote status of one participant while a round is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoteStatus {
    /// Participant the entry describes.
    pub player_id: PlayerId,
    /// Whether the participant has voted.
    pub has_voted: bool,
}

impl VoteStatus {
    /// Parse a `playerId:hasVoted` entry.
    ///
    /// `hasVoted` is true iff the token equals `true` ignoring ASCII case;
    /// every other token means "not voted".
    pub fn parse(entry: &str) -> Result<Self> {
        let (id, flag) = split_entry(entry)?;
        Ok(Self { player_id: id, has_voted: flag.eq_ignore_ascii_case("true") })
    }
}

/// Revealed vote of one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealedVote {
    /// Participant the entry describes.
    pub player_id: PlayerId,
    /// Revealed value. `None` if the participant did not vote this round.
    pub value: Option<Choice>,
}

impl RevealedVote {
    /// Parse a `playerId:value` entry.
    ///
    /// The peer reports participants that never voted as `playerId:None`;
    /// those decode with `value: None`.
    pub fn parse(entry: &str) -> Result<Self> {
        let (id, value) = split_entry(entry)?;
        let value = if value == ABSTAIN_TOKEN {
            None
        } else {
            let parsed = value
                .parse::<Choice>()
                .map_err(|_| ProtocolError::MalformedEntry { entry: entry.to_owned() })?;
            Some(parsed)
        };
        Ok(Self { player_id: id, value })
    }
}

/// Split `id:field` and parse the id.
///
/// Only the first two `:`-separated fields count; anything after a second
/// colon is ignored.
fn split_entry(entry: &str) -> Result<(PlayerId, &str)> {
    let malformed = || ProtocolError::MalformedEntry { entry: entry.to_owned() };
    let mut fields = entry.split(':');
    let id = fields.next().ok_or_else(malformed)?;
    let field = fields.next().ok_or_else(malformed)?;
    let id = id.parse::<PlayerId>().map_err(|_| malformed())?;
    Ok((id, field))
}

fn parse_player_id(token: &str) -> Result<PlayerId> {
    token.parse().map_err(|_| ProtocolError::InvalidPlayerId { token: token.to_owned() })
}

/// Parse every entry, dropping the ones that fail.
fn parse_entries<'a, T>(
    entries: impl Iterator<Item = &'a str>,
    parse: impl Fn(&str) -> Result<T>,
) -> Vec<T> {
    entries
        .filter_map(|entry| match parse(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("skipping vote entry: {e}");
                None
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_welcome() {
        assert_eq!(ServerMessage::decode("WELCOME 3"), Ok(ServerMessage::Welcome { player_id: 3 }));
    }

    #[test]
    fn decode_welcome_without_id_fails() {
        assert_eq!(
            ServerMessage::decode("WELCOME"),
            Err(ProtocolError::MissingArgument { command: "WELCOME" })
        );
        assert!(matches!(
            ServerMessage::decode("WELCOME abc"),
            Err(ProtocolError::InvalidPlayerId { .. })
        ));
    }

    #[test]
    fn decode_vote_with_and_without_voter() {
        assert_eq!(ServerMessage::decode("VOTE"), Ok(ServerMessage::VoteCast { player_id: None }));
        assert_eq!(
            ServerMessage::decode("VOTE 5"),
            Ok(ServerMessage::VoteCast { player_id: Some(5) })
        );
        assert_eq!(
            ServerMessage::decode("VOTE x"),
            Ok(ServerMessage::VoteCast { player_id: None })
        );
    }

    #[test]
    fn decode_progress_keeps_order() {
        let msg = ServerMessage::decode("ROOM_STATE PROGRESS 5:true 3:False").ok();
        assert_eq!(
            msg,
            Some(ServerMessage::RoomState(RoomSnapshot::Progress(vec![
                VoteStatus { player_id: 5, has_voted: true },
                VoteStatus { player_id: 3, has_voted: false },
            ])))
        );
    }

    #[test]
    fn decode_progress_with_trailing_space_is_empty() {
        let msg = ServerMessage::decode("ROOM_STATE PROGRESS ").ok();
        assert_eq!(msg, Some(ServerMessage::RoomState(RoomSnapshot::Progress(vec![]))));
    }

    #[test]
    fn decode_result_with_abstention() {
        let msg = ServerMessage::decode("ROOM_STATE RESULT 3:8 4:None 5:-1").ok();
        assert_eq!(
            msg,
            Some(ServerMessage::RoomState(RoomSnapshot::Result(vec![
                RevealedVote { player_id: 3, value: Some(8) },
                RevealedVote { player_id: 4, value: None },
                RevealedVote { player_id: 5, value: Some(-1) },
            ])))
        );
    }

    #[test]
    fn decode_skips_malformed_entries() {
        let msg = ServerMessage::decode("ROOM_STATE RESULT 3:8 nocolon x:1 4:eight 5:5").ok();
        assert_eq!(
            msg,
            Some(ServerMessage::RoomState(RoomSnapshot::Result(vec![
                RevealedVote { player_id: 3, value: Some(8) },
                RevealedVote { player_id: 5, value: Some(5) },
            ])))
        );
    }

    #[test]
    fn extra_entry_fields_are_ignored() {
        assert_eq!(
            VoteStatus::parse("3:true:x"),
            Ok(VoteStatus { player_id: 3, has_voted: true })
        );
        assert_eq!(
            RevealedVote::parse("4:8:13"),
            Ok(RevealedVote { player_id: 4, value: Some(8) })
        );
        assert_eq!(
            RevealedVote::parse("5:None:"),
            Ok(RevealedVote { player_id: 5, value: None })
        );
    }

    #[test]
    fn decode_unknown_phase_and_command() {
        assert_eq!(
            ServerMessage::decode("ROOM_STATE BOGUS 1:2"),
            Ok(ServerMessage::RoomState(RoomSnapshot::Unrecognized {
                phase: Some("BOGUS".to_owned())
            }))
        );
        assert_eq!(
            ServerMessage::decode("ROOM_STATE"),
            Ok(ServerMessage::RoomState(RoomSnapshot::Unrecognized { phase: None }))
        );
        assert_eq!(
            ServerMessage::decode("JOIN/answer"),
            Ok(ServerMessage::Unknown { command: "JOIN/answer".to_owned() })
        );
    }

    #[test]
    fn decode_empty_line_fails() {
        assert_eq!(ServerMessage::decode(""), Err(ProtocolError::EmptyMessage));
        assert_eq!(ServerMessage::decode("   "), Err(ProtocolError::EmptyMessage));
    }

    #[test]
    fn decode_ignores_line_terminator() {
        assert_eq!(
            ServerMessage::decode("WELCOME 9\r\n"),
            Ok(ServerMessage::Welcome { player_id: 9 })
        );
    }
}

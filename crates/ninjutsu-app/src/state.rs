//! Observable room state.
//!
//! [`RoomView`] is the client's reconstruction of the session, derived only
//! from the inbound message stream plus two pieces of local state: the
//! optimistic pending vote and the sound preference.
//!
//! The votes live inside [`Round`], so the shape of every vote always matches
//! the phase: progress entries never carry values and revealed entries never
//! lack them.

use std::fmt;

use ninjutsu_proto::{Choice, JoinMode, PlayerId, RevealedVote, VoteStatus};

/// Connection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected yet.
    Disconnected,
    /// Connection in progress.
    Connecting,
    /// Session channel is open.
    Connected,
    /// Connection dropped or could not be established. The view is frozen.
    Lost {
        /// Why the connection ended.
        reason: String,
    },
}

impl ConnectionState {
    /// Whether the session channel is open.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Stage of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No room state received yet.
    Unset,
    /// Votes are being collected.
    Progress,
    /// Votes are revealed.
    Result,
}

/// Votes of the current round, shaped by phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Round {
    /// No room state received yet.
    #[default]
    Unset,
    /// Vote statuses, peer order.
    Progress(Vec<VoteStatus>),
    /// Revealed votes, peer order.
    Result(Vec<RevealedVote>),
}

impl Round {
    /// Phase of this round.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Unset => Phase::Unset,
            Self::Progress(_) => Phase::Progress,
            Self::Result(_) => Phase::Result,
        }
    }

    /// Number of vote entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Unset => 0,
            Self::Progress(votes) => votes.len(),
            Self::Result(votes) => votes.len(),
        }
    }

    /// Whether the round has no vote entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Client-side view of one room session.
///
/// Created fresh for every connection; nothing carries over a reconnect
/// except what the caller passes in (join mode, sound preference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub(crate) mode: JoinMode,
    pub(crate) self_id: Option<PlayerId>,
    pub(crate) round: Round,
    pub(crate) pending_vote: Option<Choice>,
    pub(crate) sound_enabled: bool,
}

impl RoomView {
    /// Fresh view: no identity, phase unset, sound on.
    pub fn new(mode: JoinMode) -> Self {
        Self { mode, self_id: None, round: Round::Unset, pending_vote: None, sound_enabled: true }
    }

    /// Set the initial sound preference.
    #[must_use]
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Join mode of the connection this view belongs to.
    pub fn mode(&self) -> JoinMode {
        self.mode
    }

    /// Identity assigned by the peer. `None` until `WELCOME`.
    pub fn self_id(&self) -> Option<PlayerId> {
        self.self_id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    /// Votes of the current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Value this client submitted and has not yet seen revealed.
    pub fn pending_vote(&self) -> Option<Choice> {
        self.pending_vote
    }

    /// Whether feedback cues are wanted.
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Record a vote this client just submitted, ahead of confirmation.
    pub fn record_vote(&mut self, choice: Choice) {
        self.pending_vote = Some(choice);
    }

    /// Flip the sound preference and return the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Project every vote entry to what should be shown for it.
    ///
    /// Recomputed on each call from phase, votes, identity and pending vote.
    pub fn displayed_votes(&self) -> Vec<DisplayedVote> {
        match &self.round {
            Round::Unset => Vec::new(),
            Round::Progress(votes) => votes
                .iter()
                .map(|vote| {
                    let is_self = self.self_id == Some(vote.player_id);
                    let display = match (is_self, self.pending_vote) {
                        (true, Some(choice)) => VoteDisplay::Own(choice),
                        (true, None) => VoteDisplay::Placeholder,
                        (false, _) if vote.has_voted => VoteDisplay::Voted,
                        (false, _) => VoteDisplay::NotVoted,
                    };
                    DisplayedVote { player_id: vote.player_id, is_self, display }
                })
                .collect(),
            Round::Result(votes) => votes
                .iter()
                .map(|vote| DisplayedVote {
                    player_id: vote.player_id,
                    is_self: self.self_id == Some(vote.player_id),
                    display: vote.value.map_or(VoteDisplay::Abstained, VoteDisplay::Revealed),
                })
                .collect(),
        }
    }
}

/// One vote entry as it should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedVote {
    /// Participant the entry describes.
    pub player_id: PlayerId,
    /// Whether the entry is this client.
    pub is_self: bool,
    /// What to show.
    pub display: VoteDisplay,
}

/// Presentation of a single vote entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDisplay {
    /// Revealed value.
    Revealed(Choice),
    /// Revealed round, participant did not vote.
    Abstained,
    /// This client's own pending vote.
    Own(Choice),
    /// This client has not voted yet.
    Placeholder,
    /// Another participant has voted; value hidden.
    Voted,
    /// Another participant has not voted.
    NotVoted,
}

impl fmt::Display for VoteDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revealed(value) | Self::Own(value) => write!(f, "{value}"),
            Self::Placeholder => f.write_str("?"),
            Self::Voted => f.write_str("X"),
            Self::Abstained | Self::NotVoted => f.write_str("-"),
        }
    }
}

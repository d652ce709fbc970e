//! Room transition function.
//!
//! [`apply`] folds one decoded [`ServerMessage`] into a [`RoomView`]. It is
//! pure: it never blocks, never performs I/O and never decides whether to
//! play a sound. Side effects are the caller's job, driven by the returned
//! [`Transition`] metadata.
//!
//! # Invariants
//!
//! - Identity is set once: a later `WELCOME` never replaces `self_id`.
//! - `ROOM_STATE` replaces votes wholesale; applying the same frame twice
//!   yields the same view as applying it once.
//! - Entering `Result` always clears the pending vote.
//! - `caused_reveal` is true only on the transition into `Result`.
//! - Unknown commands and phases leave the view untouched.

use ninjutsu_proto::{RoomSnapshot, ServerMessage};
use tracing::debug;

use crate::state::{Phase, RoomView, Round};

/// What a transition did, for driving side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// This message assigned the client's identity.
    pub identity_assigned: bool,
    /// Some participant voted.
    pub peer_voted: bool,
    /// The room entered the reveal phase.
    pub caused_reveal: bool,
    /// The view differs from the one passed in.
    pub changed: bool,
}

/// Apply one inbound message to a view, producing the next view.
pub fn apply(view: &RoomView, message: &ServerMessage) -> (RoomView, Transition) {
    let mut next = view.clone();
    let mut transition = Transition::default();

    match message {
        ServerMessage::Welcome { player_id } => match view.self_id {
            None => {
                next.self_id = Some(*player_id);
                transition.identity_assigned = true;
            },
            Some(current) => {
                debug!(current, ignored = *player_id, "ignoring repeated WELCOME");
            },
        },
        ServerMessage::VoteCast { player_id } => {
            debug!(?player_id, "peer voted");
            transition.peer_voted = true;
        },
        ServerMessage::RoomState(RoomSnapshot::Progress(votes)) => {
            next.round = Round::Progress(votes.clone());
        },
        ServerMessage::RoomState(RoomSnapshot::Result(votes)) => {
            transition.caused_reveal = view.phase() != Phase::Result;
            next.round = Round::Result(votes.clone());
            next.pending_vote = None;
        },
        ServerMessage::RoomState(RoomSnapshot::Unrecognized { phase }) => {
            debug!(?phase, "ignoring room state with unrecognized phase");
        },
        ServerMessage::Unknown { command } => {
            debug!(%command, "ignoring unknown command");
        },
    }

    transition.changed = next != *view;
    (next, transition)
}

#[cfg(test)]
mod tests {
    use ninjutsu_proto::{JoinMode, RevealedVote, VoteStatus};

    use super::*;

    fn decode(line: &str) -> ServerMessage {
        ServerMessage::decode(line).unwrap_or(ServerMessage::Unknown { command: line.to_owned() })
    }

    fn run(view: RoomView, lines: &[&str]) -> (RoomView, Vec<Transition>) {
        lines.iter().fold((view, Vec::new()), |(view, mut transitions), line| {
            let (next, transition) = apply(&view, &decode(line));
            transitions.push(transition);
            (next, transitions)
        })
    }

    #[test]
    fn welcome_sets_identity_only() {
        let (view, transitions) = run(RoomView::new(JoinMode::Participant), &["WELCOME 3"]);
        assert_eq!(view.self_id(), Some(3));
        assert_eq!(view.phase(), Phase::Unset);
        assert!(transitions[0].identity_assigned);
        assert!(transitions[0].changed);
    }

    #[test]
    fn welcome_is_set_once() {
        let (view, transitions) =
            run(RoomView::new(JoinMode::Participant), &["WELCOME 7", "WELCOME 9"]);
        assert_eq!(view.self_id(), Some(7));
        assert!(!transitions[1].identity_assigned);
        assert!(!transitions[1].changed);
    }

    #[test]
    fn progress_replaces_votes() {
        let (view, _) = run(RoomView::new(JoinMode::Participant), &[
            "ROOM_STATE PROGRESS 1:true 2:true 4:false",
            "ROOM_STATE PROGRESS 3:false 5:true",
        ]);
        assert_eq!(view.phase(), Phase::Progress);
        assert_eq!(
            view.round(),
            &Round::Progress(vec![
                VoteStatus { player_id: 3, has_voted: false },
                VoteStatus { player_id: 5, has_voted: true },
            ])
        );
    }

    #[test]
    fn progress_keeps_pending_vote() {
        let mut view = RoomView::new(JoinMode::Participant);
        view.record_vote(5);
        let (view, _) = run(view, &["ROOM_STATE PROGRESS 1:true"]);
        assert_eq!(view.pending_vote(), Some(5));
    }

    #[test]
    fn result_clears_pending_and_reveals_once() {
        let mut view = RoomView::new(JoinMode::Participant);
        view.record_vote(8);
        let (view, transitions) = run(view, &[
            "ROOM_STATE PROGRESS 3:true",
            "ROOM_STATE RESULT 3:8 5:5",
            "ROOM_STATE RESULT 3:8 5:5",
        ]);

        assert_eq!(view.pending_vote(), None);
        assert_eq!(
            view.round(),
            &Round::Result(vec![
                RevealedVote { player_id: 3, value: Some(8) },
                RevealedVote { player_id: 5, value: Some(5) },
            ])
        );
        let reveals: Vec<bool> = transitions.iter().map(|t| t.caused_reveal).collect();
        assert_eq!(reveals, vec![false, true, false]);
        assert!(!transitions[2].changed);
    }

    #[test]
    fn reveal_from_unset_counts() {
        let (_, transitions) =
            run(RoomView::new(JoinMode::Observer), &["ROOM_STATE RESULT 1:3"]);
        assert!(transitions[0].caused_reveal);
    }

    #[test]
    fn vote_notification_does_not_change_view() {
        let view = RoomView::new(JoinMode::Participant);
        let (next, transitions) = run(view.clone(), &["VOTE 4", "VOTE"]);
        assert_eq!(next, view);
        assert!(transitions.iter().all(|t| t.peer_voted && !t.changed));
    }

    #[test]
    fn unrecognized_phase_and_command_are_ignored() {
        let (view, _) = run(RoomView::new(JoinMode::Participant), &[
            "WELCOME 2",
            "ROOM_STATE PROGRESS 2:true",
        ]);
        let (next, transitions) =
            run(view.clone(), &["ROOM_STATE BOGUS 2:9", "ROOM_STATE", "KICK 2"]);
        assert_eq!(next, view);
        assert!(transitions.iter().all(|t| *t == Transition::default()));
    }
}

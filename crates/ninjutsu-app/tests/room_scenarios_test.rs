//! Scenario tests for the room state machine.
//!
//! # Oracle Pattern
//!
//! Each scenario drives a connected App with peer lines and user intents,
//! then checks:
//! - phase, identity and pending vote
//! - the exact vote entries, in peer order
//! - the commands that would go out on the wire

use ninjutsu_app::{App, AppAction, AppEvent, Phase, Round, SessionConfig, VoteDisplay};
use ninjutsu_proto::{RevealedVote, RoomEndpoint, ServerMessage, VoteStatus};

/// Create an App whose session channel is already open.
fn connected_app(page: &str) -> App {
    let endpoint = RoomEndpoint::from_page_url(page).unwrap();
    let mut app = App::with_seed(SessionConfig::new(endpoint), 42);
    let _ = app.handle(AppEvent::Connected);
    app
}

/// Feed one raw peer line through decoding into the App.
fn receive(app: &mut App, line: &str) -> Vec<AppAction> {
    match ServerMessage::decode(line) {
        Ok(message) => app.handle(AppEvent::Message(message)),
        Err(_) => vec![],
    }
}

/// Commands in the actions, as wire lines.
fn sent(actions: &[AppAction]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|a| match a {
            AppAction::Send(command) => Some(command.encode()),
            _ => None,
        })
        .collect()
}

#[test]
fn participant_welcome_assigns_identity() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 3");

    assert_eq!(app.view().self_id(), Some(3));
    assert_eq!(app.view().phase(), Phase::Unset);
}

#[test]
fn progress_from_unset() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:true");

    assert_eq!(app.view().phase(), Phase::Progress);
    assert_eq!(
        app.view().round(),
        &Round::Progress(vec![
            VoteStatus { player_id: 3, has_voted: false },
            VoteStatus { player_id: 5, has_voted: true },
        ])
    );
}

#[test]
fn vote_then_result() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 3");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:true");

    let actions = app.vote(8);
    assert_eq!(sent(&actions), vec!["VOTE 8"]);
    assert_eq!(app.view().pending_vote(), Some(8));

    receive(&mut app, "ROOM_STATE RESULT 3:8 5:5");
    assert_eq!(app.view().phase(), Phase::Result);
    assert_eq!(app.view().pending_vote(), None);
    assert_eq!(
        app.view().round(),
        &Round::Result(vec![
            RevealedVote { player_id: 3, value: Some(8) },
            RevealedVote { player_id: 5, value: Some(5) },
        ])
    );
}

#[test]
fn bogus_phase_leaves_view_unchanged() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:true");
    let before = app.view().clone();

    let actions = receive(&mut app, "ROOM_STATE BOGUS");

    assert_eq!(app.view(), &before);
    assert!(actions.is_empty());
}

#[test]
fn malformed_entry_is_skipped() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false notanentry");

    assert_eq!(
        app.view().round(),
        &Round::Progress(vec![VoteStatus { player_id: 3, has_voted: false }])
    );
}

#[test]
fn vote_crossing_room_state_reconciles() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 3");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:false");

    // Vote goes out while the peer is still sending the old state.
    let _ = app.vote(5);
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:true");

    let own = app.view().displayed_votes()[0];
    assert!(own.is_self);
    assert_eq!(own.display, VoteDisplay::Own(5));

    receive(&mut app, "VOTE 3");
    receive(&mut app, "ROOM_STATE PROGRESS 3:true 5:true");
    assert_eq!(app.view().displayed_votes()[0].display, VoteDisplay::Own(5));
}

#[test]
fn observer_round_trip() {
    let mut app = connected_app("http://localhost:8080/room/r1?observer");
    receive(&mut app, "ROOM_STATE PROGRESS 1:true 2:false");

    let shown: Vec<String> =
        app.view().displayed_votes().iter().map(|v| v.display.to_string()).collect();
    assert_eq!(shown, vec!["X", "-"]);
    assert!(sent(&app.vote(3)).is_empty());

    receive(&mut app, "ROOM_STATE RESULT 1:13 2:None");
    let shown: Vec<String> =
        app.view().displayed_votes().iter().map(|v| v.display.to_string()).collect();
    assert_eq!(shown, vec!["13", "-"]);
}

#[test]
fn reset_waits_for_peer() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 1");
    receive(&mut app, "ROOM_STATE RESULT 1:3");

    let actions = app.reset();
    assert_eq!(sent(&actions), vec!["RESET"]);
    assert_eq!(app.view().phase(), Phase::Result);

    receive(&mut app, "ROOM_STATE PROGRESS 1:false");
    assert_eq!(app.view().phase(), Phase::Progress);
    assert_eq!(app.view().displayed_votes()[0].display, VoteDisplay::Placeholder);
}

//! Rendering tests against ratatui's test backend.
//!
//! Each test drives an [`App`] into a given room state and checks the text
//! the terminal would show.

use ninjutsu_app::{App, AppEvent, KeyInput, SessionConfig};
use ninjutsu_proto::{RoomEndpoint, ServerMessage};
use ninjutsu_tui::ui;
use ratatui::{Terminal, backend::TestBackend};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 14;

fn connected_app(page: &str) -> App {
    let endpoint = RoomEndpoint::from_page_url(page).unwrap();
    let mut app = App::with_seed(SessionConfig::new(endpoint), 7);
    let _ = app.handle(AppEvent::Connected);
    app
}

fn receive(app: &mut App, line: &str) {
    let _ = app.handle(AppEvent::Message(ServerMessage::decode(line).unwrap()));
}

/// Render the app and return the screen, one string per row.
fn screen(app: &App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..HEIGHT)
        .map(|y| (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect::<String>())
        .collect()
}

/// Row contents without the board border.
fn inner(row: &str) -> &str {
    row.trim_matches(|c: char| c.is_whitespace() || c == '│')
}

fn row_with<'a>(screen: &'a [String], needle: &str) -> &'a str {
    screen
        .iter()
        .find(|row| row.contains(needle))
        .unwrap_or_else(|| panic!("no row contains {needle:?}:\n{}", screen.join("\n")))
}

#[test]
fn empty_room() {
    let app = connected_app("http://localhost:8080/room/r1");
    let screen = screen(&app);

    row_with(&screen, "ws://localhost:8080/room/r1/ws");
    row_with(&screen, "No participants yet");
    row_with(&screen, "waiting");
    row_with(&screen, "Connected");
}

#[test]
fn progress_board_hides_peer_values() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 3");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:true 6:false");
    let screen = screen(&app);

    assert!(inner(row_with(&screen, "player 3 (you)")).ends_with('?'));
    assert!(inner(row_with(&screen, "player 5")).ends_with('X'));
    assert!(inner(row_with(&screen, "player 6")).ends_with('-'));
    row_with(&screen, "voting");
}

#[test]
fn own_pending_vote_is_shown() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 3");
    receive(&mut app, "ROOM_STATE PROGRESS 3:false 5:true");
    let _ = app.handle(AppEvent::Key(KeyInput::Char('7')));
    let screen = screen(&app);

    assert!(inner(row_with(&screen, "player 3 (you)")).ends_with("13"));
    row_with(&screen, "Voted 13");
}

#[test]
fn results_are_revealed() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "WELCOME 3");
    receive(&mut app, "ROOM_STATE RESULT 3:8 5:None");
    let screen = screen(&app);

    row_with(&screen, "Results");
    row_with(&screen, "revealed");
    assert!(inner(row_with(&screen, "player 3 (you)")).ends_with('8'));
    assert!(inner(row_with(&screen, "player 5")).ends_with('-'));
}

#[test]
fn observer_has_no_deck_hint() {
    let mut app = connected_app("http://localhost:8080/room/r1?observer");
    receive(&mut app, "ROOM_STATE PROGRESS 1:true");
    let screen = screen(&app);

    row_with(&screen, "observer");
    let hint = row_with(&screen, "q quit");
    assert!(!hint.contains("1=0"));
}

#[test]
fn participant_deck_hint() {
    let app = connected_app("http://localhost:8080/room/r1");
    let screen = screen(&app);

    let hint = row_with(&screen, "q quit");
    assert!(hint.contains("1=0"));
    assert!(hint.contains("0=100"));
}

#[test]
fn lost_connection_keeps_board() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    receive(&mut app, "ROOM_STATE PROGRESS 1:true");
    let _ = app.handle(AppEvent::Disconnected { reason: "connection closed".into() });
    let screen = screen(&app);

    row_with(&screen, "Connection lost");
    row_with(&screen, "Disconnected: connection closed");
    row_with(&screen, "player 1");
}

#[test]
fn sound_toggle_is_shown() {
    let mut app = connected_app("http://localhost:8080/room/r1");
    row_with(&screen(&app), "sound on");

    let _ = app.handle(AppEvent::Key(KeyInput::Char('s')));
    row_with(&screen(&app), "sound off");
}

//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod header;
mod help;
mod status;
mod votes;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const HEADER_HEIGHT: u16 = 3;
    const BOARD_MIN_HEIGHT: u16 = 3;
    const HELP_HEIGHT: u16 = 1;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(BOARD_MIN_HEIGHT),
            Constraint::Length(HELP_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, board_area, help_area, status_area] = chunks.as_ref() else {
        return;
    };

    header::render(frame, app, *header_area);
    votes::render(frame, app, *board_area);
    help::render(frame, app, *help_area);
    status::render(frame, app, *status_area);
}

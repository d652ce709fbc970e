//! Room header
//!
//! Shows which room this is, how we joined it and the round phase.

use ninjutsu_app::{App, Phase};
use ninjutsu_proto::JoinMode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the room header.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();

    let identity = match (view.mode(), view.self_id()) {
        (JoinMode::Observer, _) => "observer".to_owned(),
        (JoinMode::Participant, Some(id)) => format!("player {id}"),
        (JoinMode::Participant, None) => "joining".to_owned(),
    };

    let (phase, phase_style) = match view.phase() {
        Phase::Unset => ("waiting", Style::default().fg(Color::DarkGray)),
        Phase::Progress => ("voting", Style::default().fg(Color::Yellow)),
        Phase::Result => ("revealed", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(identity, Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(phase, phase_style),
    ]);

    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", app.endpoint()));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

//! Key hints

use ninjutsu_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

/// Digit keys in deck order.
const DECK_KEYS: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

/// Render the key hint line.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(Line::from(hint(app))).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Key hints for the current mode.
fn hint(app: &App) -> String {
    let mut parts = Vec::new();
    if app.view().mode().can_vote() {
        let deck: Vec<String> = DECK_KEYS
            .iter()
            .zip(app.deck().values())
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        parts.push(deck.join(" "));
    }
    parts.push("r reset".to_owned());
    parts.push("s sound".to_owned());
    parts.push("c reconnect".to_owned());
    parts.push("q quit".to_owned());
    format!(" {}", parts.join(" | "))
}

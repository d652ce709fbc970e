//! Vote board
//!
//! One row per participant, in the order the room reported them.

use ninjutsu_app::{App, DisplayedVote, Phase, VoteDisplay};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const SELF_MARKER: &str = " (you)";

/// Render the vote board.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let title = match view.phase() {
        Phase::Result => " Results ",
        Phase::Unset | Phase::Progress => " Votes ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let displayed = view.displayed_votes();
    let items: Vec<ListItem> = if displayed.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No participants yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        displayed.iter().map(row).collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let visible_items: Vec<_> = items.into_iter().take(visible_height).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn row(vote: &DisplayedVote) -> ListItem<'static> {
    let name_style = if vote.is_self {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value_style = match vote.display {
        VoteDisplay::Revealed(_) | VoteDisplay::Own(_) => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        },
        VoteDisplay::Voted => Style::default().fg(Color::Yellow),
        VoteDisplay::Placeholder | VoteDisplay::Abstained | VoteDisplay::NotVoted => {
            Style::default().fg(Color::DarkGray)
        },
    };

    let name = format!("player {}{}", vote.player_id, if vote.is_self { SELF_MARKER } else { "" });

    ListItem::new(Line::from(vec![
        Span::styled(format!(" {name:<20}"), name_style),
        Span::styled(vote.display.to_string(), value_style),
    ]))
}

//! Landing screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{colors, key_hints};

/// Renders the welcome text and the "Get Started" action
pub fn render(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Welcome
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Star Wars Starship Explorer",
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Browse every starship in the galaxy. Search by name, filter by manufacturer \
             and crew size, and open any ship to see its pilots and films.",
            Style::default().fg(colors::PRIMARY),
        )),
        Line::default(),
        Line::from(Span::styled(
            "[ Get Started ]",
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, chunks[0]);
    frame.render_widget(
        Paragraph::new(key_hints(&[
            ("Enter", "Get started"),
            ("d", "Dashboard"),
            ("l", "Login"),
            ("?", "Help"),
            ("q", "Quit"),
        ])),
        chunks[1],
    );
}

//! Login screen rendering
//!
//! Shows the username and password fields, the demo credential hint, the
//! inline short-password hint and the error from the last submission.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{colors, key_hints};
use crate::app::App;
use crate::session::{LoginField, DEMO_PASSWORD, DEMO_USERNAME};

/// Renders the login form
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.login_form;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Form
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let mut lines = vec![
        Line::default(),
        field_line(
            "Username",
            &form.username,
            form.focus == LoginField::Username,
        ),
        field_line(
            "Password",
            &"*".repeat(form.password.chars().count()),
            form.focus == LoginField::Password,
        ),
    ];

    if let Some(hint) = form.password_hint() {
        lines.push(Line::from(Span::styled(
            format!("             {}", hint),
            Style::default().fg(colors::SELECTED),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("  Demo credentials: {} / {}", DEMO_USERNAME, DEMO_PASSWORD),
        Style::default().fg(colors::MUTED),
    )));

    if let Some(error) = &form.error {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", error),
                Style::default()
                    .fg(colors::ERROR)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (type to dismiss)", Style::default().fg(colors::MUTED)),
        ]));
    }

    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);
    frame.render_widget(
        Paragraph::new(key_hints(&[
            ("Tab", "Switch field"),
            ("Enter", "Sign in"),
            ("Esc", "Back"),
        ])),
        chunks[1],
    );
}

fn field_line(label: &'static str, value: &str, focused: bool) -> Line<'static> {
    let (cursor, style) = if focused {
        ("\u{25B8} ", Style::default().fg(colors::SELECTED))
    } else {
        ("  ", Style::default().fg(colors::SECONDARY))
    };
    let caret = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(cursor, style),
        Span::styled(format!("{:<10} ", label), style),
        Span::styled(
            format!("{}{}", value, caret),
            Style::default().fg(colors::PRIMARY),
        ),
    ])
}

//! UI rendering module for the starship explorer
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod landing;
pub mod login;
pub mod starship_detail;
pub mod starship_list;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};

pub use help_overlay::render as render_help_overlay;
pub use landing::render as render_landing;
pub use login::render as render_login;
pub use starship_detail::render as render_starship_detail;
pub use starship_list::render as render_starship_list;

/// Color scheme shared by all screens
pub(crate) mod colors {
    use ratatui::style::Color;

    /// Titles and borders
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Hints and placeholders
    pub const MUTED: Color = Color::DarkGray;
    /// Key names in help lines
    pub const KEY: Color = Color::Yellow;
    /// Error messages
    pub const ERROR: Color = Color::Red;
    /// Loading indicators
    pub const LOADING: Color = Color::Cyan;
    /// Highlighted row or field
    pub const SELECTED: Color = Color::Yellow;
}

/// Renders the current screen, with the help overlay on top when shown
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Screen
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.screen {
        Screen::Landing => render_landing(frame, chunks[1]),
        Screen::Login => render_login(frame, app, chunks[1]),
        Screen::Dashboard => render_starship_list(frame, app, chunks[1]),
        Screen::Detail => render_starship_detail(frame, app, chunks[1]),
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Renders the one-line header with the Home / Dashboard / Login actions
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let account = if app.session.is_authenticated() {
        "Logout"
    } else {
        "Login"
    };

    let item = |label: &'static str, active: bool| {
        let style = if active {
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::SECONDARY)
        };
        Span::styled(format!(" {} ", label), style)
    };

    let line = Line::from(vec![
        Span::styled(
            "STARSHIPS",
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        item("Home", app.screen == Screen::Landing),
        item("Dashboard", app.screen == Screen::Dashboard),
        item(account, app.screen == Screen::Login),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Builds a help line of `key description` pairs
pub(crate) fn key_hints(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, description) in pairs {
        spans.push(Span::styled(*key, Style::default().fg(colors::KEY)));
        spans.push(Span::styled(
            format!(" {}  ", description),
            Style::default().fg(colors::MUTED),
        ));
    }
    Line::from(spans)
}

/// Helper to read a rendered TestBackend buffer as one string
#[cfg(test)]
pub(crate) fn buffer_text(backend: &ratatui::backend::TestBackend) -> String {
    backend
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

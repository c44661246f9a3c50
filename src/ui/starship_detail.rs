//! Starship detail screen rendering
//!
//! Renders the starship record with its summary badges, then the pilots and
//! films sections. Each part has its own loading indicator and fallback text
//! so partial results show as soon as they arrive.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

use super::{colors, key_hints};
use crate::app::App;
use crate::data::{resource_label, StarshipDetail};
use crate::detail::{DetailView, LoadState};

/// Renders the detail screen for the app's current detail view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Content
            Constraint::Length(1), // Help text
        ])
        .split(area);

    match (&app.detail, &app.detail_error) {
        (Some(view), _) => render_view(frame, view, chunks[0]),
        (None, Some(error)) => render_error(frame, error, chunks[0]),
        (None, None) => render_error(frame, "No starship selected", chunks[0]),
    }

    frame.render_widget(
        Paragraph::new(key_hints(&[
            ("Esc", "Back"),
            ("p", "Pilots"),
            ("f", "Films"),
            ("?", "Help"),
            ("q", "Quit"),
        ])),
        chunks[1],
    );
}

fn render_view(frame: &mut Frame, view: &DetailView, area: Rect) {
    let title = view
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Starship {}", view.id));

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let mut lines = match &view.starship {
        LoadState::Loading => vec![loading_line("Loading starship details...")],
        LoadState::Failed(message) => vec![error_line(message)],
        LoadState::Loaded(detail) => build_summary_lines(detail),
    };

    // Sections only load after the record, so they stay hidden until then
    if view.starship.loaded().is_some() {
        if let Some(pilots) = &view.pilots {
            lines.push(Line::default());
            lines.extend(build_section_lines(
                "Pilots",
                pilots,
                "Loading pilots...",
                "No pilots available",
            ));
        }
        if let Some(films) = &view.films {
            lines.push(Line::default());
            lines.extend(build_section_lines(
                "Films",
                films,
                "Loading films...",
                "No films available",
            ));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Link: ", Style::default().fg(colors::MUTED)),
        Span::styled(view.link(), Style::default().fg(colors::SECONDARY)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(main_block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Model line, badges and the dimensions line for a loaded record
fn build_summary_lines(detail: &StarshipDetail) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(detail.model.clone(), Style::default().fg(colors::PRIMARY)),
            Span::styled(
                format!("  by {}", detail.manufacturer),
                Style::default().fg(colors::SECONDARY),
            ),
        ]),
        Line::default(),
        Line::from(vec![
            badge("Cost", &format!("{} credits", detail.cost_in_credits), Color::Yellow),
            Span::raw(" "),
            badge("Crew", &detail.crew, Color::Green),
            Span::raw(" "),
            badge("Passengers", &detail.passengers, Color::Blue),
        ]),
        Line::default(),
        Line::from(vec![
            stat("Length", &detail.length),
            stat("Hyperdrive", &detail.hyperdrive_rating),
            stat("Max speed", &detail.max_atmosphering_speed),
            stat("Class", &detail.starship_class),
        ]),
    ]
}

fn badge(label: &str, value: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {}: {} ", label, value),
        Style::default().fg(Color::Black).bg(color),
    )
}

fn stat(label: &str, value: &str) -> Span<'static> {
    Span::styled(
        format!("{}: {}   ", label, value),
        Style::default().fg(colors::SECONDARY),
    )
}

/// Heading plus one line per related record, or a loader or fallback
fn build_section_lines(
    heading: &'static str,
    state: &LoadState<Vec<Value>>,
    loading: &'static str,
    empty: &'static str,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        heading,
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    ))];

    match state {
        LoadState::Loading => lines.push(loading_line(loading)),
        LoadState::Failed(message) => lines.push(error_line(message)),
        LoadState::Loaded(records) if records.is_empty() => lines.push(Line::from(
            Span::styled(format!("  {}", empty), Style::default().fg(colors::MUTED)),
        )),
        LoadState::Loaded(records) => {
            for record in records {
                let label = resource_label(record).unwrap_or("Unknown");
                lines.push(Line::from(vec![
                    Span::styled("  \u{2022} ", Style::default().fg(colors::MUTED)), // •
                    Span::styled(label.to_string(), Style::default().fg(colors::PRIMARY)),
                ]));
            }
        }
    }

    lines
}

fn loading_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(colors::LOADING),
    ))
}

fn error_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(colors::ERROR),
    ))
}

fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(" Starship ");

    let paragraph = Paragraph::new(vec![Line::default(), error_line(message)]).block(block);
    frame.render_widget(paragraph, area);
}

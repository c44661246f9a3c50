//! Dashboard screen rendering
//!
//! Renders the filter bar, the current page of starships as a table, the
//! pagination line with the shareable link, and the key hints.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{colors, key_hints};
use crate::app::App;
use crate::detail::LoadState;
use crate::listing::{ListPage, SortOrder};

/// Renders the dashboard
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - Application state holding the collection and filters
/// * `area` - Area below the header
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filters
            Constraint::Min(5),    // Table
            Constraint::Length(2), // Pagination and link
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_filters(frame, app, chunks[0]);

    match &app.starships {
        None | Some(LoadState::Loading) => {
            render_message(frame, chunks[1], "Loading starships...", colors::LOADING)
        }
        Some(LoadState::Failed(message)) => {
            render_message(frame, chunks[1], message, colors::ERROR)
        }
        Some(LoadState::Loaded(_)) => {
            let page = app.list_page();
            if page.items.is_empty() {
                render_message(
                    frame,
                    chunks[1],
                    "No starships match the current filters",
                    colors::MUTED,
                );
            } else {
                render_table(frame, &page, app.selected_row, chunks[1]);
            }
            render_pagination(frame, app, &page, chunks[2]);
        }
    }

    render_help(frame, app, chunks[3]);
}

/// Renders search, sort, manufacturer and crew filters
fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.list.query();

    let search_style = if app.search_mode {
        Style::default().fg(colors::SELECTED)
    } else {
        Style::default().fg(colors::PRIMARY)
    };
    let search = if app.search_mode {
        format!("{}_", query.search)
    } else if query.search.is_empty() {
        "-".to_string()
    } else {
        query.search.clone()
    };

    let sort = match query.sort {
        SortOrder::Ascending => "A-Z",
        SortOrder::Descending => "Z-A",
    };
    let manufacturer = query.manufacturer.as_deref().unwrap_or("All");
    let crew = query
        .min_crew
        .map(|n| format!("{}+", n))
        .unwrap_or_else(|| "Any".to_string());

    let label = |text: &'static str| Span::styled(text, Style::default().fg(colors::SECONDARY));
    let line = Line::from(vec![
        label("Search: "),
        Span::styled(search, search_style),
        Span::raw("   "),
        label("Sort: "),
        Span::styled(sort, Style::default().fg(colors::PRIMARY)),
        Span::raw("   "),
        label("Manufacturer: "),
        Span::styled(manufacturer.to_string(), Style::default().fg(colors::PRIMARY)),
        Span::raw("   "),
        label("Min crew: "),
        Span::styled(crew, Style::default().fg(colors::PRIMARY)),
    ]);

    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders the starship rows of the current page
fn render_table(frame: &mut Frame, page: &ListPage<'_>, selected_row: usize, area: Rect) {
    let selected = selected_row.min(page.items.len().saturating_sub(1));

    let header = Row::new(["", "Name", "Model", "Manufacturer", "Crew"]).style(
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    );

    let rows = page.items.iter().enumerate().map(|(index, ship)| {
        let is_selected = index == selected;
        let cursor = if is_selected { "\u{25B8}" } else { " " }; // ▸
        let style = if is_selected {
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::PRIMARY)
        };

        Row::new(vec![
            Cell::from(cursor),
            Cell::from(ship.name.clone()),
            Cell::from(ship.model.clone()),
            Cell::from(ship.manufacturer.clone()),
            Cell::from(ship.crew.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(1),
        Constraint::Percentage(28),
        Constraint::Percentage(28),
        Constraint::Percentage(32),
        Constraint::Percentage(12),
    ];

    let block = Block::default()
        .title(" Starships ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Renders page position and the shareable link
fn render_pagination(frame: &mut Frame, app: &App, page: &ListPage<'_>, area: Rect) {
    let mut position = vec![
        Span::styled(
            format!("Page {} of {}", page.page, page.total_pages.max(1)),
            Style::default().fg(colors::PRIMARY),
        ),
        Span::styled(
            format!("  ({} starships)", page.total_matches),
            Style::default().fg(colors::SECONDARY),
        ),
    ];

    if let Some(last_refresh) = app.last_refresh {
        let mins_ago = (Local::now() - last_refresh).num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else {
            format!(" │ Data: {}m ago", mins_ago)
        };
        position.push(Span::styled(
            freshness_text,
            Style::default().fg(colors::MUTED),
        ));
    }

    let lines = vec![
        Line::from(position),
        Line::from(vec![
            Span::styled("Link: ", Style::default().fg(colors::MUTED)),
            Span::styled(app.list.link(), Style::default().fg(colors::SECONDARY)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
    let block = Block::default()
        .title(" Starships ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ])
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.search_mode {
        key_hints(&[("Enter/Esc", "Done"), ("Backspace", "Delete")])
    } else {
        key_hints(&[
            ("/", "Search"),
            ("s", "Sort"),
            ("m", "Maker"),
            ("+/-", "Crew"),
            ("←/→", "Page"),
            ("Enter", "Details"),
            ("?", "Help"),
        ])
    };
    frame.render_widget(Paragraph::new(hints), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Screen, LIST_ERROR_MESSAGE};
    use crate::cli::StartupConfig;
    use crate::data::StarshipSummary;
    use ratatui::{backend::TestBackend, Terminal};

    fn ship(name: &str, manufacturer: &str, crew: &str) -> StarshipSummary {
        StarshipSummary {
            name: name.to_string(),
            model: format!("{} model", name),
            manufacturer: manufacturer.to_string(),
            crew: crew.to_string(),
            url: String::new(),
        }
    }

    fn dashboard_app(ships: Vec<StarshipSummary>) -> App {
        let mut app = App::new(&StartupConfig::default());
        app.session.login();
        app.screen = Screen::Dashboard;
        app.starships = Some(LoadState::Loaded(ships));
        app
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, app, area)
            })
            .unwrap();
        crate::ui::buffer_text(terminal.backend())
    }

    #[test]
    fn test_list_renders_rows_and_link() {
        let app = dashboard_app(vec![
            ship("X-wing", "Incom Corporation", "1"),
            ship("Millennium Falcon", "Corellian Engineering Corporation", "4"),
        ]);

        let content = draw(&app);
        assert!(content.contains("Millennium Falcon"));
        assert!(content.contains("X-wing"));
        assert!(content.contains("Page 1 of 1"));
        assert!(content.contains("/dashboard?search=&sort=asc&manufacturer=&crewSize="));
    }

    #[test]
    fn test_list_renders_empty_filter_result() {
        let mut app = dashboard_app(vec![ship("X-wing", "Incom Corporation", "1")]);
        app.list.set_search("falcon");

        assert!(draw(&app).contains("No starships match the current filters"));
    }

    #[test]
    fn test_list_renders_loading_and_error() {
        let mut app = dashboard_app(Vec::new());
        app.starships = Some(LoadState::Loading);
        assert!(draw(&app).contains("Loading starships..."));

        app.starships = Some(LoadState::Failed(LIST_ERROR_MESSAGE.to_string()));
        assert!(draw(&app).contains("Error fetching data. Try again later."));
    }

    #[test]
    fn test_list_shows_active_filters() {
        let mut app = dashboard_app(vec![ship("X-wing", "Incom Corporation", "1")]);
        app.list.set_manufacturer(Some("Incom Corporation".to_string()));
        app.list.set_min_crew(Some(1));
        app.list.toggle_sort();

        let content = draw(&app);
        assert!(content.contains("Z-A"));
        assert!(content.contains("1+"));
        assert!(content.contains("Manufacturer: Incom Corporation"));
    }
}

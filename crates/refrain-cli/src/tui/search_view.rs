use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use refrain_core::{highlight, AlbumFilter, MatchRecord, Segment};

use super::App;

/// Render the search screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Album filter
            Constraint::Length(1), // Status / summary
            Constraint::Min(5),    // Results
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_filter(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_results(frame, app, chunks[4]);
    render_help(frame, chunks[5]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Lyrics Search",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("    {}", app.backend_url),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let query = &app.controller.state().query;
    let marker = if app.is_searching() { "Search \u{2026}" } else { "Search" };

    let input = Paragraph::new(query.as_str())
        .block(Block::default().borders(Borders::ALL).title(marker));
    frame.render_widget(input, area);

    // Cursor after the last character, inside the border.
    let typed = u16::try_from(query.chars().count()).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2));
    frame.set_cursor_position((x, area.y + 1));
}

fn render_filter(frame: &mut Frame, app: &App, area: Rect) {
    let selected = &app.controller.state().album;
    let mut spans = vec![Span::styled("  Filter: ", Style::default().fg(Color::DarkGray))];

    for option in AlbumFilter::options(app.controller.known_albums()) {
        let label = if option.is_all() {
            "All Albums".to_string()
        } else {
            option.to_string()
        };
        let style = if &option == selected {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    let line = if let Some(message) = state.status.error_message() {
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if state.query.is_empty() {
        Line::default()
    } else if app.is_searching() {
        Line::from(Span::styled("  Searching...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(
            format!("  {}", state.view.summary_line()),
            Style::default().fg(Color::LightMagenta),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let view = &state.view;

    let lines: Vec<Line<'_>> = if state.query.is_empty() {
        vec![
            Line::default(),
            Line::from(Span::styled(
                "Start typing to search lyrics...",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ]
    } else if app.is_searching() || state.status.error_message().is_some() {
        Vec::new()
    } else if view.is_empty() {
        vec![
            Line::default(),
            Line::from(format!("No results found for \"{}\"", state.query)).centered(),
            Line::from(Span::styled(
                "Try a different search term",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ]
    } else {
        let mut lines = Vec::new();
        for record in view.filtered.iter().skip(app.scroll) {
            lines.extend(record_lines(record, &state.query));
            lines.push(Line::default());
        }
        lines.push(
            Line::from(vec![
                Span::raw("Showing all matches for "),
                Span::styled(
                    format!("\"{}\"", state.query),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
            .centered(),
        );
        lines
    };

    let title = if view.filtered.len() > 1 && !app.is_searching() {
        format!("Results [{} of {}]", app.scroll + 1, view.filtered.len())
    } else {
        "Results".to_string()
    };

    let results = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(results, area);
}

/// Lines for one match: title and album, context, and the highlighted hit.
fn record_lines<'a>(record: &'a MatchRecord, query: &str) -> Vec<Line<'a>> {
    let context = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            record.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", record.album.to_uppercase()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    if let Some(before) = record.before_line() {
        lines.push(Line::from(Span::styled(format!("  {}", before), context)));
    }
    lines.push(highlighted_line(&highlight(&record.line, query)));
    if let Some(after) = record.after_line() {
        lines.push(Line::from(Span::styled(format!("  {}", after), context)));
    }

    lines
}

/// The hit line, with matched segments picked out.
fn highlighted_line(segments: &[Segment]) -> Line<'static> {
    let mut spans = vec![Span::styled("\u{2503} ", Style::default().fg(Color::Magenta))];
    spans.extend(segments.iter().map(|segment| {
        if segment.is_match {
            Span::styled(
                segment.text.clone(),
                Style::default().fg(Color::Black).bg(Color::LightMagenta),
            )
        } else {
            Span::raw(segment.text.clone())
        }
    }));
    Line::from(spans)
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "  Type to search  Tab/S-Tab Album  \u{2191}/\u{2193} Scroll  Ctrl-U Clear  Esc Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

use std::io::IsTerminal;

use anyhow::Result;
use crossterm::style::Stylize;
use refrain_core::{highlight, AlbumFilter, MatchRecord, ResultsView, Segment};
use refrain_search::{Config, SearchClient};

/// Run a single search and print the filtered matches.
pub async fn run_search(config: &Config, query: &str, album: &AlbumFilter, json: bool) -> Result<()> {
    if query.trim().is_empty() {
        println!("Nothing to search for. Try: refrain search \"love\"");
        return Ok(());
    }

    let client = SearchClient::from_config(config)?;
    let results = client.search(query).await?;
    let view = ResultsView::derive(&results, album);

    if json {
        println!("{}", serde_json::to_string_pretty(&view.filtered)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No results found for \"{}\"", query);
        println!("Try a different search term");
        return Ok(());
    }

    let styled = std::io::stdout().is_terminal();

    println!("{}\n", view.summary_line());
    for record in &view.filtered {
        for line in record_lines(record, query, styled) {
            println!("{}", line);
        }
        println!();
    }
    println!("Showing all matches for \"{}\"", query);

    Ok(())
}

/// The printed lines for one match: heading, context, and the hit.
fn record_lines(record: &MatchRecord, query: &str, styled: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);

    if styled {
        lines.push(format!(
            "{} {}",
            record.title.as_str().bold(),
            format!("({})", record.album).dark_grey()
        ));
    } else {
        lines.push(format!("{} ({})", record.title, record.album));
    }

    if let Some(before) = record.before_line() {
        lines.push(context_line(before, styled));
    }
    lines.push(format!("  > {}", render_segments(&highlight(&record.line, query), styled)));
    if let Some(after) = record.after_line() {
        lines.push(context_line(after, styled));
    }

    lines
}

fn context_line(text: &str, styled: bool) -> String {
    if styled {
        format!("    {}", text.dim().italic())
    } else {
        format!("    {}", text)
    }
}

fn render_segments(segments: &[Segment], styled: bool) -> String {
    segments
        .iter()
        .map(|segment| {
            if styled && segment.is_match {
                segment.text.as_str().black().on_magenta().to_string()
            } else {
                segment.text.clone()
            }
        })
        .collect()
}

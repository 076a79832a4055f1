//! Query highlighting for lyric lines.
//!
//! A line is split into [`Segment`]s that together cover the whole line,
//! with the case-insensitive occurrences of the query marked. The query is
//! always escaped before it reaches the regex engine, so `.` or `(` in a
//! search match themselves.

use regex::RegexBuilder;
use serde::Serialize;

/// A run of text within a highlighted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Split `text` into segments, marking every occurrence of `query`.
///
/// A blank query, an empty text, or a query that never occurs yields a
/// single non-matching segment holding `text`. Segment texts concatenate
/// back to `text` exactly.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if text.is_empty() || query.trim().is_empty() {
        return vec![Segment::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            // Only reachable for queries beyond the regex size limit.
            log::debug!("Not highlighting query of {} bytes: {}", query.len(), e);
            return vec![Segment::plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::plain(&text[cursor..found.start()]));
        }
        segments.push(Segment::matched(found.as_str()));
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

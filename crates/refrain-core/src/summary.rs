//! The derived view a front-end renders from the current results.

use std::collections::HashSet;

use crate::filter::filter;
use crate::model::{AlbumFilter, MatchRecord, ResultSet};

/// Results narrowed by the album filter, with their summary counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    pub filtered: ResultSet,
    /// Distinct song titles among `filtered`.
    pub unique_song_count: usize,
    /// Number of matching lines, i.e. `filtered.len()`.
    pub total_line_count: usize,
}

impl ResultsView {
    pub fn derive(results: &[MatchRecord], album: &AlbumFilter) -> Self {
        let filtered = filter(results, album);
        let unique_song_count = filtered
            .iter()
            .map(|r| r.title.as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_line_count = filtered.len();
        Self {
            filtered,
            unique_song_count,
            total_line_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// e.g. `Found in 2 songs · 1 line`.
    pub fn summary_line(&self) -> String {
        format!(
            "Found in {} \u{b7} {}",
            count_noun(self.unique_song_count, "song", "songs"),
            count_noun(self.total_line_count, "line", "lines")
        )
    }
}

fn count_noun(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        vec![
            MatchRecord::new("Get You", "Freudian", "a"),
            MatchRecord::new("Get You", "Freudian", "b"),
            MatchRecord::new("Best Part", "Freudian", "c"),
            MatchRecord::new("Superposition", "Case Study 01", "d"),
        ]
    }

    #[test]
    fn test_counts_all() {
        let view = ResultsView::derive(&sample(), &AlbumFilter::All);
        assert_eq!(view.total_line_count, 4);
        assert_eq!(view.unique_song_count, 3);
    }

    #[test]
    fn test_counts_follow_filter() {
        let view = ResultsView::derive(&sample(), &AlbumFilter::album("Case Study 01"));
        assert_eq!(view.total_line_count, 1);
        assert_eq!(view.unique_song_count, 1);
        assert_eq!(view.filtered[0].title, "Superposition");
    }

    #[test]
    fn test_summary_line_pluralisation() {
        let view = ResultsView::derive(&sample(), &AlbumFilter::album("Freudian"));
        assert_eq!(view.summary_line(), "Found in 2 songs \u{b7} 3 lines");

        let view = ResultsView::derive(&sample(), &AlbumFilter::album("Case Study 01"));
        assert_eq!(view.summary_line(), "Found in 1 song \u{b7} 1 line");

        let view = ResultsView::default();
        assert!(view.is_empty());
        assert_eq!(view.summary_line(), "Found in 0 songs \u{b7} 0 lines");
    }
}

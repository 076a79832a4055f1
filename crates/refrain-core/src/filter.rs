//! Album filtering over a result set.

use crate::model::{AlbumFilter, MatchRecord, ResultSet};

/// Narrow `results` to the records on `album`.
///
/// [`AlbumFilter::All`] keeps every record. Otherwise only records whose
/// album equals the filter value exactly are kept. Order is preserved and
/// the input is left untouched.
pub fn filter(results: &[MatchRecord], album: &AlbumFilter) -> ResultSet {
    match album {
        AlbumFilter::All => results.to_vec(),
        AlbumFilter::Album(_) => results
            .iter()
            .filter(|record| album.matches(&record.album))
            .cloned()
            .collect(),
    }
}

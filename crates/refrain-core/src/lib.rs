//! Core domain model for refrain.
//!
//! This crate defines the lyric match records returned by the search
//! backend, the album filter, the search status, and the pure functions
//! that derive what a front-end shows: album filtering, result summaries
//! and query highlighting. Nothing in here performs I/O.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod filter;
pub mod highlight;
pub mod model;
pub mod summary;

pub use error::{Error, Result};
pub use filter::filter;
pub use highlight::{highlight, Segment};
pub use model::{AlbumFilter, MatchRecord, ResultSet, SearchStatus};
pub use summary::ResultsView;

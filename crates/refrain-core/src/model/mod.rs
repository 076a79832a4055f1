pub mod album;
pub mod record;
pub mod status;

pub use album::AlbumFilter;
pub use record::{MatchRecord, ResultSet};
pub use status::SearchStatus;

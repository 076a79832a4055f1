pub mod albums;
pub mod config;
pub mod ping;
pub mod search;

pub use albums::list_albums;
pub use ping::ping;
pub use search::run_search;

//! Search plumbing for refrain.
//!
//! Talks to the lyrics search backend over HTTP, debounces keystrokes into
//! searches, and drives the search state machine a front-end renders from.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod backend;
pub mod client;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;

pub use backend::SearchBackend;
pub use client::SearchClient;
pub use config::Config;
pub use controller::{ControllerEvent, SearchController, SearchState};
pub use debounce::Debouncer;
pub use error::{SearchError, SearchResult};

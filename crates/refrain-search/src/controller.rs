//! The search state machine behind the front-end.
//!
//! [`SearchController`] owns the query, the current results, the album
//! filter and the search status. Keystrokes go through a [`Debouncer`];
//! debounced fires and backend responses come back as
//! [`ControllerEvent`]s on a single channel, and only
//! [`SearchController::handle_event`] applies them. That keeps every state
//! transition on one logical thread of control even though timers and
//! requests run as tokio tasks.
//!
//! Each issued search carries a sequence number. A response is applied only
//! if its number is the latest issued, so a slow response can never
//! overwrite a newer one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use refrain_core::{AlbumFilter, ResultSet, ResultsView, SearchStatus};

use crate::backend::SearchBackend;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::SearchResult;

/// Something that happened outside the controller and needs applying.
#[derive(Debug)]
pub enum ControllerEvent {
    /// The debounce window closed on this query.
    Fire(String),
    /// A backend search finished.
    Resolved {
        seq: u64,
        query: String,
        outcome: SearchResult<ResultSet>,
    },
}

/// Everything a front-end needs to render the search screen.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// The text as typed, updated on every keystroke.
    pub query: String,
    /// The last successful response, in backend order.
    pub results: ResultSet,
    pub album: AlbumFilter,
    pub status: SearchStatus,
    /// `results` narrowed by `album`, with counts.
    pub view: ResultsView,
}

/// Drives searches for a front-end.
pub struct SearchController<B: SearchBackend> {
    backend: Arc<B>,
    state: SearchState,
    albums: Vec<String>,
    debouncer: Debouncer<String>,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
    last_issued: u64,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(backend: B, albums: Vec<String>, debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let fire_tx = events_tx.clone();
        let debouncer = Debouncer::new(debounce, move |query: String| {
            if fire_tx.send(ControllerEvent::Fire(query)).is_err() {
                log::debug!("Debounced search fired after the controller went away");
            }
        });

        Self {
            backend: Arc::new(backend),
            state: SearchState::default(),
            albums,
            debouncer,
            events_tx,
            events_rx,
            last_issued: 0,
        }
    }

    /// Build a controller using the configured albums and debounce delay.
    pub fn from_config(backend: B, config: &Config) -> Self {
        Self::new(backend, config.albums.clone(), config.debounce_delay())
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn view(&self) -> &ResultsView {
        &self.state.view
    }

    pub fn known_albums(&self) -> &[String] {
        &self.albums
    }

    /// Whether a keystroke is still waiting out the debounce window.
    pub fn is_debouncing(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record the new query and (re)start the debounce window for it.
    pub fn on_query_change(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.state.query.clone_from(&query);
        self.debouncer.trigger(query);
    }

    /// Switch the album filter. Never touches the network.
    pub fn on_album_change(&mut self, album: AlbumFilter) {
        self.state.album = album;
        self.refresh_view();
    }

    /// Move the album filter to the next known album, wrapping to "all".
    pub fn cycle_album(&mut self) {
        let next = self.state.album.next(&self.albums);
        self.on_album_change(next);
    }

    /// Move the album filter to the previous known album.
    pub fn cycle_album_back(&mut self) {
        let previous = self.state.album.previous(&self.albums);
        self.on_album_change(previous);
    }

    /// Search for `query` right away, bypassing the debouncer.
    ///
    /// A blank query clears the results and returns to idle without a
    /// request. Either way, any search still in flight becomes stale.
    pub fn search_now(&mut self, query: &str) {
        self.last_issued += 1;

        if query.trim().is_empty() {
            self.state.results.clear();
            self.state.status = SearchStatus::Idle;
            self.refresh_view();
            return;
        }

        let seq = self.last_issued;
        log::debug!("Issuing search #{} for {:?}", seq, query);
        self.state.status = SearchStatus::Loading;
        self.refresh_view();

        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = backend.search(&query).await;
            if tx
                .send(ControllerEvent::Resolved {
                    seq,
                    query,
                    outcome,
                })
                .is_err()
            {
                log::debug!("Search #{} resolved after the controller went away", seq);
            }
        });
    }

    /// Wait for the next debounced fire or backend response.
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        self.events_rx.recv().await
    }

    /// Apply an event to the state.
    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Fire(query) => self.search_now(&query),
            ControllerEvent::Resolved {
                seq,
                query,
                outcome,
            } => self.resolve(seq, &query, outcome),
        }
    }

    /// Wait for one event and apply it. Returns `false` if the event
    /// channel has closed.
    pub async fn process_next(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Stop the pending debounce timer. Responses still in flight are left
    /// to finish and are ignored if they arrive after a newer search.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
    }

    fn resolve(&mut self, seq: u64, query: &str, outcome: SearchResult<ResultSet>) {
        if seq != self.last_issued {
            log::debug!(
                "Discarding stale response #{} for {:?} (latest is #{})",
                seq,
                query,
                self.last_issued
            );
            return;
        }

        match outcome {
            Ok(results) => {
                log::info!("Search for {:?} returned {} matches", query, results.len());
                self.state.results = results;
                self.state.status = SearchStatus::Success;
            }
            Err(e) => {
                self.state.results.clear();
                self.state.status = SearchStatus::Error(e.message().to_string());
            }
        }
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.state.view = ResultsView::derive(&self.state.results, &self.state.album);
    }
}

impl<B: SearchBackend> std::fmt::Debug for SearchController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &self.state)
            .field("albums", &self.albums)
            .field("debouncer", &self.debouncer)
            .field("last_issued", &self.last_issued)
            .finish_non_exhaustive()
    }
}

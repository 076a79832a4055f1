//! HTTP client for the lyrics search backend.
//!
//! The backend exposes `GET /search?query=...`, answering with
//! `{"results": [...]}`, and a greeting at `GET /`. Every failure is
//! reported as [`SearchError::ConnectionFailure`]; nothing is retried or
//! cached.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use refrain_core::model::record::parse_search_response;
use refrain_core::ResultSet;

use crate::backend::SearchBackend;
use crate::config::Config;
use crate::error::{SearchError, SearchResult};

const USER_AGENT: &str = "refrain/0.1.0 (https://github.com/oxur/refrain)";

// Body of `GET /`.
#[derive(Debug, Deserialize)]
struct Greeting {
    message: String,
}

/// Lyrics search API client.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SearchResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::connection_failure(&base_url, e))?;

        Ok(Self { http, base_url })
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &Config) -> SearchResult<Self> {
        Self::new(config.backend_base_url.as_str(), config.request_timeout())
    }

    /// The backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the backend for lyric lines containing `query`.
    ///
    /// A blank query returns no results without touching the network.
    pub async fn search(&self, query: &str) -> SearchResult<ResultSet> {
        if query.trim().is_empty() {
            return Ok(ResultSet::new());
        }

        let url = format!("{}/search", self.base_url);
        let body = self.get_text(&url, &[("query", query)]).await?;
        let results = parse_search_response(&body).map_err(|e| self.failure(e))?;

        log::debug!("Backend returned {} matches for {:?}", results.len(), query);
        Ok(results)
    }

    /// Fetch the backend greeting from `GET /`.
    pub async fn ping(&self) -> SearchResult<String> {
        let url = format!("{}/", self.base_url);
        let body = self.get_text(&url, &[]).await?;
        let greeting: Greeting = serde_json::from_str(&body).map_err(|e| self.failure(e))?;
        Ok(greeting.message)
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> SearchResult<String> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.failure(e))?
            .error_for_status()
            .map_err(|e| self.failure(e))?;

        response.text().await.map_err(|e| self.failure(e))
    }

    fn failure(&self, cause: impl std::fmt::Display) -> SearchError {
        log::warn!("Lyrics backend at {} failed: {}", self.base_url, cause);
        SearchError::connection_failure(&self.base_url, cause)
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str) -> SearchResult<ResultSet> {
        SearchClient::search(self, query).await
    }
}

//! Search error types.

use thiserror::Error;

/// Errors surfaced by a search backend.
///
/// Every failure mode (unreachable host, non-success status, undecodable
/// body) collapses into [`SearchError::ConnectionFailure`]; the front-end
/// shows `message` and keeps `cause` for the logs.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The backend could not be reached or returned something unusable.
    #[error("{message}")]
    ConnectionFailure { message: String, cause: String },
}

impl SearchError {
    /// Build a connection failure for the backend at `base_url`.
    pub fn connection_failure(base_url: &str, cause: impl ToString) -> Self {
        Self::ConnectionFailure {
            message: format!(
                "Could not connect to the lyrics API. Make sure the backend is running at {}",
                base_url
            ),
            cause: cause.to_string(),
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::ConnectionFailure { message, .. } => message,
        }
    }

    /// Returns `true` when the failure may clear up on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionFailure { .. })
    }
}

/// Convenience alias for search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

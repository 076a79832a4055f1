//! The seam between the controller and whatever answers searches.

use async_trait::async_trait;
use refrain_core::ResultSet;

use crate::error::SearchResult;

/// Something that can answer a lyrics query.
///
/// [`SearchClient`](crate::SearchClient) is the real implementation; tests
/// drive the controller with scripted backends.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    /// Search for `query`. Callers never pass a blank query.
    async fn search(&self, query: &str) -> SearchResult<ResultSet>;
}

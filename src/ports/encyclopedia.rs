//! Encyclopedia Port - full-text search returning highlighted excerpts.

use async_trait::async_trait;

use crate::domain::knowledge::{SearchHit, Snippet};

use super::ServiceError;

/// Port for an encyclopedia search backend.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Searches by relevance.
    ///
    /// A non-success response from the backend yields an empty list.
    async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<SearchHit>, ServiceError>;

    /// Best single snippet for a query, if any hit has text.
    async fn snippet(&self, query: &str) -> Result<Option<Snippet>, ServiceError> {
        let hits = self.search(query, Some(1)).await?;
        Ok(hits.first().and_then(Snippet::from_hit))
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Search backend error: {0}")]
    Backend(String),
}

/// One ranked match returned by the search backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Slug of the matched product or category
    pub slug: String,
    pub title: String,
    /// Backend relevance score, higher is better
    pub score: f64,
}

/// Seam for the trigram full-text-search engine.
///
/// Queries handed to `search` are already constructed by
/// [`query::build_query`](crate::features::search::query::build_query) - the
/// index never sees raw user input. The version counter tracks the indexed
/// corpus and keys the result cache: any reindex must bump it.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run a prepared query, returning at most `limit` hits ranked best-first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError>;

    /// Monotonic version of the indexed corpus.
    async fn version(&self) -> Result<u64, IndexError>;
}

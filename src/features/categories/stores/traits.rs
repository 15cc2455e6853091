use async_trait::async_trait;
use thiserror::Error;

use crate::features::categories::models::Category;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Storage seam for the flat category list.
///
/// Implementations persist categories keyed by slug; the tree structure is
/// never stored, only derived. The version counter is the invalidation
/// signal consumed by the search-result cache and must increase on every
/// effective mutation.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, ordered by position then name.
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    async fn get(&self, slug: &str) -> Result<Option<Category>, StoreError>;

    /// Insert or overwrite by slug.
    async fn put(&self, category: &Category) -> Result<(), StoreError>;

    /// Remove by slug; returns whether the category existed.
    async fn delete(&self, slug: &str) -> Result<bool, StoreError>;

    /// Replace the whole catalog with a flattened update, atomically.
    async fn replace_all(&self, categories: &[Category]) -> Result<(), StoreError>;

    /// Monotonic counter bumped by every effective mutation.
    async fn version(&self) -> Result<u64, StoreError>;
}

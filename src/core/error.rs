use thiserror::Error;

use crate::features::categories::stores::StoreError;
use crate::features::search::index::IndexError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Search index error: {0}")]
    Index(#[from] IndexError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Circular reference: {0}")]
    CircularReference(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

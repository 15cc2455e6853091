//! # Lamella Core
//!
//! Catalog and search core of the Lamella flooring storefront backend.
//!
//! Categories are stored as a flat, slug-keyed list with parent references;
//! the tree shown in the storefront and the admin panel is derived on read
//! and flattened back after drag-and-drop reorders. Free-text search input
//! is escaped and assembled into trigram-FTS queries here, with results
//! cached under the catalog's own version counter.
//!
//! The HTTP layer, ORM schema and object storage of the full backend sit
//! outside this crate; storage and the FTS engine appear as the
//! [`CategoryStore`] and [`SearchIndex`] seams.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use lamella_core::{CategoryService, CreateCategoryDto, MemoryCategoryStore};
//!
//! # #[tokio::main]
//! # async fn main() -> lamella_core::Result<()> {
//! let categories = CategoryService::new(Arc::new(MemoryCategoryStore::new()));
//!
//! categories
//!     .create(CreateCategoryDto {
//!         slug: "laminate".to_string(),
//!         name: "Laminate".to_string(),
//!         parent_slug: None,
//!         position: None,
//!         description: None,
//!         attributes: None,
//!     })
//!     .await?;
//!
//! let tree = categories.tree().await?;
//! assert_eq!(tree[0].category.slug, "laminate");
//! # Ok(())
//! # }
//! ```
//!
//! Query construction is pure and needs no service:
//!
//! ```rust
//! use lamella_core::features::search::query::{build_query, SearchOptions};
//!
//! let query = build_query("oak laminate 8mm", &SearchOptions::default());
//! assert_eq!(query, "oak* AND laminate* AND 8mm*");
//! ```
//!
//! ## Modules
//!
//! - [`features::categories`]: flat-to-tree conversion, reparenting checks
//!   and the category CRUD service
//! - [`features::search`]: query escaping/construction, the version-keyed
//!   result cache and the search service
//! - [`shared`]: attribute-payload cleanup and slug validation
//! - [`core`]: configuration and the crate-wide error type

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::config::{CacheConfig, CatalogConfig, SearchConfig};
pub use crate::core::error::{CatalogError, Result};
pub use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, ReorderNodeDto, UpdateCategoryDto,
};
pub use crate::features::categories::models::{Category, CategoryNode};
pub use crate::features::categories::stores::{CategoryStore, MemoryCategoryStore, StoreError};
pub use crate::features::categories::CategoryService;
pub use crate::features::search::cache::SearchCacheStats;
pub use crate::features::search::index::{IndexError, SearchHit, SearchIndex};
pub use crate::features::search::query::{QueryOperator, SearchOptions};
pub use crate::features::search::{SearchOutcome, SearchService};

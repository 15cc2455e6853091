//! Category hierarchy feature: flat slug-keyed storage with a derived tree
//! view, safe reparenting, and drag-and-drop reordering.
//!
//! The parent-reference graph must stay acyclic. Reads are lenient (orphans
//! are promoted to root); the write boundary in [`CategoryService`] is what
//! enforces the invariant.

pub mod dtos;
pub mod models;
pub mod services;
pub mod stores;
pub mod tree;

pub use services::CategoryService;

//! Storefront search feature: construction of trigram-FTS queries from raw
//! user input, a version-keyed result cache, and the service wiring them to
//! the index seam.
//!
//! Degenerate input never errors - it collapses to "no search filter".

pub mod cache;
pub mod index;
pub mod query;
pub mod services;

pub use services::{SearchOutcome, SearchService};

mod search_service;

pub use search_service::{SearchOutcome, SearchService};

//! Construction of full-text-search queries from raw user input.
//!
//! The storefront search box feeds a trigram-tokenized FTS backend whose
//! query syntax has its own operators. User text is never passed through
//! verbatim: terms are escaped, length-gated and joined here, so the backend
//! only ever sees well-formed queries. Degenerate input collapses to an
//! empty string, which callers must treat as "no search filter" (match-all),
//! never as an error.

use serde::{Deserialize, Serialize};

/// Terms shorter than this (in characters, not bytes - input is frequently
/// Cyrillic) are dropped: the trigram index cannot match them usefully.
pub const MIN_TERM_CHARS: usize = 2;

/// Boolean operator joining the terms of a multi-word query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOperator {
    #[default]
    And,
    Or,
}

impl QueryOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            QueryOperator::And => "AND",
            QueryOperator::Or => "OR",
        }
    }
}

/// Options for [`build_query`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Append the prefix-match marker to every term (default: true)
    pub prefix_match: bool,
    pub operator: QueryOperator,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            prefix_match: true,
            operator: QueryOperator::And,
        }
    }
}

/// Strip the backend's operator syntax out of a single term.
///
/// Literal quotes are doubled (the backend's quote-escaping convention);
/// wildcards and parentheses are removed outright because the backend has no
/// escape for them; surrounding whitespace is trimmed. Pure and total.
pub fn escape_term(term: &str) -> String {
    term.replace('"', "\"\"")
        .replace(['*', '(', ')'], "")
        .trim()
        .to_string()
}

/// Build the query fragment for one already-tokenized term.
///
/// Returns `None` when the escaped term is shorter than [`MIN_TERM_CHARS`].
/// The term stays unquoted: the trigram tokenizer matches unquoted prefix
/// terms, while quoting would force exact-token matching.
pub fn term_query(term: &str, prefix_match: bool) -> Option<String> {
    let escaped = escape_term(term);
    if escaped.chars().count() < MIN_TERM_CHARS {
        return None;
    }
    if prefix_match {
        Some(format!("{escaped}*"))
    } else {
        Some(escaped)
    }
}

/// Turn a raw user search string into a backend query.
///
/// Whitespace is normalized, the input split into terms, short terms dropped
/// (before and after escaping), and the surviving term queries joined with
/// the configured operator. A single survivor is returned bare; when nothing
/// survives the result is the empty string.
pub fn build_query(search_query: &str, options: &SearchOptions) -> String {
    let term_queries: Vec<String> = search_query
        .split_whitespace()
        .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
        .filter_map(|term| term_query(term, options.prefix_match))
        .collect();

    term_queries.join(&format!(" {} ", options.operator.keyword()))
}

/// Build a suggestion query for an incrementally-typed prefix.
///
/// Same escaping and minimum-length rule as [`build_query`], always with the
/// prefix-match marker appended.
pub fn autocomplete_query(prefix: &str) -> String {
    term_query(prefix, true).unwrap_or_default()
}

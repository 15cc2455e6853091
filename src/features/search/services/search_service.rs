use std::sync::Arc;

use crate::core::config::CatalogConfig;
use crate::core::error::{CatalogError, Result};
use crate::features::search::cache::{SearchCache, SearchCacheStats};
use crate::features::search::index::{SearchHit, SearchIndex};
use crate::features::search::query::{autocomplete_query, build_query, SearchOptions};

/// Outcome of a search submission.
///
/// Degenerate input (empty, too short, nothing but operator characters)
/// constructs no query; that is reported as `Unfiltered` and the caller must
/// show the unfiltered catalog, never an error page.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// No usable terms - apply no search filter (match-all)
    Unfiltered,
    /// Ranked hits for the constructed query
    Results(Vec<SearchHit>),
}

/// Service for storefront search.
///
/// Raw user input is turned into a backend query here; the index never sees
/// unescaped text. Results are cached keyed by the index's corpus version, so
/// catalog mutations invalidate by bumping the version rather than by
/// explicit cache calls.
pub struct SearchService {
    index: Arc<dyn SearchIndex>,
    cache: SearchCache,
    default_limit: usize,
    autocomplete_limit: usize,
}

impl SearchService {
    pub fn new(index: Arc<dyn SearchIndex>, config: &CatalogConfig) -> Self {
        Self {
            index,
            cache: SearchCache::new(config.cache.max_entries),
            default_limit: config.search.default_limit,
            autocomplete_limit: config.search.autocomplete_limit,
        }
    }

    /// Run a full search submission.
    pub async fn search(&self, raw_query: &str, options: &SearchOptions) -> Result<SearchOutcome> {
        let query = build_query(raw_query, options);
        if query.is_empty() {
            tracing::debug!("Search input produced no query, returning unfiltered");
            return Ok(SearchOutcome::Unfiltered);
        }

        let results = self.cached_search(&query, self.default_limit).await?;
        Ok(SearchOutcome::Results(results))
    }

    /// Suggestions for an incrementally-typed prefix. A prefix too short to
    /// query yields an empty suggestion list.
    pub async fn autocomplete(&self, prefix: &str) -> Result<Vec<SearchHit>> {
        let query = autocomplete_query(prefix);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.cached_search(&query, self.autocomplete_limit).await
    }

    pub fn cache_stats(&self) -> SearchCacheStats {
        self.cache.stats()
    }

    /// Drop all cached results regardless of version.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve the corpus version, serve from cache when fresh, otherwise
    /// query the index and fill the cache.
    async fn cached_search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let version = self.index.version().await.map_err(|e| {
            tracing::error!("Failed to read search index version: {:?}", e);
            CatalogError::Index(e)
        })?;

        if let Some(results) = self.cache.get(query, limit, version) {
            tracing::debug!("Search cache hit: query={}, version={}", query, version);
            return Ok(results);
        }

        let results = self.index.search(query, limit).await.map_err(|e| {
            tracing::error!("Search failed: query={}, {:?}", query, e);
            CatalogError::Index(e)
        })?;
        tracing::debug!(
            "Search executed: query={}, hits={}, version={}",
            query,
            results.len(),
            version
        );

        self.cache.insert(query, limit, version, results.clone());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;

    use crate::features::search::index::IndexError;

    /// Stub index serving a fixed hit list, counting searches and letting
    /// tests move the corpus version.
    struct StubIndex {
        results: Vec<SearchHit>,
        version: AtomicU64,
        searches: AtomicU64,
        fail: bool,
    }

    impl StubIndex {
        fn new(results: Vec<SearchHit>) -> Self {
            Self {
                results,
                version: AtomicU64::new(1),
                searches: AtomicU64::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                results: Vec::new(),
                version: AtomicU64::new(1),
                searches: AtomicU64::new(0),
                fail: true,
            }
        }

        fn bump_version(&self) {
            self.version.fetch_add(1, Ordering::SeqCst);
        }

        fn search_count(&self) -> u64 {
            self.searches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchIndex for StubIndex {
        async fn search(
            &self,
            _query: &str,
            limit: usize,
        ) -> std::result::Result<Vec<SearchHit>, IndexError> {
            if self.fail {
                return Err(IndexError::Backend("index offline".to_string()));
            }
            self.searches.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.iter().take(limit).cloned().collect())
        }

        async fn version(&self) -> std::result::Result<u64, IndexError> {
            if self.fail {
                return Err(IndexError::Backend("index offline".to_string()));
            }
            Ok(self.version.load(Ordering::SeqCst))
        }
    }

    fn hit(slug: &str) -> SearchHit {
        SearchHit {
            slug: slug.to_string(),
            title: slug.to_string(),
            score: 1.0,
        }
    }

    fn service(index: Arc<StubIndex>) -> SearchService {
        SearchService::new(index, &CatalogConfig::default())
    }

    #[tokio::test]
    async fn test_degenerate_input_is_unfiltered_and_skips_the_index() {
        let index = Arc::new(StubIndex::new(vec![hit("oak-laminate")]));
        let service = service(index.clone());

        for input in ["", "   ", "a", "*** ((("] {
            let outcome = service.search(input, &SearchOptions::default()).await.unwrap();
            assert_eq!(outcome, SearchOutcome::Unfiltered, "input: {:?}", input);
        }

        assert_eq!(index.search_count(), 0);
    }

    #[tokio::test]
    async fn test_search_returns_ranked_hits() {
        let index = Arc::new(StubIndex::new(vec![hit("oak-laminate"), hit("oak-parquet")]));
        let service = service(index);

        let outcome = service.search("oak", &SearchOptions::default()).await.unwrap();

        match outcome {
            SearchOutcome::Results(results) => {
                assert_eq!(results.len(), 2);
                assert_eq!(results[0].slug, "oak-laminate");
            }
            SearchOutcome::Unfiltered => panic!("expected results"),
        }
    }

    #[tokio::test]
    async fn test_repeated_search_hits_the_cache() {
        let index = Arc::new(StubIndex::new(vec![hit("oak-laminate")]));
        let service = service(index.clone());

        service.search("oak", &SearchOptions::default()).await.unwrap();
        service.search("oak", &SearchOptions::default()).await.unwrap();

        assert_eq!(index.search_count(), 1);
        assert_eq!(service.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_version_bump_invalidates_cached_results() {
        let index = Arc::new(StubIndex::new(vec![hit("oak-laminate")]));
        let service = service(index.clone());

        service.search("oak", &SearchOptions::default()).await.unwrap();
        index.bump_version();
        service.search("oak", &SearchOptions::default()).await.unwrap();

        assert_eq!(index.search_count(), 2);
        assert_eq!(service.cache_stats().stale, 1);
    }

    #[tokio::test]
    async fn test_autocomplete_caches_under_its_own_limit() {
        let index = Arc::new(StubIndex::new(vec![hit("laminate")]));
        let service = service(index.clone());

        let first = service.autocomplete("lam").await.unwrap();
        let second = service.autocomplete("lam").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(index.search_count(), 1);
    }

    #[tokio::test]
    async fn test_autocomplete_short_prefix_is_empty_without_querying() {
        let index = Arc::new(StubIndex::new(vec![hit("laminate")]));
        let service = service(index.clone());

        assert!(service.autocomplete("l").await.unwrap().is_empty());
        assert!(service.autocomplete("").await.unwrap().is_empty());
        assert_eq!(index.search_count(), 0);
    }

    #[tokio::test]
    async fn test_index_failure_propagates() {
        let service = service(Arc::new(StubIndex::failing()));

        let err = service
            .search("oak", &SearchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Index(_)));
    }

    #[tokio::test]
    async fn test_clear_cache_forces_requery() {
        let index = Arc::new(StubIndex::new(vec![hit("oak-laminate")]));
        let service = service(index.clone());

        service.search("oak", &SearchOptions::default()).await.unwrap();
        service.clear_cache();
        service.search("oak", &SearchOptions::default()).await.unwrap();

        assert_eq!(index.search_count(), 2);
    }
}

//! Version-keyed cache for search results.
//!
//! Results are stamped with the catalog version current at fill time. Every
//! catalog mutation bumps the version, so a lookup against a newer version
//! treats the entry as stale and evicts it - no explicit invalidation calls,
//! the data's own versioning signal does the work.
//!
//! Bounded by `max_entries` with oldest-first eviction.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;

use super::index::SearchHit;

/// Cache key: (constructed query, result limit)
type CacheKey = (String, usize);

#[derive(Clone, Debug)]
struct CacheEntry {
    /// Catalog version at fill time
    version: u64,
    results: Vec<SearchHit>,
}

pub struct SearchCache {
    entries: DashMap<CacheKey, CacheEntry>,
    /// Insertion order of the live entries, oldest first. Every removal from
    /// `entries` removes the key here too, so the queue never outgrows the map.
    order: Mutex<VecDeque<CacheKey>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
}

/// Cache statistics snapshot
#[derive(Debug, Clone)]
pub struct SearchCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped because the catalog version moved past them
    pub stale: u64,
    pub entry_count: usize,
    /// Hit rate (0.0 - 1.0)
    pub hit_rate: f64,
}

impl SearchCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale: AtomicU64::new(0),
        }
    }

    /// Look up cached results for a query at the given catalog version.
    ///
    /// Returns `Some` only when the entry was filled at exactly
    /// `current_version`; an entry from any other version is evicted and the
    /// lookup counts as a miss.
    pub fn get(&self, query: &str, limit: usize, current_version: u64) -> Option<Vec<SearchHit>> {
        let key = (query.to_string(), limit);

        if let Some(entry) = self.entries.get(&key) {
            if entry.version == current_version {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.results.clone());
            }
            // Catalog changed since this entry was filled
            self.stale.fetch_add(1, Ordering::Relaxed);
            drop(entry); // Release read lock before removing
            self.entries.remove(&key);
            // Unqueue as well, otherwise the refill re-queues the key and the
            // dead front instance later evicts a live entry out of turn
            self.order.lock().retain(|k| k != &key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Cache results filled at `version`.
    pub fn insert(&self, query: &str, limit: usize, version: u64, results: Vec<SearchHit>) {
        let key = (query.to_string(), limit);

        // Evict oldest while at capacity
        if self.entries.len() >= self.max_entries {
            let mut order = self.order.lock();
            while self.entries.len() >= self.max_entries {
                if let Some(old_key) = order.pop_front() {
                    self.entries.remove(&old_key);
                } else {
                    break;
                }
            }
        }

        let is_new = !self.entries.contains_key(&key);
        self.entries.insert(key.clone(), CacheEntry { version, results });

        if is_new {
            self.order.lock().push_back(key);
        }
    }

    pub fn stats(&self) -> SearchCacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        SearchCacheStats {
            hits,
            misses,
            stale: self.stale.load(Ordering::Relaxed),
            entry_count: self.entries.len(),
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries.clear();
        self.order.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(slug: &str) -> SearchHit {
        SearchHit {
            slug: slug.to_string(),
            title: slug.to_string(),
            score: 1.0,
        }
    }

    #[test]
    fn test_cache_hit_at_same_version() {
        let cache = SearchCache::new(100);
        let results = vec![hit("oak-laminate"), hit("oak-parquet")];

        cache.insert("oak*", 20, 7, results.clone());

        assert_eq!(cache.get("oak*", 20, 7), Some(results));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_cache_miss_when_not_filled() {
        let cache = SearchCache::new(100);

        assert_eq!(cache.get("oak*", 20, 7), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_version_bump_makes_entry_stale() {
        let cache = SearchCache::new(100);
        cache.insert("oak*", 20, 7, vec![hit("oak-laminate")]);

        // Catalog mutated: version moved from 7 to 8
        assert_eq!(cache.get("oak*", 20, 8), None);

        let stats = cache.stats();
        assert_eq!(stats.stale, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 0, "stale entry must be evicted");
    }

    #[test]
    fn test_limit_is_part_of_the_key() {
        let cache = SearchCache::new(100);

        cache.insert("oak*", 20, 7, vec![hit("a"), hit("b")]);
        cache.insert("oak*", 1, 7, vec![hit("a")]);

        assert_eq!(cache.get("oak*", 20, 7).unwrap().len(), 2);
        assert_eq!(cache.get("oak*", 1, 7).unwrap().len(), 1);
    }

    #[test]
    fn test_different_queries_cached_independently() {
        let cache = SearchCache::new(100);

        cache.insert("oak*", 20, 7, vec![hit("oak-laminate")]);
        cache.insert("vinyl*", 20, 7, vec![hit("click-vinyl")]);

        assert_eq!(cache.get("oak*", 20, 7).unwrap()[0].slug, "oak-laminate");
        assert_eq!(cache.get("vinyl*", 20, 7).unwrap()[0].slug, "click-vinyl");
    }

    #[test]
    fn test_eviction_drops_oldest_first() {
        let cache = SearchCache::new(3);

        cache.insert("q1*", 20, 1, vec![hit("a")]);
        cache.insert("q2*", 20, 1, vec![hit("b")]);
        cache.insert("q3*", 20, 1, vec![hit("c")]);
        assert_eq!(cache.stats().entry_count, 3);

        cache.insert("q4*", 20, 1, vec![hit("d")]);

        assert_eq!(cache.stats().entry_count, 3);
        assert!(cache.get("q1*", 20, 1).is_none());
        assert!(cache.get("q4*", 20, 1).is_some());
    }

    #[test]
    fn test_hit_rate() {
        let cache = SearchCache::new(100);
        cache.insert("oak*", 20, 1, vec![hit("a")]);

        // 3 hits, 1 miss
        cache.get("oak*", 20, 1);
        cache.get("oak*", 20, 1);
        cache.get("oak*", 20, 1);
        cache.get("birch*", 20, 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 0.75).abs() < 0.01);
    }

    #[test]
    fn test_clear() {
        let cache = SearchCache::new(100);
        cache.insert("oak*", 20, 1, vec![hit("a")]);

        cache.clear();

        assert_eq!(cache.stats().entry_count, 0);
        assert!(cache.get("oak*", 20, 1).is_none());
    }

    #[test]
    fn test_refill_after_staleness_serves_new_results() {
        let cache = SearchCache::new(100);
        cache.insert("oak*", 20, 1, vec![hit("old")]);

        assert_eq!(cache.get("oak*", 20, 2), None);
        cache.insert("oak*", 20, 2, vec![hit("new")]);

        assert_eq!(cache.get("oak*", 20, 2).unwrap()[0].slug, "new");
    }

    #[test]
    fn test_stale_refills_do_not_grow_the_eviction_queue() {
        let cache = SearchCache::new(1000);

        // Hot queries refilled across many catalog versions: the queue must
        // track the live entries, not every fill that ever happened.
        for version in 1..=50 {
            for query in ["oak*", "vinyl*", "birch*"] {
                assert_eq!(cache.get(query, 20, version), None);
                cache.insert(query, 20, version, vec![hit("a")]);
            }
        }

        assert_eq!(cache.stats().entry_count, 3);
        assert_eq!(cache.order.lock().len(), 3);
    }

    #[test]
    fn test_refilled_key_outlives_older_entries_at_capacity() {
        let cache = SearchCache::new(3);

        cache.insert("hot*", 20, 1, vec![hit("a")]);
        cache.insert("q2*", 20, 1, vec![hit("b")]);
        cache.insert("q3*", 20, 1, vec![hit("c")]);

        // A version bump stales the hot query; the refill makes it the
        // youngest entry in the queue again.
        assert_eq!(cache.get("hot*", 20, 2), None);
        cache.insert("hot*", 20, 2, vec![hit("a")]);

        // Filling the fourth slot evicts the oldest live entry, which is
        // now q2*, not the just-refilled key.
        cache.insert("q4*", 20, 2, vec![hit("d")]);

        assert!(cache.get("hot*", 20, 2).is_some());
        assert!(cache.get("q2*", 20, 2).is_none());
        assert_eq!(cache.stats().entry_count, 3);
    }
}

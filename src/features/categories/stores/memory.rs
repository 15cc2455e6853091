use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{CategoryStore, StoreError};
use crate::features::categories::models::Category;

/// In-memory reference implementation of [`CategoryStore`].
///
/// A single `RwLock` keeps `replace_all` atomic with respect to readers,
/// which `list` relies on during reorders.
pub struct MemoryCategoryStore {
    data: RwLock<HashMap<String, Category>>,
    version: AtomicU64,
}

impl MemoryCategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            version: AtomicU64::new(0),
        }
    }

    /// Get current category count
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn bump_version(&self) {
        self.version.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for MemoryCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self.data.read().values().cloned().collect();
        categories.sort_by(|a, b| (a.position, &a.name).cmp(&(b.position, &b.name)));
        Ok(categories)
    }

    async fn get(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.data.read().get(slug).cloned())
    }

    async fn put(&self, category: &Category) -> Result<(), StoreError> {
        self.data
            .write()
            .insert(category.slug.clone(), category.clone());
        self.bump_version();
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<bool, StoreError> {
        let removed = self.data.write().remove(slug).is_some();
        if removed {
            self.bump_version();
        }
        Ok(removed)
    }

    async fn replace_all(&self, categories: &[Category]) -> Result<(), StoreError> {
        let mut data = self.data.write();
        data.clear();
        for category in categories {
            data.insert(category.slug.clone(), category.clone());
        }
        drop(data);
        self.bump_version();
        Ok(())
    }

    async fn version(&self) -> Result<u64, StoreError> {
        Ok(self.version.load(Ordering::Relaxed))
    }
}

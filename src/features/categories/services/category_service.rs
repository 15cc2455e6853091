use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use validator::Validate;

use crate::core::error::{CatalogError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, ReorderNodeDto, UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CategoryNode};
use crate::features::categories::stores::CategoryStore;
use crate::features::categories::tree;
use crate::shared::attributes::clean_attributes;

/// Service for category operations.
///
/// All writes that touch `parent_slug` run the circular-reference check
/// before committing; storage itself does not enforce acyclicity, so this is
/// the single place that keeps the parent graph a forest. The check runs
/// against a loaded snapshot, so writes serialize on an internal lock - two
/// interleaved reparents could otherwise both pass it and commit a cycle.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    /// Serializes the load-check-save write paths
    write_lock: Mutex<()>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// List all categories (flat, ordered by position then name)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.load().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all categories as tree structure
    pub async fn tree(&self) -> Result<Vec<CategoryNode>> {
        let categories = self.load().await?;
        Ok(tree::build_tree(&categories))
    }

    /// Get category by slug
    pub async fn get(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category = self.store.get(slug).await.map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            CatalogError::Store(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| CatalogError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        dto.validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        let categories = self.load().await?;
        if categories.iter().any(|c| c.slug == dto.slug) {
            return Err(CatalogError::Conflict(format!(
                "Category '{}' already exists",
                dto.slug
            )));
        }
        check_parent_change(&dto.slug, dto.parent_slug.as_deref(), &categories)?;

        let position = dto
            .position
            .unwrap_or_else(|| next_position(dto.parent_slug.as_deref(), &categories));
        let now = Utc::now();
        let category = Category {
            slug: dto.slug,
            name: dto.name,
            parent_slug: dto.parent_slug,
            position,
            description: dto.description,
            attributes: dto.attributes.map(clean_attributes).unwrap_or(Value::Null),
            created_at: now,
            updated_at: now,
        };

        self.save(&category).await?;
        tracing::info!("Category created: slug={}", category.slug);

        Ok(category.into())
    }

    /// Update a category; omitted fields keep their stored value
    pub async fn update(&self, slug: &str, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        dto.validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        let categories = self.load().await?;
        let mut category = categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Category '{}' not found", slug)))?;

        if let Some(parent) = dto.parent_slug.as_deref() {
            check_parent_change(slug, Some(parent), &categories)?;
            category.parent_slug = Some(parent.to_string());
        }
        if let Some(name) = dto.name {
            category.name = name;
        }
        if let Some(position) = dto.position {
            category.position = position;
        }
        if let Some(description) = dto.description {
            category.description = Some(description);
        }
        if let Some(attributes) = dto.attributes {
            category.attributes = clean_attributes(attributes);
        }
        category.updated_at = Utc::now();

        self.save(&category).await?;
        tracing::info!("Category updated: slug={}", slug);

        Ok(category.into())
    }

    /// Move a category under a new parent (`None` promotes it to root)
    pub async fn move_to(
        &self,
        slug: &str,
        new_parent: Option<&str>,
    ) -> Result<CategoryResponseDto> {
        let _guard = self.write_lock.lock().await;
        let categories = self.load().await?;
        let mut category = categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Category '{}' not found", slug)))?;

        check_parent_change(slug, new_parent, &categories)?;

        category.parent_slug = new_parent.map(str::to_string);
        category.updated_at = Utc::now();

        self.save(&category).await?;
        tracing::info!("Category moved: slug={}, new_parent={:?}", slug, new_parent);

        Ok(category.into())
    }

    /// Apply a drag-and-drop reorder: the submitted forest shape becomes the
    /// new catalog layout, with positions renumbered in pre-order and parent
    /// references recomputed from the shape.
    ///
    /// The payload must reference every stored category exactly once - a
    /// partial or duplicated payload is a client bug and is rejected rather
    /// than silently dropping categories.
    pub async fn reorder(&self, forest: &[ReorderNodeDto]) -> Result<Vec<CategoryResponseDto>> {
        let _guard = self.write_lock.lock().await;
        let categories = self.load().await?;
        let stored: HashMap<&str, &Category> =
            categories.iter().map(|c| (c.slug.as_str(), c)).collect();

        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(forest.len());
        for dto in forest {
            nodes.push(resolve_reorder_node(dto, 0, &stored, &mut seen)?);
        }
        if seen.len() != categories.len() {
            let missing: Vec<&str> = categories
                .iter()
                .map(|c| c.slug.as_str())
                .filter(|slug| !seen.contains(*slug))
                .collect();
            return Err(CatalogError::Validation(format!(
                "Reorder payload must cover every category; missing: {}",
                missing.join(", ")
            )));
        }

        let flattened = tree::flatten_tree(&nodes);
        self.store.replace_all(&flattened).await.map_err(|e| {
            tracing::error!("Failed to replace categories: {:?}", e);
            CatalogError::Store(e)
        })?;
        tracing::info!("Catalog reordered: {} categories", flattened.len());

        Ok(flattened.into_iter().map(|c| c.into()).collect())
    }

    /// Delete a category. Children keep their parent reference and show up
    /// as roots in the tree view until the admin re-parents them.
    pub async fn delete(&self, slug: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let removed = self.store.delete(slug).await.map_err(|e| {
            tracing::error!("Failed to delete category: {:?}", e);
            CatalogError::Store(e)
        })?;
        if !removed {
            return Err(CatalogError::NotFound(format!(
                "Category '{}' not found",
                slug
            )));
        }

        let orphaned = self
            .load()
            .await?
            .iter()
            .filter(|c| c.parent_slug.as_deref() == Some(slug))
            .count();
        if orphaned > 0 {
            tracing::warn!(
                "Category '{}' deleted with {} children left orphaned",
                slug,
                orphaned
            );
        }
        tracing::info!("Category deleted: slug={}", slug);

        Ok(())
    }

    async fn load(&self) -> Result<Vec<Category>> {
        self.store.list().await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            CatalogError::Store(e)
        })
    }

    async fn save(&self, category: &Category) -> Result<()> {
        self.store.put(category).await.map_err(|e| {
            tracing::error!("Failed to save category: {:?}", e);
            CatalogError::Store(e)
        })
    }
}

/// Reject a parent change that references an unknown category or would make
/// the parent graph cyclic. Runs on every write that touches `parent_slug`.
fn check_parent_change(
    slug: &str,
    new_parent: Option<&str>,
    categories: &[Category],
) -> Result<()> {
    if let Some(parent) = new_parent {
        // Self-parenting falls through to the circular check below
        if parent != slug && !categories.iter().any(|c| c.slug == parent) {
            return Err(CatalogError::NotFound(format!(
                "Parent category '{}' not found",
                parent
            )));
        }
    }
    if tree::would_create_circular_ref(slug, new_parent, categories) {
        let parent = new_parent.unwrap_or(slug);
        return Err(CatalogError::CircularReference(format!(
            "'{}' cannot become a child of '{}'",
            slug, parent
        )));
    }
    Ok(())
}

/// Next free position among the siblings under `parent`. Saturates instead
/// of overflowing when a sibling already sits at the numeric edge.
fn next_position(parent: Option<&str>, categories: &[Category]) -> i64 {
    categories
        .iter()
        .filter(|c| c.parent_slug.as_deref() == parent)
        .map(|c| c.position)
        .max()
        .map_or(0, |p| p.saturating_add(1))
}

fn resolve_reorder_node(
    dto: &ReorderNodeDto,
    depth: usize,
    stored: &HashMap<&str, &Category>,
    seen: &mut HashSet<String>,
) -> Result<CategoryNode> {
    let category = stored
        .get(dto.slug.as_str())
        .map(|&c| c.clone())
        .ok_or_else(|| CatalogError::NotFound(format!("Category '{}' not found", dto.slug)))?;
    if !seen.insert(dto.slug.clone()) {
        return Err(CatalogError::Validation(format!(
            "Duplicate slug '{}' in reorder payload",
            dto.slug
        )));
    }

    let children = dto
        .children
        .iter()
        .map(|child| resolve_reorder_node(child, depth + 1, stored, seen))
        .collect::<Result<Vec<_>>>()?;

    Ok(CategoryNode {
        category,
        children,
        depth,
    })
}

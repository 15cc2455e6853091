use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog category, stored as a flat record with a parent reference.
///
/// The parent graph must stay acyclic; `CategoryService` enforces that on
/// every write, and the tree view is derived on read rather than persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier, kebab-case (e.g. "laminate-flooring")
    pub slug: String,
    pub name: String,
    /// Slug of the parent category; `None` for root categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_slug: Option<String>,
    /// Sibling sort key, ascending
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filter-attribute payload shown on the category page (wear class,
    /// thickness, color presets...)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived tree view of a category: the category itself plus its ordered
/// children and its distance from the root (roots have depth 0).
///
/// Ephemeral - built per request by `tree::build_tree` and discarded after
/// serialization. Category fields serialize flattened so the node can be
/// consumed directly as a UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
    pub depth: usize,
}

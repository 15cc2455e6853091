use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 120, message = "Slug must be 1-120 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase alphanumeric with hyphens"
        )
    )]
    pub slug: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Slug of the parent category; omit for a root category
    #[validate(regex(
        path = "*crate::shared::validation::SLUG_REGEX",
        message = "Parent slug must be lowercase alphanumeric with hyphens"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_slug: Option<String>,

    /// Sibling sort key; appended after the last current sibling when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Filter-attribute payload; normalized before persistence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

/// Request DTO for updating a category
///
/// Omitted fields keep their stored value. Setting `parentSlug` moves the
/// category under that parent; un-parenting goes through the move endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::SLUG_REGEX",
        message = "Parent slug must be lowercase alphanumeric with hyphens"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

/// One node of a drag-and-drop reorder payload: just the tree shape by slug.
/// Positions and parent references are recomputed from the submitted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderNodeDto {
    pub slug: String,
    #[serde(default)]
    pub children: Vec<ReorderNodeDto>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_slug: Option<String>,
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            slug: c.slug,
            name: c.name,
            parent_slug: c.parent_slug,
            position: c.position,
            description: c.description,
            attributes: c.attributes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

//! Conversion between the flat, parent-referencing category list and the
//! nested tree view.
//!
//! Categories are stored flat with a `parent_slug` pointer; the hierarchy is
//! derived on read and flattened back after a drag-and-drop reorder. Cycle
//! prevention lives at the write boundary (`would_create_circular_ref`), the
//! read side stays lenient.

use std::collections::HashMap;

use crate::features::categories::models::{Category, CategoryNode};

/// Build the ordered forest of category nodes from a flat list.
///
/// Each node is attached to its parent's children list, or promoted to a root
/// when it has no `parent_slug` or references a slug missing from the input
/// (an orphan is shown at top level instead of disappearing). Every sibling
/// list is sorted by `position` ascending; equal positions keep their input
/// order. `depth` is the distance from the root, roots being 0.
///
/// Duplicate slugs are resolved last-write-wins with a warning; earlier
/// entries drop out. Nodes caught in a parent cycle are unreachable from any
/// root and silently drop out of the forest.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    // Slug -> index of the authoritative entry (last write wins).
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(categories.len());
    for (i, category) in categories.iter().enumerate() {
        if index.insert(category.slug.as_str(), i).is_some() {
            tracing::warn!(
                slug = %category.slug,
                "duplicate category slug in tree input, keeping the later entry"
            );
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, category) in categories.iter().enumerate() {
        if index.get(category.slug.as_str()) != Some(&i) {
            // Shadowed by a later duplicate
            continue;
        }
        let parent = category
            .parent_slug
            .as_deref()
            .and_then(|slug| index.get(slug).copied());
        match parent {
            Some(parent) => children[parent].push(i),
            // No parent, or the referenced slug is not in the input set:
            // promote to root so a parent deleted out of band does not
            // break the tree view.
            None => roots.push(i),
        }
    }

    sort_siblings(&mut roots, categories);
    for list in &mut children {
        sort_siblings(list, categories);
    }

    roots
        .into_iter()
        .map(|root| assemble(root, 0, categories, &children))
        .collect()
}

/// Flatten a forest back to the stored representation.
///
/// Pre-order traversal (parent before children, children in their current
/// order): `position` is renumbered by a single counter starting at 0 across
/// the whole forest, and `parent_slug` is recomputed from tree position
/// (`None` for roots). This is the exact inverse used after a UI reorder, so
/// `flatten_tree(&build_tree(x))` reproduces every slug -> parent_slug edge
/// of `x` even though absolute positions are renumbered.
pub fn flatten_tree(tree: &[CategoryNode]) -> Vec<Category> {
    let mut flat = Vec::new();
    for node in tree {
        flatten_into(node, None, &mut flat);
    }
    flat
}

/// Collect all slugs transitively reachable as children of `slug`.
///
/// Recursive filter-and-collect over the flat list, with no internal cycle
/// guard: the caller must have kept the parent graph acyclic (the service
/// write boundary rejects any mutation that would introduce a cycle).
pub fn descendant_slugs(slug: &str, categories: &[Category]) -> Vec<String> {
    let mut slugs = Vec::new();
    collect_descendants(slug, categories, &mut slugs);
    slugs
}

/// Check whether reparenting `slug` under `new_parent_slug` would create a
/// cycle. Self-parenting is always circular; un-parenting (`None`) is always
/// safe; otherwise the candidate parent must not be a descendant of `slug`.
///
/// Every mutation path that changes `parent_slug` must call this and reject
/// the write when it returns true - nothing enforces acyclicity in storage.
pub fn would_create_circular_ref(
    slug: &str,
    new_parent_slug: Option<&str>,
    categories: &[Category],
) -> bool {
    match new_parent_slug {
        None => false,
        Some(parent) if parent == slug => true,
        Some(parent) => descendant_slugs(slug, categories).iter().any(|s| s == parent),
    }
}

/// Stable sort, so equal positions keep their relative input order.
fn sort_siblings(siblings: &mut [usize], categories: &[Category]) {
    siblings.sort_by_key(|&i| categories[i].position);
}

fn assemble(
    idx: usize,
    depth: usize,
    categories: &[Category],
    children: &[Vec<usize>],
) -> CategoryNode {
    CategoryNode {
        category: categories[idx].clone(),
        children: children[idx]
            .iter()
            .map(|&child| assemble(child, depth + 1, categories, children))
            .collect(),
        depth,
    }
}

fn flatten_into(node: &CategoryNode, parent_slug: Option<&str>, flat: &mut Vec<Category>) {
    let mut category = node.category.clone();
    category.parent_slug = parent_slug.map(str::to_string);
    category.position = flat.len() as i64;
    flat.push(category);
    for child in &node.children {
        flatten_into(child, Some(node.category.slug.as_str()), flat);
    }
}

fn collect_descendants(slug: &str, categories: &[Category], slugs: &mut Vec<String>) {
    for category in categories {
        if category.parent_slug.as_deref() == Some(slug) {
            slugs.push(category.slug.clone());
            collect_descendants(&category.slug, categories, slugs);
        }
    }
}

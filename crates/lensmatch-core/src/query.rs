//! Text and category filters applied to ranked output or the raw catalog.
//!
//! Both filters are plain predicates, so they compose in either order and
//! can run before or after ranking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::CatalogItem;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Case-insensitive substring match against name, category, tags, or description.
pub fn matches_text(item: &CatalogItem, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    item.name.to_lowercase().contains(&needle)
        || item.category.to_lowercase().contains(&needle)
        || item.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        || item.description.to_lowercase().contains(&needle)
}

/// Exact, case-sensitive category equality; `"all"` matches everything.
pub fn matches_category(item: &CatalogItem, category: &str) -> bool {
    category == ALL_CATEGORIES || item.category == category
}

/// Keep items matching the free-text query. A blank query keeps everything.
pub fn filter_text<'a>(items: &[&'a CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .copied()
        .filter(|item| matches_text(item, query))
        .collect()
}

/// Keep items in `category`, or all items for the `"all"` sentinel.
pub fn filter_category<'a>(items: &[&'a CatalogItem], category: &str) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .copied()
        .filter(|item| matches_category(item, category))
        .collect()
}

/// Distinct categories in ascending order, prefixed with `"all"`.
pub fn categories(items: &[CatalogItem]) -> Vec<String> {
    let distinct: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

/// A combined text + category query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    /// Free-text search; empty means no text filtering
    pub text: String,

    /// Category to keep, or `"all"`
    pub category: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl Query {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        matches_category(item, &self.category) && matches_text(item, &self.text)
    }

    /// Filter `items`, preserving their order.
    pub fn apply<'a>(&self, items: &[&'a CatalogItem]) -> Vec<&'a CatalogItem> {
        items
            .iter()
            .copied()
            .filter(|item| self.matches(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str, category: &str, tags: &[&str], description: &str) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
            price: 0.0,
            image_ref: String::new(),
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item(1, "Ceramic Mug", "Kitchen", &["coffee"], "Holds 350ml"),
            item(2, "Hiking Boots", "Outdoor", &["leather", "trail"], "Waterproof"),
            item(3, "Desk Lamp", "Home", &["light"], "Warm LED glow"),
            item(4, "Camp Stove", "Outdoor", &["cooking"], "Compact burner"),
        ]
    }

    fn ids(items: &[&CatalogItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_text_filter_fields() {
        let catalog = catalog();
        let all: Vec<&CatalogItem> = catalog.iter().collect();

        assert_eq!(ids(&filter_text(&all, "MUG")), vec![1]);
        assert_eq!(ids(&filter_text(&all, "outdoor")), vec![2, 4]);
        assert_eq!(ids(&filter_text(&all, "trail")), vec![2]);
        assert_eq!(ids(&filter_text(&all, "led")), vec![3]);
    }

    #[test]
    fn test_text_filter_blank_is_noop() {
        let catalog = catalog();
        let all: Vec<&CatalogItem> = catalog.iter().collect();
        assert_eq!(filter_text(&all, "   ").len(), 4);
    }

    #[test]
    fn test_category_filter_all_is_noop() {
        let catalog = catalog();
        let all: Vec<&CatalogItem> = catalog.iter().collect();
        assert_eq!(ids(&filter_category(&all, "all")), ids(&all));
    }

    #[test]
    fn test_category_filter_case_sensitive() {
        let catalog = catalog();
        let all: Vec<&CatalogItem> = catalog.iter().collect();
        assert_eq!(ids(&filter_category(&all, "Outdoor")), vec![2, 4]);
        assert!(filter_category(&all, "outdoor").is_empty());
    }

    #[test]
    fn test_categories_sorted_with_all_prefix() {
        assert_eq!(
            categories(&catalog()),
            vec!["all", "Home", "Kitchen", "Outdoor"]
        );
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_filters_compose_in_either_order() {
        let catalog = catalog();
        let all: Vec<&CatalogItem> = catalog.iter().collect();

        let a = filter_category(&filter_text(&all, "o"), "Outdoor");
        let b = filter_text(&filter_category(&all, "Outdoor"), "o");
        assert_eq!(ids(&a), ids(&b));

        let query = Query::new("o", "Outdoor");
        assert_eq!(ids(&query.apply(&all)), ids(&a));
    }

    #[test]
    fn test_default_query_keeps_everything() {
        let catalog = catalog();
        let all: Vec<&CatalogItem> = catalog.iter().collect();
        assert_eq!(Query::default().apply(&all).len(), catalog.len());
    }
}

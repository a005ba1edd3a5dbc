//! Catalog loading.
//!
//! The catalog is a JSON array of items, read once at startup and treated as
//! read-only for the rest of the process.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;
use crate::query;
use crate::types::CatalogItem;

/// An immutable, ordered list of catalog items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<CatalogItem> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_items(items);
        tracing::info!(
            "Loaded catalog: {} items in {} categories from {:?}",
            catalog.len(),
            catalog.categories().len() - 1,
            path,
        );
        Ok(catalog)
    }

    /// Build a catalog from items already in memory.
    ///
    /// Duplicate ids are kept (order matters for ranking ties) but logged.
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                tracing::warn!("Duplicate catalog id {} ({:?})", item.id, item.name);
            }
        }
        Self { items }
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Borrowed view of every item, the input shape the query filters take.
    pub fn all(&self) -> Vec<&CatalogItem> {
        self.items.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item with the given id.
    pub fn get(&self, id: u64) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Distinct categories, sorted, prefixed with `"all"`.
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 1, "name": "Ceramic Mug", "category": "kitchen",
         "tags": ["coffee", "mug"], "description": "350ml", "price": 12.5, "image": "mug.jpg"},
        {"id": 2, "name": "Trail Boots", "category": "outdoor", "tags": ["hiking"]},
        {"id": 3, "name": "Tea Kettle", "category": "kitchen"}
    ]"#;

    fn write_catalog(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_catalog() {
        let (_dir, path) = write_catalog(SAMPLE);
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.items()[0].tags, vec!["coffee", "mug"]);
        assert_eq!(catalog.get(2).unwrap().name, "Trail Boots");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_categories() {
        let (_dir, path) = write_catalog(SAMPLE);
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.categories(), vec!["all", "kitchen", "outdoor"]);
    }

    #[test]
    fn test_missing_catalog() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_malformed_catalog() {
        let (_dir, path) = write_catalog(r#"{"items": "nope"}"#);
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("catalog.json"));
    }

    #[test]
    fn test_duplicate_ids_are_kept_in_order() {
        let (_dir, path) = write_catalog(
            r#"[{"id": 1, "name": "A", "category": "x"}, {"id": 1, "name": "B", "category": "x"}]"#,
        );
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "A");
    }

    #[test]
    fn test_empty_catalog() {
        let (_dir, path) = write_catalog("[]");
        let catalog = Catalog::load(&path).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.categories(), vec!["all"]);
    }
}

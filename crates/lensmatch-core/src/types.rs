//! Core data types shared by the ranking engine and its collaborators.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A single label produced by the external image classifier.
///
/// Prediction lists are ordered by descending confidence as the classifier
/// produced them. The ranking engine treats that order as authoritative and
/// never re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Free-text label (e.g. "coffee mug" or "tabby, tabby cat")
    #[serde(alias = "className")]
    pub label: String,

    /// Confidence score, expected in 0.0..=1.0
    #[serde(alias = "probability", alias = "score")]
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Category as stored (compared case-sensitively by the category filter)
    pub category: String,

    /// Free-form tags, in catalog order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Long-form description
    #[serde(default)]
    pub description: String,

    /// Unit price
    #[serde(default)]
    pub price: f64,

    /// Reference to the product image (URL or path)
    #[serde(default, rename = "image")]
    pub image_ref: String,
}

/// One normalized word from a prediction label, with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionToken {
    /// Lower-cased word
    pub token: String,

    /// Confidence of the originating prediction
    pub confidence: f64,

    /// Position of the originating prediction (0 = most confident)
    pub rank: usize,
}

/// Which field of an item a prediction matched, and the field's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchedField {
    Tag(String),
    Name(String),
}

impl fmt::Display for MatchedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(value) => write!(f, "tag:{value}"),
            Self::Name(value) => write!(f, "name:{value}"),
        }
    }
}

impl Serialize for MatchedField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A scored catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    /// The catalog item
    pub item: &'a CatalogItem,

    /// Accumulated relevance score (0 for fallback results)
    pub score: f64,

    /// Fields that matched, deduplicated, in first-match order
    pub matched_fields: Vec<MatchedField>,
}

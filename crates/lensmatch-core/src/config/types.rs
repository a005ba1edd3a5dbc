//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::ranking::FieldWeights;

/// Ranking engine tuning.
///
/// Defaults reproduce the hand-tuned heuristic: 5/4/3/2 rank decay, tags at
/// 100/10, names at 150/15, category at 5, and a visibility threshold of 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of items returned when the caller gives no limit
    pub default_limit: usize,

    /// Minimum total score for an item to be returned.
    /// Tuned for the default weights; revisit when changing them.
    pub min_score: f64,

    /// Prediction words shorter than this are ignored ("a", "of")
    pub min_token_len: usize,

    /// Both tokens must be at least this long for a containment match
    pub min_partial_len: usize,

    /// Weight per prediction rank, most confident first
    pub rank_weights: Vec<f64>,

    /// Weight for ranks past the end of `rank_weights`
    pub rank_weight_floor: f64,

    /// Flat weight for category containment matches
    pub category_weight: f64,

    /// Base weights for tag matches
    pub tag_weights: FieldWeights,

    /// Base weights for name matches
    pub name_weights: FieldWeights,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: 8,
            min_score: 100.0,
            min_token_len: 3,
            min_partial_len: 4,
            rank_weights: vec![5.0, 4.0, 3.0],
            rank_weight_floor: 2.0,
            category_weight: 5.0,
            tag_weights: FieldWeights::TAG,
            name_weights: FieldWeights::NAME,
        }
    }
}

/// Catalog source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "~/.lensmatch/catalog.json".to_string(),
        }
    }
}

/// Which label predictor to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    /// Read `<image>.predictions.json` next to the image
    Sidecar,
    /// POST the image to an HTTP classification endpoint
    Http,
}

/// External classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Predictor backend
    pub provider: ClassifierProvider,

    /// Keep at most this many predictions
    pub top_k: usize,

    /// Drop predictions below this confidence
    pub min_confidence: f64,

    /// Classification endpoint (http provider only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token for the endpoint (supports ${ENV_VAR} syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Max retry attempts for transient failures
    pub retry_attempts: u32,

    /// Base delay between retries in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::Sidecar,
            top_k: 5,
            min_confidence: 0.0,
            endpoint: None,
            api_key: None,
            timeout_ms: 10_000,
            retry_attempts: 2,
            retry_delay_ms: 500,
        }
    }
}

/// Limits applied to uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json", "jsonl" or "text")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

//! Error types for Lensmatch.
//!
//! The ranking engine itself is infallible. Errors come from the layers that
//! touch the outside world: configuration, the catalog file, the uploaded
//! image, and the external classifier.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Lensmatch operations.
#[derive(Error, Debug)]
pub enum LensmatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Uploaded image was rejected
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Label prediction failed
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Catalog loading errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file does not exist
    #[error("Catalog not found: {0}")]
    NotFound(PathBuf),

    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a valid item list
    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while validating an uploaded image.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    TooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// File is not an image we can send to the classifier
    #[error("Unsupported format for {path}: {message}")]
    UnsupportedFormat { path: PathBuf, message: String },

    /// File could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Errors from the external label predictor.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The predictor could not be initialized
    #[error("Failed to load classifier: {message}")]
    Load { message: String },

    /// The predictor call failed
    #[error("Classifier request failed: {message}")]
    Request {
        message: String,
        /// HTTP status code, when the failure came from an HTTP response.
        status_code: Option<u16>,
    },

    /// The predictor did not answer in time
    #[error("Classifier timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The predictor answered with something that is not a prediction list
    #[error("Invalid classifier response: {message}")]
    InvalidResponse { message: String },
}

/// Convenience type alias for Lensmatch results.
pub type Result<T> = std::result::Result<T, LensmatchError>;

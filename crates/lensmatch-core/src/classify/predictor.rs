//! Label predictor traits, response parsing, and the provider factory.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{ClassifierConfig, ClassifierProvider};
use crate::error::ClassifierError;
use crate::types::Prediction;
use crate::upload::ImageUpload;

/// An external image classifier.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn LabelPredictor>` for dynamic dispatch).
#[async_trait]
pub trait LabelPredictor: Send + Sync {
    /// Provider name for logging (e.g. "sidecar", "http").
    fn name(&self) -> &str;

    /// Classify an image. Implementations return labels in the order the
    /// classifier produced them.
    async fn predict(&self, image: &ImageUpload) -> Result<Vec<Prediction>, ClassifierError>;
}

/// Produces a ready predictor. Called at most once per successful load by
/// [`LazyPredictor`](super::LazyPredictor).
#[async_trait]
pub trait PredictorLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn LabelPredictor>, ClassifierError>;
}

/// A predictor that always returns the same labels.
///
/// Useful when predictions were resolved elsewhere and only ranking remains.
pub struct FixedPredictor {
    predictions: Vec<Prediction>,
}

impl FixedPredictor {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }
}

#[async_trait]
impl LabelPredictor for FixedPredictor {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn predict(&self, _image: &ImageUpload) -> Result<Vec<Prediction>, ClassifierError> {
        Ok(self.predictions.clone())
    }
}

#[async_trait]
impl PredictorLoader for FixedPredictor {
    async fn load(&self) -> Result<Arc<dyn LabelPredictor>, ClassifierError> {
        Ok(Arc::new(FixedPredictor::new(self.predictions.clone())))
    }
}

/// Classifier responses come either as a bare list or wrapped in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum PredictionPayload {
    List(Vec<Prediction>),
    Wrapped { predictions: Vec<Prediction> },
}

/// Parse a classifier JSON response into predictions.
pub fn parse_predictions(json: &str) -> Result<Vec<Prediction>, ClassifierError> {
    let payload: PredictionPayload =
        serde_json::from_str(json).map_err(|e| ClassifierError::InvalidResponse {
            message: format!("expected a prediction list: {e}"),
        })?;

    Ok(match payload {
        PredictionPayload::List(predictions) => predictions,
        PredictionPayload::Wrapped { predictions } => predictions,
    })
}

/// Bring raw predictions into the shape the ranking engine expects.
///
/// Drops labels below `min_confidence`, orders by descending confidence
/// (stable, so equal confidences keep classifier order), and keeps `top_k`.
pub fn normalize(
    mut predictions: Vec<Prediction>,
    top_k: usize,
    min_confidence: f64,
) -> Vec<Prediction> {
    predictions.retain(|p| p.confidence >= min_confidence);
    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    predictions.truncate(top_k);
    predictions
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Create the loader for the configured provider.
pub fn create_loader(config: &ClassifierConfig) -> Result<Box<dyn PredictorLoader>, ClassifierError> {
    match config.provider {
        ClassifierProvider::Sidecar => Ok(Box::new(super::sidecar::SidecarPredictor)),
        ClassifierProvider::Http => {
            let endpoint = config
                .endpoint
                .clone()
                .filter(|e| !e.trim().is_empty())
                .ok_or_else(|| ClassifierError::Load {
                    message: "classifier.endpoint is not set".to_string(),
                })?;
            let api_key = config.api_key.as_deref().and_then(resolve_env_var);
            Ok(Box::new(super::http::HttpLoader {
                endpoint,
                api_key,
                timeout_ms: config.timeout_ms,
                retry_attempts: config.retry_attempts,
                retry_delay_ms: config.retry_delay_ms,
            }))
        }
    }
}

//! Predictions read from a JSON file stored next to the image.
//!
//! `photo.jpg` is classified by reading `photo.jpg.predictions.json`, which
//! lets an offline classifier run ahead of time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use super::predictor::{parse_predictions, LabelPredictor, PredictorLoader};
use crate::error::ClassifierError;
use crate::types::Prediction;
use crate::upload::ImageUpload;

const SIDECAR_SUFFIX: &str = ".predictions.json";

/// Reads `<image>.predictions.json`.
pub struct SidecarPredictor;

impl SidecarPredictor {
    /// Path of the sidecar file for an image.
    pub fn sidecar_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_os_string();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }
}

#[async_trait]
impl LabelPredictor for SidecarPredictor {
    fn name(&self) -> &str {
        "sidecar"
    }

    async fn predict(&self, image: &ImageUpload) -> Result<Vec<Prediction>, ClassifierError> {
        let path = Self::sidecar_path(image.path());
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ClassifierError::Request {
                    message: format!("No sidecar predictions at {:?}: {e}", path),
                    status_code: None,
                })?;

        let predictions = parse_predictions(&content).inspect_err(|e| {
            tracing::warn!("Unusable sidecar {:?}: {e}", path);
        })?;
        tracing::debug!("Read {} predictions from {:?}", predictions.len(), path);
        Ok(predictions)
    }
}

#[async_trait]
impl PredictorLoader for SidecarPredictor {
    async fn load(&self) -> Result<Arc<dyn LabelPredictor>, ClassifierError> {
        Ok(Arc::new(SidecarPredictor))
    }
}

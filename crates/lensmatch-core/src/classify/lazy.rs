//! Lazily loaded, explicitly owned label predictor.
//!
//! The model behind a predictor can be expensive to bring up, so it is loaded
//! on first use and kept until the owner disposes of it. Concurrent first
//! callers share a single load.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::predictor::{normalize, LabelPredictor, PredictorLoader};
use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::types::Prediction;
use crate::upload::ImageUpload;

/// Owns a predictor loader and the predictor it produced, if any.
pub struct LazyPredictor {
    loader: Box<dyn PredictorLoader>,
    model: OnceCell<Arc<dyn LabelPredictor>>,
    top_k: usize,
    min_confidence: f64,
}

impl LazyPredictor {
    /// Wrap a loader. Nothing is loaded until [`load`](Self::load) or
    /// [`predict`](Self::predict) is called.
    pub fn new(loader: Box<dyn PredictorLoader>, config: &ClassifierConfig) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
            top_k: config.top_k,
            min_confidence: config.min_confidence,
        }
    }

    /// Load the predictor if needed and return it.
    ///
    /// Runs the loader at most once while loaded, even with concurrent
    /// callers. A failed load leaves the slot empty so the next call retries.
    pub async fn load(&self) -> Result<Arc<dyn LabelPredictor>, ClassifierError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let start = std::time::Instant::now();
                let model = self.loader.load().await?;
                tracing::info!(
                    "Loaded {} classifier in {:?}",
                    model.name(),
                    start.elapsed()
                );
                Ok::<_, ClassifierError>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Whether a predictor is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    /// Drop the loaded predictor. The next `load` runs the loader again.
    ///
    /// Returns whether anything was loaded. Requires exclusive access, so no
    /// prediction can be in flight on this handle.
    pub fn dispose(&mut self) -> bool {
        let disposed = self.model.take().is_some();
        if disposed {
            tracing::debug!("Disposed classifier");
        }
        disposed
    }

    /// Classify an image, loading the predictor on first use.
    ///
    /// Output is confidence-descending, filtered by `min_confidence`, and
    /// at most `top_k` long.
    pub async fn predict(&self, image: &ImageUpload) -> Result<Vec<Prediction>, ClassifierError> {
        let model = self.load().await?;
        let raw = model.predict(image).await?;
        let predictions = normalize(raw, self.top_k, self.min_confidence);
        tracing::debug!(
            "{} predicted {:?}",
            model.name(),
            predictions
                .iter()
                .map(|p| format!("{} ({:.2})", p.label, p.confidence))
                .collect::<Vec<_>>()
        );
        Ok(predictions)
    }
}

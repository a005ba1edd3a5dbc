//! HTTP classification endpoint.
//!
//! POSTs the raw image bytes with the detected `Content-Type` and expects a
//! JSON prediction list back, either bare or as `{"predictions": [...]}`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::predictor::{parse_predictions, LabelPredictor, PredictorLoader};
use super::retry;
use crate::error::ClassifierError;
use crate::types::Prediction;
use crate::upload::ImageUpload;

/// Builds an [`HttpPredictor`] with a shared connection pool.
pub struct HttpLoader {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

#[async_trait]
impl PredictorLoader for HttpLoader {
    async fn load(&self) -> Result<Arc<dyn LabelPredictor>, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|e| ClassifierError::Load {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        tracing::info!("Using classifier endpoint {}", self.endpoint);
        Ok(Arc::new(HttpPredictor {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout_ms: self.timeout_ms,
            retry_attempts: self.retry_attempts,
            retry_delay_ms: self.retry_delay_ms,
            client,
        }))
    }
}

/// Classifies images through a remote HTTP endpoint.
pub struct HttpPredictor {
    endpoint: String,
    api_key: Option<String>,
    timeout_ms: u64,
    retry_attempts: u32,
    retry_delay_ms: u64,
    client: reqwest::Client,
}

impl HttpPredictor {
    /// One request, no retries.
    async fn request(&self, image: &ImageUpload) -> Result<Vec<Prediction>, ClassifierError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, image.mime_type())
            .body(image.bytes().to_vec());
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout {
                    timeout_ms: self.timeout_ms,
                }
            } else if e.is_connect() {
                ClassifierError::Request {
                    message: format!("Failed to connect to classifier: {e}"),
                    status_code: None,
                }
            } else {
                ClassifierError::Request {
                    message: format!("Classifier request failed: {e}"),
                    status_code: None,
                }
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Request {
                message: format!("Classifier HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body = resp.text().await.map_err(|e| ClassifierError::Request {
            message: format!("Failed to read classifier response: {e}"),
            status_code: None,
        })?;
        parse_predictions(&body)
    }
}

#[async_trait]
impl LabelPredictor for HttpPredictor {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, image: &ImageUpload) -> Result<Vec<Prediction>, ClassifierError> {
        let mut attempt = 0;
        loop {
            match self.request(image).await {
                Ok(predictions) => return Ok(predictions),
                Err(e) if attempt < self.retry_attempts && retry::is_retryable(&e) => {
                    let delay = retry::backoff_duration(attempt, self.retry_delay_ms);
                    attempt += 1;
                    tracing::warn!(
                        "Classifier call failed ({e}); retry {attempt}/{} after {delay:?}",
                        self.retry_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::output::OutputFormat;

use super::{ClassifierProvider, Config};

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

/// False for negatives and NaN.
fn non_negative(value: f64) -> bool {
    value >= 0.0
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let ranking = &self.ranking;
        if ranking.default_limit == 0 {
            return Err(invalid("ranking.default_limit must be > 0"));
        }
        if !non_negative(ranking.min_score) {
            return Err(invalid("ranking.min_score must be >= 0"));
        }
        if ranking.min_partial_len == 0 {
            return Err(invalid("ranking.min_partial_len must be > 0"));
        }
        if ranking.rank_weights.is_empty() {
            return Err(invalid("ranking.rank_weights must not be empty"));
        }
        if ranking.rank_weights.iter().any(|w| !non_negative(*w))
            || !non_negative(ranking.rank_weight_floor)
        {
            return Err(invalid("ranking.rank_weights must be >= 0"));
        }
        if ranking.rank_weights.windows(2).any(|w| w[1] > w[0]) {
            return Err(invalid("ranking.rank_weights must be non-increasing"));
        }
        if ranking
            .rank_weights
            .last()
            .is_some_and(|last| ranking.rank_weight_floor > *last)
        {
            return Err(invalid(
                "ranking.rank_weight_floor must not exceed the last rank weight",
            ));
        }
        let weights = [
            ranking.category_weight,
            ranking.tag_weights.exact,
            ranking.tag_weights.partial,
            ranking.name_weights.exact,
            ranking.name_weights.partial,
        ];
        if weights.iter().any(|w| !non_negative(*w)) {
            return Err(invalid("ranking field weights must be >= 0"));
        }

        let classifier = &self.classifier;
        if classifier.top_k == 0 {
            return Err(invalid("classifier.top_k must be > 0"));
        }
        if !(0.0..=1.0).contains(&classifier.min_confidence) {
            return Err(invalid(
                "classifier.min_confidence must be between 0.0 and 1.0",
            ));
        }
        if classifier.timeout_ms == 0 {
            return Err(invalid("classifier.timeout_ms must be > 0"));
        }
        if classifier.provider == ClassifierProvider::Http
            && classifier
                .endpoint
                .as_deref()
                .is_none_or(|e| e.trim().is_empty())
        {
            return Err(invalid(
                "classifier.endpoint is required for the http provider",
            ));
        }

        if self.upload.max_file_size_mb == 0 {
            return Err(invalid("upload.max_file_size_mb must be > 0"));
        }
        if OutputFormat::parse(&self.output.format).is_none() {
            return Err(invalid("output.format must be one of: json, jsonl, text"));
        }
        Ok(())
    }
}

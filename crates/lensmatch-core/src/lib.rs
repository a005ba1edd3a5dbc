//! Lensmatch Core - rank a product catalog by what a classifier sees in a photo.
//!
//! An external image classifier turns an uploaded photo into a ranked list of
//! labels. Lensmatch scores every catalog item against those labels and
//! returns the most relevant ones.
//!
//! # Architecture
//!
//! ```text
//! Image → Upload check → Classifier (external) → Predictions ─┐
//!                                                              ├→ RankingEngine → Query filters → items
//!                                          Catalog (JSON) ─────┘
//! ```
//!
//! The ranking engine is a pure, synchronous function of predictions and
//! catalog. Only the classifier call is async.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lensmatch_core::{Catalog, Config, Lensmatch};
//!
//! #[tokio::main]
//! async fn main() -> lensmatch_core::Result<()> {
//!     let config = Config::load()?;
//!     let catalog = Catalog::load(&config.catalog_path())?;
//!     let lensmatch = Lensmatch::new(config, catalog)?;
//!
//!     let report = lensmatch.rank_image("./mug.jpg".as_ref(), None).await?;
//!     for result in &report.ranking.results {
//!         println!("{} ({:.0})", result.item.name, result.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod query;
pub mod ranking;
pub mod types;
pub mod upload;

pub use catalog::Catalog;
pub use classify::{LabelPredictor, LazyPredictor, PredictorLoader};
pub use config::Config;
pub use error::{
    CatalogError, ClassifierError, ConfigError, LensmatchError, Result, UploadError,
};
pub use output::{OutputFormat, OutputWriter};
pub use query::Query;
pub use ranking::{Ranking, RankingEngine};
pub use types::{CatalogItem, MatchResult, MatchedField, Prediction};
pub use upload::ImageUpload;

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything produced for one uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport<'a> {
    /// The image that was classified
    pub image: PathBuf,

    /// Normalized classifier output fed to the ranking engine
    pub predictions: Vec<Prediction>,

    /// Ranked catalog items
    pub ranking: Ranking<'a>,
}

/// Lensmatch instance: configuration, catalog, ranking engine, classifier.
pub struct Lensmatch {
    config: Config,
    catalog: Catalog,
    engine: RankingEngine,
    predictor: LazyPredictor,
}

impl Lensmatch {
    /// Create an instance using the configured classifier provider.
    ///
    /// The classifier is not loaded until the first image is ranked.
    pub fn new(config: Config, catalog: Catalog) -> Result<Self> {
        let loader = classify::create_loader(&config.classifier)?;
        Ok(Self::with_loader(config, catalog, loader))
    }

    /// Create an instance with a custom predictor loader.
    pub fn with_loader(config: Config, catalog: Catalog, loader: Box<dyn PredictorLoader>) -> Self {
        tracing::debug!("Initializing Lensmatch v{}", VERSION);
        let engine = RankingEngine::new(&config.ranking);
        let predictor = LazyPredictor::new(loader, &config.classifier);
        Self {
            config,
            catalog,
            engine,
            predictor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Mutable access to the classifier, e.g. to dispose of it.
    pub fn predictor_mut(&mut self) -> &mut LazyPredictor {
        &mut self.predictor
    }

    /// Rank the catalog against already-resolved predictions.
    ///
    /// `limit` defaults to `ranking.default_limit`.
    pub fn rank(&self, predictions: &[Prediction], limit: Option<usize>) -> Ranking<'_> {
        let limit = limit.unwrap_or(self.config.ranking.default_limit);
        self.engine
            .rank_detailed(predictions, self.catalog.items(), limit)
    }

    /// Validate an uploaded image, classify it, and rank the catalog.
    pub async fn rank_image(&self, path: &Path, limit: Option<usize>) -> Result<MatchReport<'_>> {
        let upload = ImageUpload::open(path, &self.config.upload)?;
        let predictions = self.predictor.predict(&upload).await?;
        let ranking = self.rank(&predictions, limit);

        tracing::info!(
            "Ranked {:?}: {} predictions, {} items{}",
            path,
            predictions.len(),
            ranking.results.len(),
            if ranking.fallback { " (fallback)" } else { "" }
        );

        Ok(MatchReport {
            image: path.to_path_buf(),
            predictions,
            ranking,
        })
    }

    /// Filter the whole catalog with a text/category query.
    pub fn search(&self, query: &Query) -> Vec<&CatalogItem> {
        query.apply(&self.catalog.all())
    }

    /// Distinct categories, prefixed with `"all"`.
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FixedPredictor;

    fn catalog() -> Catalog {
        let items: Vec<CatalogItem> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Tea Kettle", "category": "kitchen", "tags": ["tea", "kettle"]},
                {"id": 2, "name": "Ceramic Mug", "category": "kitchen", "tags": ["coffee", "mug", "kitchen"]},
                {"id": 3, "name": "Trail Boots", "category": "outdoor", "tags": ["hiking", "boots"]}
            ]"#,
        )
        .unwrap();
        Catalog::from_items(items)
    }

    fn lensmatch(predictions: Vec<Prediction>) -> Lensmatch {
        Lensmatch::with_loader(
            Config::default(),
            catalog(),
            Box::new(FixedPredictor::new(predictions)),
        )
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_rank_uses_default_limit() {
        let lm = lensmatch(vec![]);
        let ranking = lm.rank(&[], None);
        assert!(ranking.fallback);
        assert_eq!(ranking.results.len(), 3);

        let ranking = lm.rank(&[], Some(1));
        assert_eq!(ranking.items()[0].id, 1);
    }

    #[tokio::test]
    async fn test_rank_image_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mug.png");
        std::fs::write(
            &path,
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0],
        )
        .unwrap();

        let lm = lensmatch(vec![Prediction::new("coffee mug", 0.92)]);
        let report = lm.rank_image(&path, None).await.unwrap();
        assert_eq!(report.predictions.len(), 1);
        assert!(!report.ranking.fallback);
        assert_eq!(report.ranking.items()[0].id, 2);
        assert_eq!(report.ranking.results.len(), 1);
    }

    #[tokio::test]
    async fn test_rank_image_rejects_bad_upload() {
        let lm = lensmatch(vec![]);
        let err = lm
            .rank_image(Path::new("/nonexistent/photo.jpg"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LensmatchError::Upload(UploadError::NotFound(_))));
    }

    #[test]
    fn test_search_and_categories() {
        let lm = lensmatch(vec![]);
        let found = lm.search(&Query::new("boots", "all"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);
        assert!(lm.search(&Query::new("boots", "kitchen")).is_empty());
        assert_eq!(lm.categories(), vec!["all", "kitchen", "outdoor"]);
    }

    #[tokio::test]
    async fn test_dispose_predictor() {
        let mut lm = lensmatch(vec![]);
        lm.predictor_mut().load().await.unwrap();
        assert!(lm.predictor_mut().dispose());
        assert!(!lm.predictor_mut().is_loaded());
    }
}

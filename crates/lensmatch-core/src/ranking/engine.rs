//! Catalog ranking: score every item, keep the strong ones, sort, cut.

use serde::Serialize;

use crate::config::RankingConfig;
use crate::types::{CatalogItem, MatchResult, MatchedField, Prediction};

use super::index::PredictionIndex;
use super::scorer::{ExactOrContains, FieldScorer, FieldWeights, RankDecay};

/// Output of a ranking call.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking<'a> {
    /// Ranked results, best first
    pub results: Vec<MatchResult<'a>>,

    /// True when nothing cleared the threshold and `results` holds the
    /// first catalog items in their original order
    pub fallback: bool,
}

impl<'a> Ranking<'a> {
    /// The ranked items without scores.
    pub fn items(&self) -> Vec<&'a CatalogItem> {
        self.results.iter().map(|r| r.item).collect()
    }
}

/// Ranks catalog items against a prediction list.
///
/// Pure and synchronous: no I/O, no interior mutability. A single engine can
/// be shared across threads and called concurrently.
pub struct RankingEngine {
    scorer: FieldScorer,
    tag_weights: FieldWeights,
    name_weights: FieldWeights,
    min_score: f64,
    min_token_len: usize,
}

impl RankingEngine {
    /// Create an engine from ranking configuration.
    pub fn new(config: &RankingConfig) -> Self {
        let decay = RankDecay::new(config.rank_weights.clone(), config.rank_weight_floor);
        let scorer = FieldScorer::new(decay, config.category_weight).with_strategy(
            ExactOrContains {
                min_partial_len: config.min_partial_len,
            },
        );

        Self {
            scorer,
            tag_weights: config.tag_weights,
            name_weights: config.name_weights,
            min_score: config.min_score,
            min_token_len: config.min_token_len,
        }
    }

    /// Replace the field scorer (custom decay or match strategy).
    pub fn with_scorer(mut self, scorer: FieldScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Minimum total score an item needs to appear in ranked output.
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Build the prediction index the way `rank` does.
    pub fn index(&self, predictions: &[Prediction]) -> PredictionIndex {
        PredictionIndex::build(predictions, self.min_token_len)
    }

    /// Score a single item: every tag, the name, and the category.
    pub fn score_item<'a>(&self, item: &'a CatalogItem, index: &PredictionIndex) -> MatchResult<'a> {
        let mut score = 0.0;
        let mut matched_fields = Vec::new();

        for tag in &item.tags {
            let field = self.scorer.score_value(tag, index, &self.tag_weights);
            score += field.score;
            if field.matched {
                push_unique(&mut matched_fields, MatchedField::Tag(tag.clone()));
            }
        }

        let name = self
            .scorer
            .score_value(&item.name, index, &self.name_weights);
        score += name.score;
        if name.matched {
            push_unique(&mut matched_fields, MatchedField::Name(item.name.clone()));
        }

        score += self.scorer.score_category(&item.category, index).score;

        MatchResult {
            item,
            score,
            matched_fields,
        }
    }

    /// Rank `items` and return scores, matched fields and the fallback flag.
    pub fn rank_detailed<'a>(
        &self,
        predictions: &[Prediction],
        items: &'a [CatalogItem],
        limit: usize,
    ) -> Ranking<'a> {
        let index = self.index(predictions);

        let mut results: Vec<MatchResult<'a>> = items
            .iter()
            .map(|item| self.score_item(item, &index))
            .inspect(|r| tracing::trace!(id = r.item.id, score = r.score, "scored item"))
            .filter(|r| r.score > 0.0 && r.score >= self.min_score)
            .collect();

        // Decided before truncation: `limit = 0` is not a failed match.
        let fallback = results.is_empty();

        // Stable: equal scores keep catalog order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);

        if fallback {
            results = items
                .iter()
                .take(limit)
                .map(|item| MatchResult {
                    item,
                    score: 0.0,
                    matched_fields: Vec::new(),
                })
                .collect();
        }

        tracing::debug!(
            predictions = predictions.len(),
            tokens = index.len(),
            catalog = items.len(),
            returned = results.len(),
            fallback,
            "Ranked catalog"
        );

        Ranking { results, fallback }
    }

    /// Rank `items` and return at most `limit` of them, best first.
    pub fn rank<'a>(
        &self,
        predictions: &[Prediction],
        items: &'a [CatalogItem],
        limit: usize,
    ) -> Vec<&'a CatalogItem> {
        self.rank_detailed(predictions, items, limit).items()
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(&RankingConfig::default())
    }
}

fn push_unique(fields: &mut Vec<MatchedField>, field: MatchedField) {
    if !fields.contains(&field) {
        fields.push(field);
    }
}

//! Per-field match scoring against the prediction index.
//!
//! A field (one tag, the item name, the category) is scored by comparing each
//! of its tokens with every prediction token. Each qualifying pair adds
//! `base * confidence * rank_weight(rank)`, where the base depends on the
//! field family and on whether the pair matched exactly or by containment.

use serde::{Deserialize, Serialize};

use super::index::PredictionIndex;
use super::tokenize::tokenize_with_whole;

/// Step-function weight applied by prediction rank.
///
/// The classifier's top few guesses dominate scoring: with the default steps
/// a rank-0 token counts 5x, rank 1 4x, rank 2 3x, everything after 2x.
#[derive(Debug, Clone, PartialEq)]
pub struct RankDecay {
    steps: Vec<f64>,
    floor: f64,
}

impl RankDecay {
    /// `steps[i]` is the weight for rank `i`; ranks past the end get `floor`.
    pub fn new(steps: Vec<f64>, floor: f64) -> Self {
        Self { steps, floor }
    }

    pub fn weight(&self, rank: usize) -> f64 {
        self.steps.get(rank).copied().unwrap_or(self.floor)
    }
}

impl Default for RankDecay {
    fn default() -> Self {
        Self::new(vec![5.0, 4.0, 3.0], 2.0)
    }
}

/// Base weights for one field family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    /// Base for an exact token match
    pub exact: f64,

    /// Base for a containment match
    pub partial: f64,
}

impl FieldWeights {
    /// Defaults for tags.
    pub const TAG: Self = Self {
        exact: 100.0,
        partial: 10.0,
    };

    /// Defaults for item names, which are more specific than tags.
    pub const NAME: Self = Self {
        exact: 150.0,
        partial: 15.0,
    };
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self::TAG
    }
}

/// How a field token relates to a prediction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
    None,
}

/// String comparison used to pair field tokens with prediction tokens.
pub trait MatchStrategy: Send + Sync {
    fn classify(&self, field_token: &str, prediction_token: &str) -> MatchKind;
}

/// Exact equality, else substring containment in either direction.
///
/// Containment only counts when both tokens are at least `min_partial_len`
/// characters long, which keeps "cat" from matching "category".
#[derive(Debug, Clone, Copy)]
pub struct ExactOrContains {
    pub min_partial_len: usize,
}

impl Default for ExactOrContains {
    fn default() -> Self {
        Self { min_partial_len: 4 }
    }
}

impl MatchStrategy for ExactOrContains {
    fn classify(&self, field_token: &str, prediction_token: &str) -> MatchKind {
        if field_token == prediction_token {
            return MatchKind::Exact;
        }

        let long_enough = field_token.chars().count() >= self.min_partial_len
            && prediction_token.chars().count() >= self.min_partial_len;
        if long_enough
            && (field_token.contains(prediction_token) || prediction_token.contains(field_token))
        {
            MatchKind::Partial
        } else {
            MatchKind::None
        }
    }
}

/// Result of scoring one field value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldScore {
    /// Sum of every qualifying pair's contribution
    pub score: f64,

    /// Whether any pair matched at all
    pub matched: bool,
}

/// Scores catalog fields against a prediction index.
pub struct FieldScorer {
    decay: RankDecay,
    strategy: Box<dyn MatchStrategy>,
    category_weight: f64,
}

impl FieldScorer {
    /// Create a scorer using [`ExactOrContains`] matching.
    pub fn new(decay: RankDecay, category_weight: f64) -> Self {
        Self {
            decay,
            strategy: Box::new(ExactOrContains::default()),
            category_weight,
        }
    }

    /// Swap the token comparison strategy.
    pub fn with_strategy(mut self, strategy: impl MatchStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn decay(&self) -> &RankDecay {
        &self.decay
    }

    /// Score one field value's tokens against every prediction token.
    ///
    /// Contributions are summed over all pairs; nothing is capped per field.
    pub fn score_field(
        &self,
        field_tokens: &[String],
        index: &PredictionIndex,
        weights: &FieldWeights,
    ) -> FieldScore {
        let mut result = FieldScore::default();

        for field_token in field_tokens {
            for pred in index.tokens() {
                let base = match self.strategy.classify(field_token, &pred.token) {
                    MatchKind::Exact => weights.exact,
                    MatchKind::Partial => weights.partial,
                    MatchKind::None => continue,
                };
                result.score += base * pred.confidence * self.decay.weight(pred.rank);
                result.matched = true;
            }
        }

        result
    }

    /// Score a whole multi-word value against whole multi-word labels.
    ///
    /// Only exact phrase equality counts, at the exact base weight. Words are
    /// scored separately by [`score_field`](Self::score_field), so a phrase
    /// hit is a bonus on top of its per-word hits.
    pub fn score_phrase(
        &self,
        phrase: &str,
        index: &PredictionIndex,
        weights: &FieldWeights,
    ) -> FieldScore {
        let mut result = FieldScore::default();
        for pred in index.phrases() {
            if pred.token == phrase {
                result.score += weights.exact * pred.confidence * self.decay.weight(pred.rank);
                result.matched = true;
            }
        }
        result
    }

    /// Score one tag or name: a phrase pass for multi-word values, then a
    /// word pass over its individual tokens.
    pub fn score_value(
        &self,
        value: &str,
        index: &PredictionIndex,
        weights: &FieldWeights,
    ) -> FieldScore {
        let tokens = tokenize_with_whole(value);
        let (phrase, words) = match tokens.split_first() {
            Some((whole, words)) if !words.is_empty() => (Some(whole), words),
            _ => (None, tokens.as_slice()),
        };

        let mut result = self.score_field(words, index, weights);
        if let Some(phrase) = phrase {
            let bonus = self.score_phrase(phrase, index, weights);
            result.score += bonus.score;
            result.matched |= bonus.matched;
        }
        result
    }

    /// Score a category by plain containment at the flat category weight.
    ///
    /// Categories are coarse ("kitchen", "outdoor"), so there is no
    /// exact/partial split and no length gate.
    pub fn score_category(&self, category: &str, index: &PredictionIndex) -> FieldScore {
        let category = category.trim().to_lowercase();
        let mut result = FieldScore::default();
        if category.is_empty() {
            return result;
        }

        for pred in index.tokens() {
            if category.contains(pred.token.as_str()) || pred.token.contains(category.as_str()) {
                result.score +=
                    self.category_weight * pred.confidence * self.decay.weight(pred.rank);
                result.matched = true;
            }
        }

        result
    }
}

impl Default for FieldScorer {
    fn default() -> Self {
        Self::new(RankDecay::default(), 5.0)
    }
}

//! Flattened prediction tokens used as the scoring basis.

use crate::types::{Prediction, PredictionToken};

use super::tokenize::{tokenize, tokenize_with_whole};

/// Every usable word from a prediction list, tagged with its confidence and
/// the rank of the prediction it came from.
///
/// Multi-word labels are also kept whole, as phrases, so a field value like
/// "coffee mug" can match the label "coffee mug" as a unit.
#[derive(Debug, Clone, Default)]
pub struct PredictionIndex {
    tokens: Vec<PredictionToken>,
    phrases: Vec<PredictionToken>,
}

impl PredictionIndex {
    /// Build the index from a prediction list in classifier order.
    ///
    /// Words shorter than `min_token_len` characters ("a", "of") are dropped.
    /// The same word may appear several times, once per prediction that
    /// contains it.
    pub fn build(predictions: &[Prediction], min_token_len: usize) -> Self {
        let mut tokens = Vec::new();
        let mut phrases = Vec::new();

        for (rank, prediction) in predictions.iter().enumerate() {
            let words = tokenize(&prediction.label);
            if words.len() > 1 {
                if let Some(phrase) = tokenize_with_whole(&prediction.label).into_iter().next() {
                    phrases.push(PredictionToken {
                        token: phrase,
                        confidence: prediction.confidence,
                        rank,
                    });
                }
            }

            tokens.extend(
                words
                    .into_iter()
                    .filter(|token| token.chars().count() >= min_token_len)
                    .map(|token| PredictionToken {
                        token,
                        confidence: prediction.confidence,
                        rank,
                    }),
            );
        }

        Self { tokens, phrases }
    }

    /// All tokens, in prediction order then word order.
    pub fn tokens(&self) -> &[PredictionToken] {
        &self.tokens
    }

    /// Whole lower-cased multi-word labels, in prediction order.
    pub fn phrases(&self) -> &[PredictionToken] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_assigns_rank_by_position() {
        let predictions = vec![
            Prediction::new("coffee mug", 0.9),
            Prediction::new("teapot", 0.05),
        ];
        let index = PredictionIndex::build(&predictions, 3);
        let summary: Vec<(&str, usize)> = index
            .tokens()
            .iter()
            .map(|t| (t.token.as_str(), t.rank))
            .collect();
        assert_eq!(summary, vec![("coffee", 0), ("mug", 0), ("teapot", 1)]);
        assert_eq!(index.tokens()[2].confidence, 0.05);
    }

    #[test]
    fn test_build_drops_short_tokens() {
        let predictions = vec![Prediction::new("cup of tea", 0.8)];
        let index = PredictionIndex::build(&predictions, 3);
        let words: Vec<&str> = index.tokens().iter().map(|t| t.token.as_str()).collect();
        assert_eq!(words, vec!["cup", "tea"]);
    }

    #[test]
    fn test_build_keeps_repeated_words() {
        let predictions = vec![
            Prediction::new("tabby, tabby cat", 0.6),
            Prediction::new("tiger cat", 0.3),
        ];
        let index = PredictionIndex::build(&predictions, 3);
        let cats: Vec<usize> = index
            .tokens()
            .iter()
            .filter(|t| t.token == "cat")
            .map(|t| t.rank)
            .collect();
        assert_eq!(cats, vec![0, 1]);
        assert_eq!(index.tokens().iter().filter(|t| t.token == "tabby").count(), 2);
    }

    #[test]
    fn test_build_empty_label_contributes_nothing() {
        let predictions = vec![Prediction::new("", 0.9), Prediction::new("a of", 0.5)];
        let index = PredictionIndex::build(&predictions, 3);
        assert!(index.is_empty());
    }

    #[test]
    fn test_build_preserves_input_order() {
        // Lower confidence first: the index must not re-sort.
        let predictions = vec![
            Prediction::new("lamp", 0.1),
            Prediction::new("shade", 0.9),
        ];
        let index = PredictionIndex::build(&predictions, 3);
        assert_eq!(index.tokens()[0].token, "lamp");
        assert_eq!(index.tokens()[0].rank, 0);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_build_keeps_multi_word_labels_as_phrases() {
        let predictions = vec![
            Prediction::new("Coffee Mug", 0.9),
            Prediction::new("teapot", 0.05),
            Prediction::new("cup of tea", 0.03),
        ];
        let index = PredictionIndex::build(&predictions, 3);
        let phrases: Vec<(&str, usize)> = index
            .phrases()
            .iter()
            .map(|p| (p.token.as_str(), p.rank))
            .collect();
        assert_eq!(phrases, vec![("coffee mug", 0), ("cup of tea", 2)]);
        // Phrases do not change the word index.
        assert_eq!(index.len(), 5);
    }
}

//! Relevance ranking of catalog items against classifier predictions.
//!
//! ```text
//! predictions → tokenize → PredictionIndex ─┐
//!                                           ├→ FieldScorer (tags, name, category) → RankingEngine → items
//! catalog ──────────────────────────────────┘
//! ```

pub mod engine;
pub mod index;
pub mod scorer;
pub mod tokenize;

pub use engine::{Ranking, RankingEngine};
pub use index::PredictionIndex;
pub use scorer::{
    ExactOrContains, FieldScore, FieldScorer, FieldWeights, MatchKind, MatchStrategy, RankDecay,
};
pub use tokenize::{tokenize, tokenize_with_whole};

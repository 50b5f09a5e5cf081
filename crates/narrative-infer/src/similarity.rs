//! Similarity provider trait and the exact-match stub.

use narrative_core::Result;

/// Trait for word-pair similarity backends.
pub trait SimilarityProvider: Send + Sync {
    /// Similarity of two single words, in `[0, 1]`, symmetric.
    ///
    /// Returns `Error::MissingVocabulary` when either word is unknown.
    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f64>;

    /// Whether the word is in the provider's vocabulary.
    fn contains(&self, word: &str) -> bool;
}

/// Provider that knows every word and scores only identical words as similar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchSimilarity;

impl SimilarityProvider for ExactMatchSimilarity {
    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f64> {
        Ok(if word_a == word_b { 1.0 } else { 0.0 })
    }

    fn contains(&self, _word: &str) -> bool {
        true
    }
}

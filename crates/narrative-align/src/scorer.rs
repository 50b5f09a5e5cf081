//! Word and phrase similarity on top of a [`SimilarityProvider`].
//!
//! Out-of-vocabulary words never fail a comparison: identical words score 1,
//! anything else 0. Phrases are split on `_` and compared word by word.

use ndarray::Array2;
use narrative_core::{is_phrase, phrase_words, Error, PhraseComposition};
use narrative_infer::SimilarityProvider;
use tracing::{debug, warn};

/// Similarity rules shared by the phrase filter, anchors and the matrix.
#[derive(Clone, Copy)]
pub struct PhraseScorer<'a> {
    provider: &'a dyn SimilarityProvider,
    composition: PhraseComposition,
}

impl<'a> PhraseScorer<'a> {
    pub fn new(provider: &'a dyn SimilarityProvider, composition: PhraseComposition) -> Self {
        Self {
            provider,
            composition,
        }
    }

    pub fn composition(&self) -> PhraseComposition {
        self.composition
    }

    /// Single-word similarity with the identity fallback for unknown words.
    pub fn word_similarity(&self, word_a: &str, word_b: &str) -> f64 {
        match self.provider.similarity(word_a, word_b) {
            Ok(sim) => sim,
            Err(Error::MissingVocabulary(word)) => {
                debug!("Missing vocabulary '{}' comparing {} / {}", word, word_a, word_b);
                identity(word_a, word_b)
            }
            Err(e) => {
                warn!("Similarity lookup failed for {} / {}: {}", word_a, word_b, e);
                identity(word_a, word_b)
            }
        }
    }

    /// Mean positional word similarity for phrases of equal length.
    ///
    /// Phrases of differing length score 0 under `Strict` and by best word
    /// alignment under `BestAlignment`.
    pub fn phrase_similarity(&self, phrase_a: &str, phrase_b: &str) -> f64 {
        let words_a = phrase_words(phrase_a);
        let words_b = phrase_words(phrase_b);

        if words_a.len() == words_b.len() {
            let total: f64 = words_a
                .iter()
                .zip(&words_b)
                .map(|(a, b)| self.word_similarity(a, b))
                .sum();
            return total / words_a.len() as f64;
        }

        match self.composition {
            PhraseComposition::Strict => {
                debug!(
                    "{}",
                    Error::UnalignablePhrase(phrase_a.to_string(), phrase_b.to_string())
                );
                0.0
            }
            PhraseComposition::BestAlignment => self.best_alignment(&words_a, &words_b),
        }
    }

    /// Matrix cell rule: phrase/phrase and word/word compare directly;
    /// a phrase against a word only scores under `BestAlignment`.
    pub fn token_similarity(&self, token_a: &str, token_b: &str) -> f64 {
        match (is_phrase(token_a), is_phrase(token_b)) {
            (true, true) => self.phrase_similarity(token_a, token_b),
            (false, false) => self.word_similarity(token_a, token_b),
            _ => match self.composition {
                PhraseComposition::Strict => 0.0,
                PhraseComposition::BestAlignment => self.phrase_similarity(token_a, token_b),
            },
        }
    }

    /// Anchor rule: phrase similarity when both sides are phrases, word
    /// similarity otherwise (`BestAlignment` aligns mixed pairs instead).
    pub fn label_similarity(&self, label: &str, token: &str) -> f64 {
        match (is_phrase(label), is_phrase(token)) {
            (true, true) => self.phrase_similarity(label, token),
            (false, false) => self.word_similarity(label, token),
            _ => match self.composition {
                PhraseComposition::Strict => self.word_similarity(label, token),
                PhraseComposition::BestAlignment => self.phrase_similarity(label, token),
            },
        }
    }

    /// Maximum-weight one-to-one alignment of the shorter word list into the
    /// longer one, divided by the longer length.
    fn best_alignment(&self, words_a: &[&str], words_b: &[&str]) -> f64 {
        let (short, long) = if words_a.len() <= words_b.len() {
            (words_a, words_b)
        } else {
            (words_b, words_a)
        };
        if short.is_empty() {
            return 0.0;
        }

        let sims = Array2::from_shape_fn((short.len(), long.len()), |(i, j)| {
            self.word_similarity(short[i], long[j])
        });
        let mut used = vec![false; long.len()];
        best_assignment(&sims, 0, &mut used) / long.len() as f64
    }
}

fn identity(word_a: &str, word_b: &str) -> f64 {
    if word_a == word_b {
        1.0
    } else {
        0.0
    }
}

/// Exhaustive search over injective row→column assignments. Phrases are a
/// handful of words, so the search stays small.
fn best_assignment(sims: &Array2<f64>, row: usize, used: &mut [bool]) -> f64 {
    if row == sims.nrows() {
        return 0.0;
    }
    let mut best = f64::NEG_INFINITY;
    for col in 0..sims.ncols() {
        if used[col] {
            continue;
        }
        used[col] = true;
        let score = sims[[row, col]] + best_assignment(sims, row + 1, used);
        used[col] = false;
        best = best.max(score);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use narrative_infer::{ExactMatchSimilarity, VectorTable};
    use std::io::Cursor;

    fn table() -> VectorTable {
        VectorTable::read_text(Cursor::new(
            "car 1.0 0.0\nvehicle 0.8 0.6\nstolen 0.0 1.0\ntaken 0.0 1.0\nblack 0.6 0.8\n",
        ))
        .unwrap()
    }

    #[test]
    fn test_word_similarity_fallback() {
        let table = table();
        let scorer = PhraseScorer::new(&table, PhraseComposition::Strict);
        assert!((scorer.word_similarity("car", "vehicle") - 0.8).abs() < 1e-6);
        assert_eq!(scorer.word_similarity("suspect", "suspect"), 1.0);
        assert_eq!(scorer.word_similarity("suspect", "car"), 0.0);
    }

    #[test]
    fn test_phrase_similarity_equal_length() {
        let table = table();
        let scorer = PhraseScorer::new(&table, PhraseComposition::Strict);
        let sim = scorer.phrase_similarity("stolen_car", "taken_vehicle");
        assert!((sim - 0.9).abs() < 1e-6, "got {}", sim);
    }

    #[test]
    fn test_phrase_identity() {
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        assert_eq!(scorer.phrase_similarity("hit_and_run", "hit_and_run"), 1.0);

        let table = VectorTable::read_text(Cursor::new(
            "stolen 0.41 0.17 0.62 0.09\nvehicle 0.13 0.29 0.71 0.05\n",
        ))
        .unwrap();
        let scorer = PhraseScorer::new(&table, PhraseComposition::Strict);
        assert_eq!(scorer.word_similarity("vehicle", "vehicle"), 1.0);
        assert_eq!(scorer.phrase_similarity("stolen_vehicle", "stolen_vehicle"), 1.0);
    }

    #[test]
    fn test_differing_lengths_strict() {
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        assert_eq!(scorer.phrase_similarity("stolen_car", "stolen_black_car"), 0.0);
        assert_eq!(scorer.token_similarity("car", "stolen_car"), 0.0);
    }

    #[test]
    fn test_differing_lengths_best_alignment() {
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::BestAlignment);
        let sim = scorer.phrase_similarity("stolen_car", "stolen_black_car");
        assert!((sim - 2.0 / 3.0).abs() < 1e-9, "got {}", sim);
        assert!((scorer.token_similarity("car", "stolen_car") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_alignment_is_one_to_one() {
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::BestAlignment);
        // Both "car" words may not align to the single "car".
        let sim = scorer.phrase_similarity("car_car", "car_black_van");
        assert!((sim - 1.0 / 3.0).abs() < 1e-9, "got {}", sim);
    }

    #[test]
    fn test_label_similarity_mixed_strict_uses_word_rule() {
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        assert_eq!(scorer.label_similarity("flight", "fled_north"), 0.0);
        assert_eq!(scorer.label_similarity("flight", "flight"), 1.0);
    }
}

//! Candidate phrase extraction.

use std::collections::BTreeMap;

use narrative_core::Sentence;

use crate::stopwords::is_stopword;

/// Source of candidate multi-word phrases for a document.
pub trait PhraseExtractor: Send + Sync {
    /// Candidate phrases (underscore-joined) and how often each occurs.
    fn phrases_count(&self, sentences: &[Sentence]) -> BTreeMap<String, usize>;
}

/// Proposes every contiguous n-gram (2..=`max_len` words) inside a sentence
/// whose words are all alphanumeric and whose edges are not stopwords.
#[derive(Debug, Clone)]
pub struct NgramExtractor {
    max_len: usize,
}

impl NgramExtractor {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(2),
        }
    }
}

impl Default for NgramExtractor {
    fn default() -> Self {
        Self::new(3)
    }
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

impl PhraseExtractor for NgramExtractor {
    fn phrases_count(&self, sentences: &[Sentence]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for sentence in sentences {
            for start in 0..sentence.len() {
                if !is_word(&sentence[start]) || is_stopword(&sentence[start]) {
                    continue;
                }
                for len in 2..=self.max_len {
                    let end = start + len;
                    if end > sentence.len() {
                        break;
                    }
                    let window = &sentence[start..end];
                    // A punctuation token ends every longer window too.
                    if !is_word(&window[len - 1]) {
                        break;
                    }
                    if is_stopword(&window[len - 1]) {
                        continue;
                    }
                    *counts.entry(window.join("_")).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

//! Positional index of the qualifying tokens of one document.

use std::collections::HashMap;

use narrative_ingest::is_stopword;
use serde::Serialize;

/// Occurrence positions of one token. The three vectors run in parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureEntry {
    /// Position in the whole document.
    pub text_indexes: Vec<usize>,
    /// Index of the owning sentence.
    pub sent_indexes: Vec<usize>,
    /// Position within the owning sentence.
    pub inner_indexes: Vec<usize>,
}

impl StructureEntry {
    /// Number of occurrences.
    pub fn count(&self) -> usize {
        self.text_indexes.len()
    }

    fn push(&mut self, text_i: usize, sent_i: usize, inner_i: usize) {
        self.text_indexes.push(text_i);
        self.sent_indexes.push(sent_i);
        self.inner_indexes.push(inner_i);
    }
}

/// Token → occurrence positions, plus the order tokens first appeared in.
///
/// Stopwords and tokens no longer than `word_min_len` characters are not
/// indexed but still advance the position counters.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    entries: HashMap<String, StructureEntry>,
    order: Vec<String>,
    text_len: usize,
}

impl Structure {
    /// Index a tokenized document, sentence-major then token-minor.
    pub fn build(sentences: &[Vec<String>], word_min_len: usize) -> Self {
        let mut structure = Self::default();
        let mut text_i = 0;

        for (sent_i, sentence) in sentences.iter().enumerate() {
            for (inner_i, token) in sentence.iter().enumerate() {
                if !is_stopword(token) && token.chars().count() > word_min_len {
                    if !structure.entries.contains_key(token) {
                        structure.order.push(token.clone());
                    }
                    structure
                        .entries
                        .entry(token.clone())
                        .or_default()
                        .push(text_i, sent_i, inner_i);
                }
                text_i += 1;
            }
        }

        structure.text_len = text_i;
        structure
    }

    pub fn get(&self, token: &str) -> Option<&StructureEntry> {
        self.entries.get(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Occurrences of a token (0 when not indexed).
    pub fn count(&self, token: &str) -> usize {
        self.entries.get(token).map_or(0, StructureEntry::count)
    }

    /// Distinct indexed tokens in order of first appearance.
    pub fn tokens(&self) -> &[String] {
        &self.order
    }

    /// Total tokens in the document, indexed or not.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of distinct indexed tokens.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

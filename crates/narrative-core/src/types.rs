//! Token model, category definitions and candidate match records.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::Result;

/// One sentence as an ordered run of normalized tokens.
pub type Sentence = Vec<String>;

/// Normalize a raw token: lowercase, hyphens become underscores.
pub fn normalize_token(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

/// Whether a token is an underscore-joined phrase.
pub fn is_phrase(token: &str) -> bool {
    token.contains('_')
}

/// Constituent words of a token (a plain word yields itself).
pub fn phrase_words(token: &str) -> Vec<&str> {
    token.split('_').collect()
}

/// Drop every non-ASCII character.
pub fn ascii_fold(token: &str) -> String {
    token.chars().filter(char::is_ascii).collect()
}

/// Category label → ordered seed words.
///
/// Labels may join several sub-labels with `/` (e.g. `"weapon/gun"`).
/// Iteration is in label order so every run visits categories identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet {
    categories: BTreeMap<String, Vec<String>>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object of `label -> [seed, ...]`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn insert(&mut self, label: impl Into<String>, seeds: Vec<String>) {
        self.categories.insert(label.into(), seeds);
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.categories.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(label, seeds)| (label.as_str(), seeds.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every distinct phrase seed across all categories, sorted.
    pub fn interesting_phrases(&self) -> Vec<String> {
        self.categories
            .values()
            .flatten()
            .filter(|seed| is_phrase(seed))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Split a category label into its trimmed, non-empty sub-labels.
pub fn sub_labels(label: &str) -> Vec<&str> {
    label
        .trim()
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A document token proposed as representative of one seed word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Token found in the text.
    pub in_text: String,
    /// Seed word it matched.
    pub in_category: String,
    /// Occurrences of `in_text` in the document.
    pub count: usize,
    /// Similarity between `in_text` and `in_category`.
    pub distance: f64,
    /// Anchor-proximity informativeness in `[0, 1]`.
    pub rate: f64,
}

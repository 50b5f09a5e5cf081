//! Alignment thresholds and collaborator file locations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How a candidate's proximity to the category anchors becomes a rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateStrategy {
    /// `max((1 - text_dist / L) ^ (sent_dist + 1))` over anchors.
    #[default]
    Proximity,
    /// `max(anchor_sim * (1 - text_dist / L) ^ sent_dist)` over anchors.
    AnchorWeighted,
}

/// How phrases of differing word counts (or a phrase and a word) are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseComposition {
    /// Differing lengths score 0; phrase/word cells of the matrix score 0.
    #[default]
    Strict,
    /// Maximum-weight one-to-one word alignment, divided by the longer length.
    BestAlignment,
}

/// Tunables of the alignment engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Tokens must be strictly longer than this to be indexed.
    pub word_min_len: usize,
    /// Anchors need a label similarity strictly above this.
    pub anchor_min_sim: f64,
    /// Candidate phrases need a reference similarity strictly above this.
    pub phrase_min_sim: f64,
    /// Number of candidate matches kept per category.
    pub k: usize,
    /// Longest n-gram proposed by the phrase extractor.
    pub max_phrase_len: usize,
    pub rate_strategy: RateStrategy,
    pub phrase_composition: PhraseComposition,
    /// Word-pair similarity cache capacity (0 disables caching).
    pub similarity_cache_size: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            word_min_len: 2,
            anchor_min_sim: 0.5,
            phrase_min_sim: 0.8,
            k: 5,
            max_phrase_len: 3,
            rate_strategy: RateStrategy::default(),
            phrase_composition: PhraseComposition::default(),
            similarity_cache_size: 10_000,
        }
    }
}

impl AlignConfig {
    /// Reject thresholds outside `[0, 1]` and degenerate sizes.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("anchor_min_sim", self.anchor_min_sim),
            ("phrase_min_sim", self.phrase_min_sim),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.k == 0 {
            return Err(Error::Config("k must be at least 1".into()));
        }
        if self.max_phrase_len < 2 {
            return Err(Error::Config("max_phrase_len must be at least 2".into()));
        }
        Ok(())
    }
}

/// Top-level configuration: engine tunables plus collaborator inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// JSON object mapping category label to its seed words.
    pub categories: PathBuf,
    /// Word vectors in word2vec text format. Exact matching is used when absent.
    #[serde(default)]
    pub embeddings: Option<PathBuf>,
    #[serde(default)]
    pub align: AlignConfig,
}

impl NarrativeConfig {
    /// Load configuration from a JSON file. Relative paths resolve against
    /// the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&raw)?;

        if let Some(base) = path.parent() {
            config.categories = base.join(&config.categories);
            config.embeddings = config.embeddings.map(|p| base.join(p));
        }

        config.apply_env()?;
        config.align.validate()?;
        Ok(config)
    }

    /// Build configuration from environment variables and defaults.
    pub fn from_env() -> Result<Self> {
        let categories = std::env::var("NARRATIVE_CATEGORIES")
            .map(PathBuf::from)
            .map_err(|_| Error::Config("NARRATIVE_CATEGORIES is not set".into()))?;

        let mut config = Self {
            categories,
            embeddings: None,
            align: AlignConfig::default(),
        };
        config.apply_env()?;
        config.align.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(p) = var("NARRATIVE_CATEGORIES") {
            self.categories = PathBuf::from(p);
        }
        if let Some(p) = var("NARRATIVE_EMBEDDINGS") {
            self.embeddings = Some(PathBuf::from(p));
        }
        if let Some(k) = var("NARRATIVE_K") {
            self.align.k = k.trim().parse().map_err(|_| {
                Error::Config(format!("NARRATIVE_K must be a positive integer, got '{}'", k))
            })?;
        }
        Ok(())
    }
}

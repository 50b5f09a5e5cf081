//! Whole-document alignment pipeline.
//!
//! tokenize → filter candidate phrases → merge multi-word expressions →
//! structure → anchors → k-nearest tokens per category.

use std::collections::BTreeMap;
use std::sync::Arc;

use narrative_core::{AlignConfig, CandidateMatch, CategorySet, Result, Sentence};
use narrative_infer::SimilarityProvider;
use narrative_ingest::{tokenize_text, MweTokenizer, NgramExtractor, PhraseExtractor};
use serde::Serialize;
use tracing::{debug, info};

use crate::anchors::{build_anchors, AnchorMap};
use crate::filter::{filter_phrases, PhraseMatch};
use crate::nearest::k_nearest;
use crate::scorer::PhraseScorer;
use crate::structure::Structure;

/// Everything the pipeline learned about one document.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    /// Tokens in the document, indexed or not.
    pub text_len: usize,
    /// Sentences after multi-word-expression merging.
    pub sentences: Vec<Sentence>,
    /// Candidate phrases that survived the phrase filter.
    pub phrases: BTreeMap<String, PhraseMatch>,
    /// Anchor map per category label.
    pub anchors: BTreeMap<String, AnchorMap>,
    /// Ranked candidate matches per category label.
    pub categories: BTreeMap<String, Vec<CandidateMatch>>,
}

/// Aligns narratives against a fixed category set.
///
/// Holds no per-document state: every call rebuilds the structure, the
/// merged tokenization and the anchors from scratch.
pub struct NarrativeAligner {
    provider: Arc<dyn SimilarityProvider>,
    categories: CategorySet,
    config: AlignConfig,
    extractor: Box<dyn PhraseExtractor>,
    interesting_phrases: Vec<String>,
}

impl NarrativeAligner {
    pub fn new(
        provider: Arc<dyn SimilarityProvider>,
        categories: CategorySet,
        config: AlignConfig,
    ) -> Result<Self> {
        config.validate()?;
        let extractor = Box::new(NgramExtractor::new(config.max_phrase_len));
        let interesting_phrases = categories.interesting_phrases();
        info!(
            "Aligner ready (categories={}, interesting phrases={})",
            categories.len(),
            interesting_phrases.len()
        );
        Ok(Self {
            provider,
            categories,
            config,
            extractor,
            interesting_phrases,
        })
    }

    /// Replace the candidate phrase source.
    pub fn with_extractor(mut self, extractor: Box<dyn PhraseExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    fn scorer(&self) -> PhraseScorer<'_> {
        PhraseScorer::new(&*self.provider, self.config.phrase_composition)
    }

    /// Run the full pipeline on raw narrative text.
    pub fn align_text(&self, text: &str) -> AlignmentReport {
        info!("Tokenizing ...");
        let sentences = tokenize_text(text);

        let scorer = self.scorer();
        let counts = self.extractor.phrases_count(&sentences);
        let phrases = filter_phrases(
            counts.keys().map(String::as_str),
            &self.interesting_phrases,
            &scorer,
            self.config.phrase_min_sim,
        );
        debug!(
            "Phrase candidates: {} proposed, {} kept",
            counts.len(),
            phrases.len()
        );

        let mut mwe = MweTokenizer::new();
        for phrase in phrases.keys() {
            mwe.add_mwe(phrase);
        }
        let sentences: Vec<Sentence> = sentences.iter().map(|s| mwe.tokenize(s)).collect();

        let mut report = self.align_sentences(&sentences);
        report.phrases = phrases;
        report
    }

    /// Run the pipeline on already tokenized (and merged) sentences.
    pub fn align_sentences(&self, sentences: &[Sentence]) -> AlignmentReport {
        let scorer = self.scorer();

        info!("Getting structure ...");
        let structure = Structure::build(sentences, self.config.word_min_len);

        info!("Anchoring keywords ...");
        let anchors = build_anchors(
            &self.categories,
            &structure,
            &scorer,
            self.config.anchor_min_sim,
        );

        info!("Finding k nearest tokens ...");
        let empty = AnchorMap::new();
        let categories: BTreeMap<String, Vec<CandidateMatch>> = self
            .categories
            .iter()
            .map(|(label, seeds)| {
                let matches = k_nearest(
                    seeds,
                    &structure,
                    anchors.get(label).unwrap_or(&empty),
                    &scorer,
                    self.config.rate_strategy,
                    self.config.k,
                );
                (label.to_string(), matches)
            })
            .collect();

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(dump) = serde_json::to_string_pretty(&categories) {
                debug!("Nearest tokens:\n{}", dump);
            }
        }

        AlignmentReport {
            text_len: structure.text_len(),
            sentences: sentences.to_vec(),
            phrases: BTreeMap::new(),
            anchors,
            categories,
        }
    }
}

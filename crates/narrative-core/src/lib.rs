//! Narrative Core — token model, category definitions, configuration, errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AlignConfig, NarrativeConfig, PhraseComposition, RateStrategy};
pub use error::{Error, Result};
pub use types::{
    ascii_fold, is_phrase, normalize_token, phrase_words, sub_labels, CandidateMatch, CategorySet,
    Sentence,
};

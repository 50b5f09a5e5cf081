//! Narrative Ingest — turns raw narrative text into normalized sentences.
//!
//! Sentence and word tokenization, the English stopword set, n-gram phrase
//! candidates and multi-word-expression merging.

pub mod mwe;
pub mod phrases;
pub mod stopwords;
pub mod tokenize;

pub use mwe::MweTokenizer;
pub use phrases::{NgramExtractor, PhraseExtractor};
pub use stopwords::is_stopword;
pub use tokenize::{split_sentences, tokenize_sentence, tokenize_text};

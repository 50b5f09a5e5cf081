//! Error types for narrative alignment.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Word absent from the similarity provider's vocabulary.
    #[error("Missing vocabulary: {0}")]
    MissingVocabulary(String),

    /// Distance requested for a token that is not indexed in the structure.
    #[error("Invalid token pair: {0} / {1}")]
    InvalidTokenPair(String, String),

    /// Phrases whose word counts cannot be aligned under the active composition rule.
    #[error("Unalignable phrases: {0} / {1}")]
    UnalignablePhrase(String, String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

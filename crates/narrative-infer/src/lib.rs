//! Narrative Infer — word similarity providers.
//!
//! The `SimilarityProvider` trait is the seam to the word-embedding model.
//! `VectorTable` serves cosine similarity from word2vec text or binary vectors,
//! `ExactMatchSimilarity` scores identical words 1 and everything else 0,
//! and `CachedSimilarity` memoizes any provider.

pub mod cache;
pub mod embedding;
pub mod similarity;

pub use cache::CachedSimilarity;
pub use embedding::VectorTable;
pub use similarity::{ExactMatchSimilarity, SimilarityProvider};

use std::path::Path;
use std::sync::Arc;

/// Create the best available provider for an optional vectors file.
///
/// Loads the embedding table when a path is given, otherwise falls back to
/// exact matching. A `cache_size` above zero wraps the result in a pair cache.
pub fn create_provider(
    vectors: Option<&Path>,
    cache_size: usize,
) -> narrative_core::Result<Arc<dyn SimilarityProvider>> {
    let provider: Arc<dyn SimilarityProvider> = match vectors {
        Some(path) => {
            let table = VectorTable::load(path)?;
            tracing::info!(
                "Loaded word vectors (words={}, dim={})",
                table.len(),
                table.dimension()
            );
            Arc::new(table)
        }
        None => {
            tracing::info!("No word vectors configured. Using exact-match similarity.");
            Arc::new(ExactMatchSimilarity)
        }
    };

    if cache_size == 0 {
        return Ok(provider);
    }
    Ok(Arc::new(CachedSimilarity::new(provider, cache_size)))
}

//! Bounded word-pair similarity cache.
//!
//! Matrix construction asks for the same word pairs many times across
//! categories. Pairs are keyed order-independently and evicted oldest-first.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use narrative_core::{Error, Result};
use parking_lot::Mutex;

use crate::similarity::SimilarityProvider;

/// `None` records a vocabulary miss so it is not looked up again.
type CachedScore = Option<f64>;

/// Thread-safe memoizing wrapper around another provider.
pub struct CachedSimilarity {
    inner: Arc<dyn SimilarityProvider>,
    cache: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<(String, String), CachedScore>,
    order: VecDeque<(String, String)>,
    max_size: usize,
}

impl CachedSimilarity {
    /// Wrap a provider with a cache holding at most `max_size` pairs.
    pub fn new(inner: Arc<dyn SimilarityProvider>, max_size: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size.min(1024)),
                order: VecDeque::with_capacity(max_size.min(1024)),
                max_size: max_size.max(1),
            }),
        }
    }

    fn key(word_a: &str, word_b: &str) -> (String, String) {
        if word_a <= word_b {
            (word_a.to_string(), word_b.to_string())
        } else {
            (word_b.to_string(), word_a.to_string())
        }
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.cache.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.entries.clear();
        cache.order.clear();
    }
}

impl SimilarityProvider for CachedSimilarity {
    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f64> {
        let key = Self::key(word_a, word_b);

        if let Some(&cached) = self.cache.lock().entries.get(&key) {
            return cached.ok_or_else(|| {
                Error::MissingVocabulary(missing_word(&*self.inner, word_a, word_b))
            });
        }

        // Lookup outside the lock; concurrent misses on one pair compute the same value.
        let score = match self.inner.similarity(word_a, word_b) {
            Ok(score) => Some(score),
            Err(Error::MissingVocabulary(_)) => None,
            Err(e) => return Err(e),
        };

        let mut cache = self.cache.lock();
        if !cache.entries.contains_key(&key) {
            while cache.entries.len() >= cache.max_size {
                match cache.order.pop_front() {
                    Some(oldest) => {
                        cache.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            cache.order.push_back(key.clone());
            cache.entries.insert(key, score);
        }
        drop(cache);

        score.ok_or_else(|| {
            Error::MissingVocabulary(missing_word(&*self.inner, word_a, word_b))
        })
    }

    fn contains(&self, word: &str) -> bool {
        self.inner.contains(word)
    }
}

fn missing_word(provider: &dyn SimilarityProvider, word_a: &str, word_b: &str) -> String {
    if provider.contains(word_a) {
        word_b.to_string()
    } else {
        word_a.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VectorTable;
    use std::io::Cursor;

    fn cached(max_size: usize) -> CachedSimilarity {
        let table =
            VectorTable::read_text(Cursor::new("car 1.0 0.0\nvehicle 1.0 0.0\ntruck 0.0 1.0\n"))
                .unwrap();
        CachedSimilarity::new(Arc::new(table), max_size)
    }

    #[test]
    fn test_hit_is_symmetric() {
        let cache = cached(10);
        let first = cache.similarity("car", "vehicle").unwrap();
        assert_eq!(cache.len(), 1);
        let second = cache.similarity("vehicle", "car").unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss_is_cached() {
        let cache = cached(10);
        assert!(matches!(
            cache.similarity("car", "bike"),
            Err(Error::MissingVocabulary(w)) if w == "bike"
        ));
        assert_eq!(cache.len(), 1);
        assert!(matches!(
            cache.similarity("bike", "car"),
            Err(Error::MissingVocabulary(w)) if w == "bike"
        ));
    }

    #[test]
    fn test_eviction() {
        let cache = cached(2);
        cache.similarity("car", "vehicle").unwrap();
        cache.similarity("car", "truck").unwrap();
        cache.similarity("truck", "vehicle").unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}

//! Keeps the candidate phrases that resemble a reference phrase list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scorer::PhraseScorer;

/// Best reference phrase for a surviving candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub similar_phrase: String,
    pub similarity: f64,
}

/// Compare every candidate against every reference phrase and keep those
/// whose best similarity is strictly above `min_sim`.
///
/// Ties go to the earliest reference phrase. An empty reference list keeps
/// nothing.
pub fn filter_phrases<'c>(
    candidates: impl IntoIterator<Item = &'c str>,
    references: &[String],
    scorer: &PhraseScorer<'_>,
    min_sim: f64,
) -> BTreeMap<String, PhraseMatch> {
    let mut filtered = BTreeMap::new();

    for candidate in candidates {
        let mut best: Option<(usize, f64)> = None;
        for (i, reference) in references.iter().enumerate() {
            let sim = scorer.phrase_similarity(candidate, reference);
            if best.map_or(true, |(_, b)| sim > b) {
                best = Some((i, sim));
            }
        }

        if let Some((i, similarity)) = best {
            if similarity > min_sim {
                filtered.insert(
                    candidate.to_string(),
                    PhraseMatch {
                        similar_phrase: references[i].clone(),
                        similarity,
                    },
                );
            }
        }
    }

    filtered
}

//! Anchor tokens: document tokens that resemble a category's own label.

use std::collections::BTreeMap;

use narrative_core::{normalize_token, sub_labels, CategorySet};

use crate::scorer::PhraseScorer;
use crate::structure::Structure;

/// Anchor token → its best similarity to any sub-label of the category.
pub type AnchorMap = BTreeMap<String, f64>;

/// Build the anchor map of every category against one document.
///
/// A label like `"weapon/gun"` is split into sub-labels. A token becomes an
/// anchor when its similarity to at least one sub-label is strictly above
/// `min_sim`; it keeps the highest such score. Categories without anchors
/// map to an empty map.
pub fn build_anchors(
    categories: &CategorySet,
    structure: &Structure,
    scorer: &PhraseScorer<'_>,
    min_sim: f64,
) -> BTreeMap<String, AnchorMap> {
    categories
        .labels()
        .map(|label| {
            (
                label.to_string(),
                category_anchors(label, structure, scorer, min_sim),
            )
        })
        .collect()
}

/// Anchor map of a single category label.
pub fn category_anchors(
    label: &str,
    structure: &Structure,
    scorer: &PhraseScorer<'_>,
    min_sim: f64,
) -> AnchorMap {
    let mut anchors = AnchorMap::new();

    for sub_label in sub_labels(label) {
        let sub_label = normalize_token(sub_label);
        for token in structure.tokens() {
            let sim = scorer.label_similarity(&sub_label, token);
            if sim > min_sim {
                let best = anchors.entry(token.clone()).or_insert(sim);
                if sim > *best {
                    *best = sim;
                }
            }
        }
    }

    anchors
}

//! Anchor-proximity rate of a candidate token.

use narrative_core::RateStrategy;

use crate::anchors::AnchorMap;
use crate::distance::min_distance;
use crate::structure::Structure;

/// Rate how informative `candidate` is for a category, in `[0, 1]`.
///
/// With `d` the minimum text distance to an anchor, `s` the minimum sentence
/// distance and `L` the document length:
/// - `Proximity`: `max((1 - d/L) ^ (s + 1))`
/// - `AnchorWeighted`: `max(anchor_sim * (1 - d/L) ^ s)`
///
/// Empty anchor maps rate 0. Anchors with an undefined distance are skipped.
pub fn rate_candidate(
    structure: &Structure,
    anchors: &AnchorMap,
    candidate: &str,
    strategy: RateStrategy,
) -> f64 {
    let text_len = structure.text_len();
    if anchors.is_empty() || text_len == 0 {
        return 0.0;
    }

    anchors
        .iter()
        .filter_map(|(anchor, &anchor_sim)| {
            let distance = min_distance(structure, candidate, anchor).ok()?;
            let closeness = 1.0 - distance.text as f64 / text_len as f64;
            let sentence = i32::try_from(distance.sentence).unwrap_or(i32::MAX);
            Some(match strategy {
                RateStrategy::Proximity => closeness.powi(sentence.saturating_add(1)),
                RateStrategy::AnchorWeighted => anchor_sim * closeness.powi(sentence),
            })
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(sentences: &[&[&str]]) -> Structure {
        let sentences: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| s.iter().map(|t| t.to_string()).collect())
            .collect();
        Structure::build(&sentences, 2)
    }

    fn anchors(pairs: &[(&str, f64)]) -> AnchorMap {
        pairs.iter().map(|(t, s)| (t.to_string(), *s)).collect()
    }

    #[test]
    fn test_empty_anchors_rate_zero() {
        let structure = doc(&[&["suspect", "fled"]]);
        for strategy in [RateStrategy::Proximity, RateStrategy::AnchorWeighted] {
            assert_eq!(rate_candidate(&structure, &AnchorMap::new(), "fled", strategy), 0.0);
            assert_eq!(rate_candidate(&structure, &AnchorMap::new(), "ghost", strategy), 0.0);
        }
    }

    #[test]
    fn test_candidate_is_anchor() {
        let structure = doc(&[&["suspect", "fled"]]);
        let rate = rate_candidate(
            &structure,
            &anchors(&[("fled", 0.9)]),
            "fled",
            RateStrategy::Proximity,
        );
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn test_proximity_formula() {
        // 10 tokens; suspect at 0 (s0), weapon at 7 (s1)
        let structure = doc(&[
            &["suspect", "a", "b", "c", "d"],
            &["e", "f", "weapon", "g", "h"],
        ]);
        let rate = rate_candidate(
            &structure,
            &anchors(&[("weapon", 0.6)]),
            "suspect",
            RateStrategy::Proximity,
        );
        let expected = (1.0f64 - 7.0 / 10.0).powi(2);
        assert!((rate - expected).abs() < 1e-12, "got {}", rate);

        let weighted = rate_candidate(
            &structure,
            &anchors(&[("weapon", 0.6)]),
            "suspect",
            RateStrategy::AnchorWeighted,
        );
        assert!((weighted - 0.6 * 0.3).abs() < 1e-12, "got {}", weighted);
    }

    #[test]
    fn test_max_over_anchors() {
        let structure = doc(&[&["gun", "a", "b", "suspect", "c", "d", "knife", "e"]]);
        let rate = rate_candidate(
            &structure,
            &anchors(&[("gun", 1.0), ("knife", 1.0)]),
            "suspect",
            RateStrategy::Proximity,
        );
        assert!((rate - (1.0 - 3.0 / 8.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unindexed_anchor_skipped() {
        let structure = doc(&[&["suspect", "fled"]]);
        let rate = rate_candidate(
            &structure,
            &anchors(&[("ghost", 1.0)]),
            "suspect",
            RateStrategy::Proximity,
        );
        assert_eq!(rate, 0.0);
    }
}

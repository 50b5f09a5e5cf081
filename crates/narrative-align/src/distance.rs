//! Minimum positional distance between two indexed tokens.

use narrative_core::{Error, Result};
use serde::Serialize;
use tracing::warn;

use crate::structure::Structure;

/// Closest approach of two tokens, measured independently in tokens and in
/// sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenDistance {
    pub text: usize,
    pub sentence: usize,
}

/// Minimum `|a - b|` over every pairing of `token_a`'s occurrences with
/// `token_b`'s, for text positions and sentence indexes separately.
///
/// A token compared with itself is at distance zero. Returns
/// `Error::InvalidTokenPair` when either token is not indexed; callers treat
/// that as an undefined distance.
pub fn min_distance(structure: &Structure, token_a: &str, token_b: &str) -> Result<TokenDistance> {
    let (Some(a), Some(b)) = (structure.get(token_a), structure.get(token_b)) else {
        warn!("Invalid token {} or {} for measuring distances", token_a, token_b);
        return Err(Error::InvalidTokenPair(
            token_a.to_string(),
            token_b.to_string(),
        ));
    };

    Ok(TokenDistance {
        text: min_gap(&a.text_indexes, &b.text_indexes),
        sentence: min_gap(&a.sent_indexes, &b.sent_indexes),
    })
}

/// Smallest distance between two distinct occurrences of the same token.
///
/// `None` when the token is missing or occurs only once.
pub fn min_self_distance(structure: &Structure, token: &str) -> Option<TokenDistance> {
    let entry = structure.get(token)?;
    if entry.count() < 2 {
        return None;
    }

    let occurrences: Vec<(usize, usize)> = entry
        .text_indexes
        .iter()
        .copied()
        .zip(entry.sent_indexes.iter().copied())
        .collect();

    // Text positions are increasing, so adjacent occurrences are closest.
    let text = occurrences
        .windows(2)
        .map(|w| w[1].0 - w[0].0)
        .min()
        .unwrap_or(0);
    let sentence = occurrences
        .windows(2)
        .map(|w| w[1].1 - w[0].1)
        .min()
        .unwrap_or(0);

    Some(TokenDistance { text, sentence })
}

/// Minimum absolute difference across two position lists (duplicates removed).
fn min_gap(a: &[usize], b: &[usize]) -> usize {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    a.dedup();
    b.sort_unstable();
    b.dedup();

    let (mut i, mut j) = (0, 0);
    let mut best = usize::MAX;
    while i < a.len() && j < b.len() {
        best = best.min(a[i].abs_diff(b[j]));
        if best == 0 {
            break;
        }
        if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    best
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

    #[test]
    fn test_same_sentence() {
        let structure = doc(&[&["suspect", "fled", "north", "foot"]]);
        let d = min_distance(&structure, "suspect", "foot").unwrap();
        assert_eq!(d, TokenDistance { text: 3, sentence: 0 });
    }

    #[test]
    fn test_dimensions_are_independent() {
        // gun at 0 (s0) and 6 (s2); shot at 3 (s1)
        let structure = doc(&[&["gun", "x"], &["y", "shot", "z"], &["q", "gun"]]);
        let d = min_distance(&structure, "gun", "shot").unwrap();
        assert_eq!(d.text, 3);
        assert_eq!(d.sentence, 1);
    }

    #[test]
    fn test_full_cross_product() {
        // "car" occurs more often than "van": every pairing must be considered.
        let structure = doc(&[&["car", "car", "car", "car", "van"]]);
        let d = min_distance(&structure, "car", "van").unwrap();
        assert_eq!(d.text, 1);
        let d = min_distance(&structure, "van", "car").unwrap();
        assert_eq!(d.text, 1);
    }

    #[test]
    fn test_symmetric() {
        let structure = doc(&[&["alpha", "beta"], &["gamma", "alpha"]]);
        assert_eq!(
            min_distance(&structure, "beta", "gamma").unwrap(),
            min_distance(&structure, "gamma", "beta").unwrap()
        );
    }

    #[test]
    fn test_self_distance() {
        let structure = doc(&[&["gun", "was", "found"], &["the", "gun", "jammed"]]);
        assert_eq!(
            min_distance(&structure, "gun", "gun").unwrap(),
            TokenDistance { text: 0, sentence: 0 }
        );
        assert_eq!(
            min_self_distance(&structure, "gun"),
            Some(TokenDistance { text: 4, sentence: 1 })
        );
        assert_eq!(min_self_distance(&structure, "found"), None);
    }

    #[test]
    fn test_invalid_token() {
        let structure = doc(&[&["suspect", "fled"]]);
        assert!(matches!(
            min_distance(&structure, "suspect", "the"),
            Err(Error::InvalidTokenPair(_, _))
        ));
        assert!(min_distance(&structure, "ghost", "fled").is_err());
    }
}

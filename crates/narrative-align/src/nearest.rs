//! Per-category selection of the document tokens closest to the seed words.

use ndarray::Array2;
use narrative_core::{ascii_fold, CandidateMatch, RateStrategy};

use crate::anchors::AnchorMap;
use crate::rate::rate_candidate;
use crate::scorer::PhraseScorer;
use crate::structure::Structure;

/// Document tokens × seed words similarity, built fresh per category.
///
/// Rows follow the structure's first-appearance order, columns the seed
/// order, so indexes are stable across runs.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<String>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl SimilarityMatrix {
    pub fn build(structure: &Structure, seeds: &[String], scorer: &PhraseScorer<'_>) -> Self {
        let rows = structure.tokens().to_vec();
        let columns: Vec<String> = seeds.iter().map(|seed| ascii_fold(seed)).collect();
        let values = Array2::from_shape_fn((rows.len(), columns.len()), |(i, j)| {
            scorer.token_similarity(&rows[i], &columns[j])
        });
        Self {
            rows,
            columns,
            values,
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// For each column, the first row holding the column maximum.
    pub fn best_rows(&self) -> Vec<Option<usize>> {
        self.values
            .columns()
            .into_iter()
            .map(|column| {
                column
                    .iter()
                    .enumerate()
                    .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                        Some((_, b)) if v <= b => best,
                        _ => Some((i, v)),
                    })
                    .map(|(i, _)| i)
            })
            .collect()
    }
}

/// Up to `k` candidate matches for one category, by descending similarity.
///
/// Every seed word is paired with its best document token. The pairs are
/// then taken greedily, highest similarity first, ties going to the earlier
/// seed. Selection stops at the first non-positive similarity.
pub fn k_nearest(
    seeds: &[String],
    structure: &Structure,
    anchors: &AnchorMap,
    scorer: &PhraseScorer<'_>,
    strategy: RateStrategy,
    k: usize,
) -> Vec<CandidateMatch> {
    let matrix = SimilarityMatrix::build(structure, seeds, scorer);
    let best_rows = matrix.best_rows();
    let best_values: Vec<f64> = best_rows
        .iter()
        .enumerate()
        .map(|(j, row)| row.map_or(0.0, |i| matrix.values[[i, j]]))
        .collect();

    let mut selected = vec![false; best_values.len()];
    let mut matches = Vec::with_capacity(k.min(best_values.len()));

    while matches.len() < k {
        let next = best_values
            .iter()
            .enumerate()
            .filter(|(j, _)| !selected[*j])
            .fold(None, |best: Option<(usize, f64)>, (j, &v)| match best {
                Some((_, b)) if v <= b => best,
                _ => Some((j, v)),
            });

        let Some((j, distance)) = next else { break };
        if distance <= 0.0 {
            break;
        }
        selected[j] = true;

        // A positive value implies the column has a best row.
        let Some(i) = best_rows[j] else { break };
        let token = &matrix.rows[i];
        matches.push(CandidateMatch {
            in_text: token.clone(),
            in_category: matrix.columns[j].clone(),
            count: structure.count(token),
            distance,
            rate: rate_candidate(structure, anchors, token, strategy),
        });
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use narrative_core::PhraseComposition;
    use narrative_infer::{ExactMatchSimilarity, VectorTable};
    use std::io::Cursor;

    fn doc(sentences: &[&[&str]]) -> Structure {
        let sentences: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| s.iter().map(|t| t.to_string()).collect())
            .collect();
        Structure::build(&sentences, 2)
    }

    fn seeds(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_matrix_shape_and_order() {
        let structure = doc(&[&["suspect", "fled", "north"]]);
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        let matrix = SimilarityMatrix::build(&structure, &seeds(&["north", "café"]), &scorer);
        assert_eq!(matrix.values().dim(), (3, 2));
        assert_eq!(matrix.rows(), &["suspect", "fled", "north"]);
        assert_eq!(matrix.columns(), &["north", "caf"]);
        assert_eq!(matrix.values()[[2, 0]], 1.0);
        assert_eq!(matrix.best_rows(), vec![Some(2), Some(0)]);
    }

    #[test]
    fn test_exact_seed_match() {
        let structure = doc(&[&["the", "suspect", "fled", "north", "on", "foot"]]);
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        let result = k_nearest(
            &seeds(&["fled", "car"]),
            &structure,
            &AnchorMap::new(),
            &scorer,
            RateStrategy::Proximity,
            5,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].in_text, "fled");
        assert_eq!(result[0].in_category, "fled");
        assert_eq!(result[0].count, 1);
        assert_eq!(result[0].distance, 1.0);
        assert_eq!(result[0].rate, 0.0);
    }

    #[test]
    fn test_ordering_and_k_limit() {
        let table = VectorTable::read_text(Cursor::new(
            "gun 1.0 0.0\npistol 0.9 0.1\nrifle 0.7 0.7\nknife 0.5 0.9\nshot 0.95 0.05\n",
        ))
        .unwrap();
        let structure = doc(&[&["gun", "shot"]]);
        let scorer = PhraseScorer::new(&table, PhraseComposition::Strict);
        let seeds = seeds(&["knife", "pistol", "rifle"]);

        let nearest = |k| {
            k_nearest(
                &seeds,
                &structure,
                &AnchorMap::new(),
                &scorer,
                RateStrategy::Proximity,
                k,
            )
        };

        let result = nearest(2);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].in_category, "pistol");
        assert_eq!(result[1].in_category, "rifle");
        assert!(result[0].distance >= result[1].distance);

        let all = nearest(10);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|m| m.distance > 0.0));
    }

    #[test]
    fn test_ties_follow_seed_order() {
        let structure = doc(&[&["gun", "knife"]]);
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        let result = k_nearest(
            &seeds(&["knife", "gun"]),
            &structure,
            &AnchorMap::new(),
            &scorer,
            RateStrategy::Proximity,
            5,
        );
        let order: Vec<&str> = result.iter().map(|m| m.in_category.as_str()).collect();
        assert_eq!(order, vec!["knife", "gun"]);
    }

    #[test]
    fn test_phrase_word_mismatch_is_zero() {
        let structure = doc(&[&["stolen_car", "fled"]]);
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        let result = k_nearest(
            &seeds(&["car", "stolen_car"]),
            &structure,
            &AnchorMap::new(),
            &scorer,
            RateStrategy::Proximity,
            5,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].in_text, "stolen_car");
        assert_eq!(result[0].in_category, "stolen_car");
    }

    #[test]
    fn test_rate_attached() {
        let structure = doc(&[&["suspect", "fled", "north", "foot"]]);
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        let anchors: AnchorMap = [("fled".to_string(), 1.0)].into_iter().collect();
        let result = k_nearest(
            &seeds(&["foot"]),
            &structure,
            &anchors,
            &scorer,
            RateStrategy::Proximity,
            5,
        );
        assert_eq!(result.len(), 1);
        assert!((result[0].rate - (1.0 - 2.0 / 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs() {
        let scorer = PhraseScorer::new(&ExactMatchSimilarity, PhraseComposition::Strict);
        let anchors = AnchorMap::new();
        let strategy = RateStrategy::Proximity;

        let empty = Structure::build(&[], 2);
        assert!(k_nearest(&seeds(&["gun"]), &empty, &anchors, &scorer, strategy, 5).is_empty());

        let structure = doc(&[&["gun"]]);
        assert!(k_nearest(&[], &structure, &anchors, &scorer, strategy, 5).is_empty());
    }
}

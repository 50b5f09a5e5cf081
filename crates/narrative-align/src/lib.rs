//! Narrative Align — ranks the tokens of a narrative against topical categories.
//!
//! Per document, the [`Structure`] indexes every qualifying token's positions.
//! Each category gets an [`AnchorMap`] of tokens resembling its own label.
//! [`k_nearest`] then matches seed words to document tokens through a
//! similarity matrix and rates each match by its proximity to the anchors.
//! [`NarrativeAligner`] runs the whole pipeline on raw text.

pub mod aligner;
pub mod anchors;
pub mod distance;
pub mod filter;
pub mod nearest;
pub mod rate;
pub mod scorer;
pub mod structure;

pub use aligner::{AlignmentReport, NarrativeAligner};
pub use anchors::{build_anchors, AnchorMap};
pub use distance::{min_distance, min_self_distance, TokenDistance};
pub use filter::{filter_phrases, PhraseMatch};
pub use nearest::{k_nearest, SimilarityMatrix};
pub use rate::rate_candidate;
pub use scorer::PhraseScorer;
pub use structure::{Structure, StructureEntry};

//! Similarity engine for the traditional-games catalog.
//!
//! Detects that two independently documented games describe the same
//! underlying cultural practice. Pure scoring over fully-hydrated game
//! records: Arabic-aware text normalization, lexical comparison primitives,
//! three facet scorers (structural, semantic, heritage), and the
//! orchestrating engine that combines them and explains the result.
//!
//! Everything here is deterministic and free of I/O — persistence and the
//! curation workflow live in `turath-curation`.

pub mod engine;
mod explain;
pub mod result;
pub mod scoring;
pub mod text;

pub use engine::{SimilarityEngine, ALGORITHM_VERSION};
pub use result::{
    ConfidenceTier, Explanation, FacetScore, HeritageScore, SemanticScore, SimilarityResult,
    StructuralScore, SuggestedAction,
};
pub use scoring::weights::{ScoringWeights, SemanticWeights, StructuralWeights};

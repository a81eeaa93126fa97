//! Scoring weight tables.
//!
//! Weights are an explicit immutable value injected into
//! [`crate::SimilarityEngine`], not module state, so each algorithm version
//! carries its own table and tests can pin the sums per version.

use serde::{Deserialize, Serialize};

/// Top-level combination weights plus the per-facet tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub structural: f64,
    pub semantic: f64,
    pub heritage: f64,
    pub structural_facets: StructuralWeights,
    pub semantic_facets: SemanticWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralWeights {
    pub players: f64,
    pub tools: f64,
    pub environment: f64,
    pub game_type: f64,
    pub timing: f64,
    pub mechanics: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticWeights {
    pub description: f64,
    pub rules: f64,
    pub oral_tradition: f64,
    pub local_names: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            structural: 0.35,
            semantic: 0.40,
            heritage: 0.25,
            structural_facets: StructuralWeights::default(),
            semantic_facets: SemanticWeights::default(),
        }
    }
}

impl Default for StructuralWeights {
    fn default() -> Self {
        Self {
            players: 0.15,
            tools: 0.25,
            environment: 0.15,
            game_type: 0.15,
            timing: 0.10,
            mechanics: 0.20,
        }
    }
}

impl Default for SemanticWeights {
    fn default() -> Self {
        Self {
            description: 0.35,
            rules: 0.35,
            oral_tradition: 0.15,
            local_names: 0.15,
        }
    }
}

impl ScoringWeights {
    /// Sum of the top-level combination weights.
    pub fn sum(&self) -> f64 {
        self.structural + self.semantic + self.heritage
    }
}

impl StructuralWeights {
    pub fn sum(&self) -> f64 {
        self.players + self.tools + self.environment + self.game_type + self.timing + self.mechanics
    }
}

impl SemanticWeights {
    pub fn sum(&self) -> f64 {
        self.description + self.rules + self.oral_tradition + self.local_names
    }
}

//! Engine output types. Serialized as-is into the candidate store's
//! explanation payload, so field names are part of the persisted contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored facet with its curator-facing reason line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetScore {
    pub score: f64,
    pub reason: String,
}

/// Comparison of structured attributes: players, tools, environment, type,
/// timing, win/end mechanics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralScore {
    pub score: f64,
    pub players: FacetScore,
    pub tools: FacetScore,
    pub environment: FacetScore,
    pub game_type: FacetScore,
    pub timing: FacetScore,
    pub mechanics: FacetScore,
    /// Tool names that fuzzy-matched across the two lists. Feeds the
    /// explanation only; the tools score is computed independently.
    pub matched_tools: Vec<String>,
}

/// Comparison of free-text attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticScore {
    pub score: f64,
    pub description: FacetScore,
    pub rules: FacetScore,
    pub oral_tradition: FacetScore,
    pub local_names: FacetScore,
}

/// Comparison of classificatory and geographic attributes. The three flags
/// and the shared tag names are contract, consumed by explanation building
/// and the curation UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageScore {
    pub score: f64,
    pub same_heritage_field: bool,
    pub same_country: bool,
    pub same_region: bool,
    pub shared_tags: Vec<String>,
    pub cultural_diffusion: bool,
    pub neighboring_regions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    Link,
    Review,
    Ignore,
}

/// Human-readable account of a similarity result, in curator-facing Arabic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub strengths: Vec<String>,
    pub differences: Vec<String>,
    pub confidence: ConfidenceTier,
    pub suggested_action: SuggestedAction,
}

/// Full output of one pairwise comparison. Pure data; ordering of the two
/// ids only matters for storage, not scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub game_a_id: Uuid,
    pub game_b_id: Uuid,
    pub overall_score: f64,
    pub structural: StructuralScore,
    pub semantic: SemanticScore,
    pub heritage: HeritageScore,
    pub explanation: Explanation,
    pub algorithm_version: String,
    /// False for this rule-based scorer; reserved for a future
    /// AI-assisted scoring path.
    pub ai_assisted: bool,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turath_common::GameWithRelations;
use uuid::Uuid;

/// Candidate lifecycle. `Pending` is the only state with outgoing
/// transitions; the three review outcomes are terminal — re-evaluating a
/// pair means creating a new candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
    Postponed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Accepted => write!(f, "accepted"),
            MatchStatus::Rejected => write!(f, "rejected"),
            MatchStatus::Postponed => write!(f, "postponed"),
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            "postponed" => Ok(MatchStatus::Postponed),
            other => Err(format!("unknown match status: {other}")),
        }
    }
}

/// A persisted pairwise comparison awaiting (or past) curator review.
/// `game_a_id` is the game whose ingestion triggered the comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityCandidate {
    pub id: Uuid,
    pub game_a_id: Uuid,
    pub game_b_id: Uuid,
    pub overall_score: f64,
    pub structural_score: f64,
    pub semantic_score: f64,
    pub heritage_score: f64,
    /// Serialized [`turath_similarity::Explanation`].
    pub explanation: serde_json::Value,
    pub algorithm_version: String,
    pub ai_assisted: bool,
    pub status: MatchStatus,
    pub curator_notes: Option<String>,
    /// Set when the candidate is accepted and the games are merged.
    pub concept_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The shared cultural practice two or more games are merged under.
/// Member games point here through `Game::concept_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub canonical_game_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review-queue row: the candidate hydrated with both games' relations,
/// which is what the curation UI renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingMatch {
    pub candidate: SimilarityCandidate,
    pub game_a: GameWithRelations,
    pub game_b: GameWithRelations,
}

//! The storage boundary. The engine and workflow only ever see this trait;
//! `PgCatalogStore` backs production and `MemoryStore` backs the tests.

use anyhow::Result;
use async_trait::async_trait;
use turath_common::GameWithRelations;
use turath_similarity::SimilarityResult;
use uuid::Uuid;

use crate::models::{Concept, MatchStatus, SimilarityCandidate};

/// Insert payload for a new candidate, derived from an engine result.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub game_a_id: Uuid,
    pub game_b_id: Uuid,
    pub overall_score: f64,
    pub structural_score: f64,
    pub semantic_score: f64,
    pub heritage_score: f64,
    pub explanation: serde_json::Value,
    pub algorithm_version: String,
    pub ai_assisted: bool,
}

impl NewCandidate {
    pub fn from_result(result: &SimilarityResult) -> Result<Self> {
        Ok(Self {
            game_a_id: result.game_a_id,
            game_b_id: result.game_b_id,
            overall_score: result.overall_score,
            structural_score: result.structural.score,
            semantic_score: result.semantic.score,
            heritage_score: result.heritage.score,
            explanation: serde_json::to_value(&result.explanation)?,
            algorithm_version: result.algorithm_version.clone(),
            ai_assisted: result.ai_assisted,
        })
    }
}

/// Concept to create or reuse when an acceptance commits.
#[derive(Debug, Clone)]
pub struct NewConcept {
    pub name: String,
    pub description: Option<String>,
    pub canonical_game_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub enum ConceptRef {
    Existing(Uuid),
    Create(NewConcept),
}

/// Read/write access to games, candidates, and concepts.
///
/// Implementations must apply [`commit_acceptance`] atomically — candidate
/// status, concept creation, and both game links land together or not at
/// all, so a curator can never half-accept a match.
///
/// [`commit_acceptance`]: CatalogStore::commit_acceptance
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Games ---

    async fn get_game_with_relations(&self, id: Uuid) -> Result<Option<GameWithRelations>>;

    /// Immutable snapshot of every published game except `id`, for the
    /// comparison activities.
    async fn list_published_games_except(&self, id: Uuid) -> Result<Vec<GameWithRelations>>;

    // --- Candidates ---

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<SimilarityCandidate>;

    async fn get_candidate(&self, id: Uuid) -> Result<Option<SimilarityCandidate>>;

    /// Lookup by unordered pair — (a, b) and (b, a) are the same candidate.
    async fn find_candidate_for_pair(
        &self,
        game_a_id: Uuid,
        game_b_id: Uuid,
    ) -> Result<Option<SimilarityCandidate>>;

    /// Pending candidates sorted by overall score descending.
    async fn list_pending_candidates(&self, limit: i64) -> Result<Vec<SimilarityCandidate>>;

    async fn count_candidates_with_status(&self, status: MatchStatus) -> Result<i64>;

    /// Set a terminal review status plus notes. Does not touch games or
    /// concepts — acceptance goes through [`CatalogStore::commit_acceptance`].
    async fn update_candidate_review(
        &self,
        id: Uuid,
        status: MatchStatus,
        notes: Option<String>,
    ) -> Result<SimilarityCandidate>;

    /// Atomically accept a candidate: resolve or create the concept, mark
    /// the candidate accepted with notes and the concept link, and point
    /// both games at the concept.
    async fn commit_acceptance(
        &self,
        candidate_id: Uuid,
        concept: ConceptRef,
        notes: Option<String>,
        game_ids: (Uuid, Uuid),
    ) -> Result<(SimilarityCandidate, Concept)>;

    // --- Concepts ---

    async fn get_concept(&self, id: Uuid) -> Result<Option<Concept>>;
}

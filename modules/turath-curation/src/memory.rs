//! In-memory `CatalogStore` for tests — no database required.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use turath_common::GameWithRelations;
use uuid::Uuid;

use crate::models::{Concept, MatchStatus, SimilarityCandidate};
use crate::store::{CatalogStore, ConceptRef, NewCandidate};

#[derive(Default)]
struct MemoryState {
    games: HashMap<Uuid, GameWithRelations>,
    candidates: HashMap<Uuid, SimilarityCandidate>,
    concepts: HashMap<Uuid, Concept>,
}

/// Mutex-guarded maps behind the store trait. A single lock per operation
/// makes every write (including acceptance) trivially atomic.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a game (test setup).
    pub fn insert_game(&self, game: GameWithRelations) {
        let mut state = self.state.lock().unwrap();
        state.games.insert(game.game.id, game);
    }

    /// All candidates regardless of status (test assertions).
    pub fn all_candidates(&self) -> Vec<SimilarityCandidate> {
        let state = self.state.lock().unwrap();
        let mut all: Vec<_> = state.candidates.values().cloned().collect();
        all.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
        all
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn get_game_with_relations(&self, id: Uuid) -> Result<Option<GameWithRelations>> {
        let state = self.state.lock().unwrap();
        Ok(state.games.get(&id).cloned())
    }

    async fn list_published_games_except(&self, id: Uuid) -> Result<Vec<GameWithRelations>> {
        let state = self.state.lock().unwrap();
        let mut games: Vec<_> = state
            .games
            .values()
            .filter(|g| g.game.id != id && g.game.status == turath_common::GameStatus::Published)
            .cloned()
            .collect();
        // HashMap order is arbitrary; pin it for reproducible runs.
        games.sort_by_key(|g| (g.game.created_at, g.game.id));
        Ok(games)
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<SimilarityCandidate> {
        let now = Utc::now();
        let stored = SimilarityCandidate {
            id: Uuid::new_v4(),
            game_a_id: candidate.game_a_id,
            game_b_id: candidate.game_b_id,
            overall_score: candidate.overall_score,
            structural_score: candidate.structural_score,
            semantic_score: candidate.semantic_score,
            heritage_score: candidate.heritage_score,
            explanation: candidate.explanation,
            algorithm_version: candidate.algorithm_version,
            ai_assisted: candidate.ai_assisted,
            status: MatchStatus::Pending,
            curator_notes: None,
            concept_id: None,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.lock().unwrap();
        state.candidates.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<SimilarityCandidate>> {
        let state = self.state.lock().unwrap();
        Ok(state.candidates.get(&id).cloned())
    }

    async fn find_candidate_for_pair(
        &self,
        game_a_id: Uuid,
        game_b_id: Uuid,
    ) -> Result<Option<SimilarityCandidate>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .candidates
            .values()
            .find(|c| {
                (c.game_a_id == game_a_id && c.game_b_id == game_b_id)
                    || (c.game_a_id == game_b_id && c.game_b_id == game_a_id)
            })
            .cloned())
    }

    async fn list_pending_candidates(&self, limit: i64) -> Result<Vec<SimilarityCandidate>> {
        let state = self.state.lock().unwrap();
        let mut pending: Vec<_> = state
            .candidates
            .values()
            .filter(|c| c.status == MatchStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
        pending.truncate(limit.max(0) as usize);
        Ok(pending)
    }

    async fn count_candidates_with_status(&self, status: MatchStatus) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .candidates
            .values()
            .filter(|c| c.status == status)
            .count() as i64)
    }

    async fn update_candidate_review(
        &self,
        id: Uuid,
        status: MatchStatus,
        notes: Option<String>,
    ) -> Result<SimilarityCandidate> {
        let mut state = self.state.lock().unwrap();
        let candidate = state
            .candidates
            .get_mut(&id)
            .ok_or_else(|| anyhow!("candidate not found: {id}"))?;
        candidate.status = status;
        candidate.curator_notes = notes;
        candidate.updated_at = Utc::now();
        Ok(candidate.clone())
    }

    async fn commit_acceptance(
        &self,
        candidate_id: Uuid,
        concept: ConceptRef,
        notes: Option<String>,
        game_ids: (Uuid, Uuid),
    ) -> Result<(SimilarityCandidate, Concept)> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();

        let concept = match concept {
            ConceptRef::Existing(id) => state
                .concepts
                .get(&id)
                .cloned()
                .ok_or_else(|| anyhow!("concept not found: {id}"))?,
            ConceptRef::Create(new) => {
                let concept = Concept {
                    id: Uuid::new_v4(),
                    name: new.name,
                    description: new.description,
                    canonical_game_id: new.canonical_game_id,
                    created_at: now,
                    updated_at: now,
                };
                state.concepts.insert(concept.id, concept.clone());
                concept
            }
        };

        let candidate = state
            .candidates
            .get_mut(&candidate_id)
            .ok_or_else(|| anyhow!("candidate not found: {candidate_id}"))?;
        candidate.status = MatchStatus::Accepted;
        candidate.curator_notes = notes;
        candidate.concept_id = Some(concept.id);
        candidate.updated_at = now;
        let candidate = candidate.clone();

        for game_id in [game_ids.0, game_ids.1] {
            let game = state
                .games
                .get_mut(&game_id)
                .ok_or_else(|| anyhow!("game not found: {game_id}"))?;
            game.game.concept_id = Some(concept.id);
            game.game.updated_at = now;
        }

        Ok((candidate, concept))
    }

    async fn get_concept(&self, id: Uuid) -> Result<Option<Concept>> {
        let state = self.state.lock().unwrap();
        Ok(state.concepts.get(&id).cloned())
    }
}

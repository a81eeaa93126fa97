//! The curation state machine.
//!
//! Candidates start `pending` and move exactly once to `accepted`,
//! `rejected`, or `postponed`. There is no way back out of a reviewed
//! state — re-evaluating a pair means a fresh candidate from a fresh
//! comparison run.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use turath_common::{GameWithRelations, TurathError};
use uuid::Uuid;

use crate::models::{MatchStatus, PendingMatch, SimilarityCandidate};
use crate::store::{CatalogStore, ConceptRef, NewConcept};

/// Accept a match: resolve or lazily create the shared concept and link
/// both games to it.
///
/// When no `concept_id` is given, a new concept is created, named from the
/// two canonical names, with `game_a` as its canonical game. A game that
/// already belongs to a *different* concept fails the whole acceptance
/// with [`TurathError::AlreadyLinked`] — silently re-homing a game would
/// orphan its old concept with no trace. Re-accepting into the same
/// concept is fine (that is how a third variant joins an existing pair).
pub async fn accept_match(
    store: &dyn CatalogStore,
    candidate_id: Uuid,
    concept_id: Option<Uuid>,
    notes: Option<String>,
) -> Result<SimilarityCandidate> {
    let candidate = require_pending(store, candidate_id).await?;

    let game_a = require_game(store, candidate.game_a_id).await?;
    let game_b = require_game(store, candidate.game_b_id).await?;

    let concept_ref = match concept_id {
        Some(id) => {
            store
                .get_concept(id)
                .await?
                .ok_or(TurathError::ConceptNotFound(id))?;
            ConceptRef::Existing(id)
        }
        None => ConceptRef::Create(NewConcept {
            name: format!("{} / {}", game_a.game.name, game_b.game.name),
            description: Some(format!(
                "مفهوم موحد يجمع لعبة «{}» من {} ولعبة «{}» من {}",
                game_a.game.name, game_a.country.name, game_b.game.name, game_b.country.name
            )),
            canonical_game_id: Some(game_a.game.id),
        }),
    };

    for game in [&game_a, &game_b] {
        if let Some(existing) = game.game.concept_id {
            let target_is_same = matches!(concept_ref, ConceptRef::Existing(id) if id == existing);
            if !target_is_same {
                return Err(TurathError::AlreadyLinked {
                    game_id: game.game.id,
                    existing_concept_id: existing,
                }
                .into());
            }
        }
    }

    let (candidate, concept) = store
        .commit_acceptance(
            candidate_id,
            concept_ref,
            notes,
            (game_a.game.id, game_b.game.id),
        )
        .await?;

    tracing::info!(
        candidate_id = %candidate.id,
        concept_id = %concept.id,
        game_a = %game_a.game.id,
        game_b = %game_b.game.id,
        "Match accepted"
    );

    Ok(candidate)
}

/// Reject a match. Stores the notes; neither game is touched.
pub async fn reject_match(
    store: &dyn CatalogStore,
    candidate_id: Uuid,
    notes: Option<String>,
) -> Result<SimilarityCandidate> {
    require_pending(store, candidate_id).await?;
    let candidate = store
        .update_candidate_review(candidate_id, MatchStatus::Rejected, notes)
        .await?;
    tracing::info!(candidate_id = %candidate.id, "Match rejected");
    Ok(candidate)
}

/// Postpone a match for later review. Stores the notes; neither game is
/// touched.
pub async fn postpone_match(
    store: &dyn CatalogStore,
    candidate_id: Uuid,
    notes: Option<String>,
) -> Result<SimilarityCandidate> {
    require_pending(store, candidate_id).await?;
    let candidate = store
        .update_candidate_review(candidate_id, MatchStatus::Postponed, notes)
        .await?;
    tracing::info!(candidate_id = %candidate.id, "Match postponed");
    Ok(candidate)
}

/// The curator review queue: pending candidates hydrated with both games'
/// relations, best match first. Candidates whose games have since been
/// deleted are skipped rather than failing the whole queue.
pub async fn get_pending_matches(
    store: &dyn CatalogStore,
    limit: i64,
) -> Result<Vec<PendingMatch>> {
    let candidates = store.list_pending_candidates(limit).await?;
    let mut matches = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let (game_a, game_b) = match (
            store.get_game_with_relations(candidate.game_a_id).await?,
            store.get_game_with_relations(candidate.game_b_id).await?,
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                tracing::warn!(
                    candidate_id = %candidate.id,
                    "Skipping candidate whose game no longer exists"
                );
                continue;
            }
        };
        matches.push(PendingMatch {
            candidate,
            game_a,
            game_b,
        });
    }

    Ok(matches)
}

/// Per-status candidate counts for the admin dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatusCounts {
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
    pub postponed: i64,
}

pub async fn match_status_counts(store: &dyn CatalogStore) -> Result<MatchStatusCounts> {
    Ok(MatchStatusCounts {
        pending: store.count_candidates_with_status(MatchStatus::Pending).await?,
        accepted: store.count_candidates_with_status(MatchStatus::Accepted).await?,
        rejected: store.count_candidates_with_status(MatchStatus::Rejected).await?,
        postponed: store.count_candidates_with_status(MatchStatus::Postponed).await?,
    })
}

// --- Guards ---

async fn require_pending(
    store: &dyn CatalogStore,
    candidate_id: Uuid,
) -> Result<SimilarityCandidate> {
    let candidate = store
        .get_candidate(candidate_id)
        .await?
        .ok_or(TurathError::CandidateNotFound(candidate_id))?;
    if candidate.status != MatchStatus::Pending {
        return Err(TurathError::InvalidTransition {
            id: candidate_id,
            status: candidate.status.to_string(),
        }
        .into());
    }
    Ok(candidate)
}

async fn require_game(store: &dyn CatalogStore, game_id: Uuid) -> Result<GameWithRelations> {
    store
        .get_game_with_relations(game_id)
        .await?
        .ok_or_else(|| TurathError::GameNotFound(game_id).into())
}

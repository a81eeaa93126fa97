//! Comparison activities: the jobs that run the engine against the stored
//! catalog.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use turath_common::{AppConfig, TurathError};
use turath_similarity::{SimilarityEngine, SimilarityResult};
use uuid::Uuid;

use crate::store::{CatalogStore, NewCandidate};

/// Stats returned by one comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareStats {
    pub games_compared: u32,
    pub matches_found: u32,
    pub candidates_created: u32,
}

/// Compare a newly ingested game against every published game and persist
/// each result at or above the candidate floor as a pending candidate.
///
/// The published corpus is read once into an immutable snapshot before any
/// scoring happens, so contributor edits landing mid-run cannot tear a
/// comparison. Pairs that already have a candidate (in either order) are
/// skipped — one candidate per pair, ever.
///
/// This is the only write path into the candidate store that the engine
/// side initiates; everything else goes through curator transitions.
pub async fn compare_new_game(
    store: &dyn CatalogStore,
    engine: &SimilarityEngine,
    config: &AppConfig,
    game_id: Uuid,
) -> Result<CompareStats> {
    let target = store
        .get_game_with_relations(game_id)
        .await?
        .ok_or(TurathError::GameNotFound(game_id))?;
    let snapshot = store.list_published_games_except(game_id).await?;

    let results =
        engine.rank_against_snapshot(&target, &snapshot, config.candidate_floor_threshold)?;

    let mut stats = CompareStats {
        games_compared: snapshot.len() as u32,
        matches_found: results.len() as u32,
        candidates_created: 0,
    };

    for result in &results {
        if store
            .find_candidate_for_pair(result.game_a_id, result.game_b_id)
            .await?
            .is_some()
        {
            continue;
        }
        store.insert_candidate(NewCandidate::from_result(result)?).await?;
        stats.candidates_created += 1;
    }

    tracing::info!(
        game_id = %game_id,
        games_compared = stats.games_compared,
        matches_found = stats.matches_found,
        candidates_created = stats.candidates_created,
        "Similarity comparison complete"
    );

    Ok(stats)
}

/// Score a game against the published corpus without persisting anything —
/// powers the admin "similar games" panel.
pub async fn find_similar_games(
    store: &dyn CatalogStore,
    engine: &SimilarityEngine,
    game_id: Uuid,
    threshold: f64,
) -> Result<Vec<SimilarityResult>> {
    let target = store
        .get_game_with_relations(game_id)
        .await?
        .ok_or(TurathError::GameNotFound(game_id))?;
    let snapshot = store.list_published_games_except(game_id).await?;
    Ok(engine.rank_against_snapshot(&target, &snapshot, threshold)?)
}

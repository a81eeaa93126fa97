//! Postgres-backed `CatalogStore`.
//!
//! Runtime sqlx queries against the CMS schema. Game rows keep their list
//! fields (local names, tools, rules) as JSONB and their status as text;
//! the row structs here convert them into the shared model types.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use turath_common::{Country, Game, GameWithRelations, HeritageField, Tag};
use uuid::Uuid;

use crate::models::{Concept, MatchStatus, SimilarityCandidate};
use crate::store::{CatalogStore, ConceptRef, NewCandidate};

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// --- Row types ---

#[derive(Debug, sqlx::FromRow)]
struct GameRow {
    id: Uuid,
    name: String,
    local_names: serde_json::Value,
    country_id: Uuid,
    region: Option<String>,
    heritage_field_id: Uuid,
    game_type: String,
    age_group: Option<String>,
    practitioners: Option<String>,
    players_count: Option<String>,
    tools: serde_json::Value,
    environment: Option<String>,
    timing: Option<String>,
    description: Option<String>,
    rules: serde_json::Value,
    win_loss_system: Option<String>,
    start_end_mechanism: Option<String>,
    oral_tradition: Option<String>,
    social_context: Option<String>,
    concept_id: Option<Uuid>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GameRow {
    fn into_game(self, tags: Vec<Tag>) -> Result<Game> {
        Ok(Game {
            id: self.id,
            name: self.name,
            local_names: serde_json::from_value(self.local_names)?,
            country_id: self.country_id,
            region: self.region,
            heritage_field_id: self.heritage_field_id,
            game_type: self.game_type,
            age_group: self.age_group,
            practitioners: self.practitioners,
            players_count: self.players_count,
            tools: serde_json::from_value(self.tools)?,
            environment: self.environment,
            timing: self.timing,
            description: self.description,
            rules: serde_json::from_value(self.rules)?,
            win_loss_system: self.win_loss_system,
            start_end_mechanism: self.start_end_mechanism,
            oral_tradition: self.oral_tradition,
            social_context: self.social_context,
            tag_ids: tags.iter().map(|t| t.id).collect(),
            concept_id: self.concept_id,
            status: self
                .status
                .parse()
                .map_err(|e: String| anyhow!(e))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CountryRow {
    id: Uuid,
    name: String,
    region: Option<String>,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Country {
            id: row.id,
            name: row.name,
            region: row.region,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HeritageFieldRow {
    id: Uuid,
    name: String,
}

impl From<HeritageFieldRow> for HeritageField {
    fn from(row: HeritageFieldRow) -> Self {
        HeritageField {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GameTagRow {
    game_id: Uuid,
    id: Uuid,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct CandidateRow {
    id: Uuid,
    game_a_id: Uuid,
    game_b_id: Uuid,
    overall_score: f64,
    structural_score: f64,
    semantic_score: f64,
    heritage_score: f64,
    explanation: serde_json::Value,
    algorithm_version: String,
    ai_assisted: bool,
    status: String,
    curator_notes: Option<String>,
    concept_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for SimilarityCandidate {
    type Error = anyhow::Error;

    fn try_from(row: CandidateRow) -> Result<Self> {
        Ok(SimilarityCandidate {
            id: row.id,
            game_a_id: row.game_a_id,
            game_b_id: row.game_b_id,
            overall_score: row.overall_score,
            structural_score: row.structural_score,
            semantic_score: row.semantic_score,
            heritage_score: row.heritage_score,
            explanation: row.explanation,
            algorithm_version: row.algorithm_version,
            ai_assisted: row.ai_assisted,
            status: row.status.parse().map_err(|e: String| anyhow!(e))?,
            curator_notes: row.curator_notes,
            concept_id: row.concept_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ConceptRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    canonical_game_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ConceptRow> for Concept {
    fn from(row: ConceptRow) -> Self {
        Concept {
            id: row.id,
            name: row.name,
            description: row.description,
            canonical_game_id: row.canonical_game_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// --- Hydration helpers ---

impl PgCatalogStore {
    async fn tags_for_games(&self, game_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>> {
        let rows = sqlx::query_as::<_, GameTagRow>(
            r#"
            SELECT gt.game_id, t.id, t.name
            FROM game_tags gt
            JOIN tags t ON t.id = gt.tag_id
            WHERE gt.game_id = ANY($1)
            ORDER BY t.name ASC
            "#,
        )
        .bind(game_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_game: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_game.entry(row.game_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
            });
        }
        Ok(by_game)
    }

    async fn hydrate(&self, rows: Vec<GameRow>) -> Result<Vec<GameWithRelations>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let game_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.tags_for_games(&game_ids).await?;

        // Countries and heritage fields are small reference tables; load
        // them once instead of once per game.
        let countries: HashMap<Uuid, Country> =
            sqlx::query_as::<_, CountryRow>("SELECT id, name, region FROM countries")
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|row| (row.id, Country::from(row)))
                .collect();
        let fields: HashMap<Uuid, HeritageField> =
            sqlx::query_as::<_, HeritageFieldRow>("SELECT id, name FROM heritage_fields")
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|row| (row.id, HeritageField::from(row)))
                .collect();

        let mut games = Vec::with_capacity(rows.len());
        for row in rows {
            let country = countries
                .get(&row.country_id)
                .cloned()
                .ok_or_else(|| anyhow!("country not found: {}", row.country_id))?;
            let heritage_field = fields
                .get(&row.heritage_field_id)
                .cloned()
                .ok_or_else(|| anyhow!("heritage field not found: {}", row.heritage_field_id))?;
            let game_tags = tags.remove(&row.id).unwrap_or_default();
            games.push(GameWithRelations {
                game: row.into_game(game_tags.clone())?,
                country,
                heritage_field,
                tags: game_tags,
            });
        }
        Ok(games)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn get_game_with_relations(&self, id: Uuid) -> Result<Option<GameWithRelations>> {
        let row = sqlx::query_as::<_, GameRow>("SELECT * FROM games WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            None => Ok(None),
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
        }
    }

    async fn list_published_games_except(&self, id: Uuid) -> Result<Vec<GameWithRelations>> {
        let rows = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT * FROM games
            WHERE status = 'published' AND id != $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<SimilarityCandidate> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO similarity_candidates
                (game_a_id, game_b_id, overall_score, structural_score,
                 semantic_score, heritage_score, explanation,
                 algorithm_version, ai_assisted, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')
            RETURNING *
            "#,
        )
        .bind(candidate.game_a_id)
        .bind(candidate.game_b_id)
        .bind(candidate.overall_score)
        .bind(candidate.structural_score)
        .bind(candidate.semantic_score)
        .bind(candidate.heritage_score)
        .bind(&candidate.explanation)
        .bind(&candidate.algorithm_version)
        .bind(candidate.ai_assisted)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<SimilarityCandidate>> {
        let row =
            sqlx::query_as::<_, CandidateRow>("SELECT * FROM similarity_candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn find_candidate_for_pair(
        &self,
        game_a_id: Uuid,
        game_b_id: Uuid,
    ) -> Result<Option<SimilarityCandidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT * FROM similarity_candidates
            WHERE (game_a_id = $1 AND game_b_id = $2)
               OR (game_a_id = $2 AND game_b_id = $1)
            "#,
        )
        .bind(game_a_id)
        .bind(game_b_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn list_pending_candidates(&self, limit: i64) -> Result<Vec<SimilarityCandidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT * FROM similarity_candidates
            WHERE status = 'pending'
            ORDER BY overall_score DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count_candidates_with_status(&self, status: MatchStatus) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM similarity_candidates WHERE status = $1",
        )
        .bind(status.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn update_candidate_review(
        &self,
        id: Uuid,
        status: MatchStatus,
        notes: Option<String>,
    ) -> Result<SimilarityCandidate> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE similarity_candidates
            SET status = $2, curator_notes = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn commit_acceptance(
        &self,
        candidate_id: Uuid,
        concept: ConceptRef,
        notes: Option<String>,
        game_ids: (Uuid, Uuid),
    ) -> Result<(SimilarityCandidate, Concept)> {
        let mut tx = self.pool.begin().await?;

        let concept: Concept = match concept {
            ConceptRef::Existing(id) => {
                let row =
                    sqlx::query_as::<_, ConceptRow>("SELECT * FROM concepts WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?
                        .ok_or_else(|| anyhow!("concept not found: {id}"))?;
                row.into()
            }
            ConceptRef::Create(new) => {
                let row = sqlx::query_as::<_, ConceptRow>(
                    r#"
                    INSERT INTO concepts (name, description, canonical_game_id)
                    VALUES ($1, $2, $3)
                    RETURNING *
                    "#,
                )
                .bind(&new.name)
                .bind(&new.description)
                .bind(new.canonical_game_id)
                .fetch_one(&mut *tx)
                .await?;
                row.into()
            }
        };

        let candidate_row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE similarity_candidates
            SET status = 'accepted', curator_notes = $2, concept_id = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(notes)
        .bind(concept.id)
        .fetch_one(&mut *tx)
        .await?;

        for game_id in [game_ids.0, game_ids.1] {
            sqlx::query("UPDATE games SET concept_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(game_id)
                .bind(concept.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok((candidate_row.try_into()?, concept))
    }

    async fn get_concept(&self, id: Uuid) -> Result<Option<Concept>> {
        let row = sqlx::query_as::<_, ConceptRow>("SELECT * FROM concepts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }
}

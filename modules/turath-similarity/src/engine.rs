//! The orchestrating engine: runs the three scorers, combines them with the
//! injected weights, and attaches the explanation.

use turath_common::{GameWithRelations, TurathError};

use crate::explain::build_explanation;
use crate::result::SimilarityResult;
use crate::scoring::{score_heritage, score_semantic, score_structural};
use crate::scoring::weights::ScoringWeights;

/// Version tag persisted with every result so rescored candidates can be
/// told apart from old ones.
pub const ALGORITHM_VERSION: &str = "rule-based-v1";

/// Default overall score at or above which a pair is suggested for linking.
pub const DEFAULT_LINK_THRESHOLD: f64 = 0.75;

/// Pure pairwise scorer. Construct once with a weight table and reuse; the
/// engine holds no mutable state and comparisons of distinct pairs can run
/// on any number of threads.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    weights: ScoringWeights,
    link_threshold: f64,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl SimilarityEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            link_threshold: DEFAULT_LINK_THRESHOLD,
        }
    }

    /// Override the link threshold (e.g. from `AppConfig`).
    pub fn with_link_threshold(mut self, threshold: f64) -> Self {
        self.link_threshold = threshold;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one pair of fully-hydrated games. Deterministic, no I/O.
    ///
    /// Fails with [`TurathError::MissingRequiredField`] when either side
    /// lacks a description or rules — a silent zero for mandatory text
    /// would corrupt ranking, so the contract violation surfaces instead.
    pub fn calculate(
        &self,
        a: &GameWithRelations,
        b: &GameWithRelations,
    ) -> Result<SimilarityResult, TurathError> {
        validate_comparable(a)?;
        validate_comparable(b)?;

        let structural = score_structural(a, b, &self.weights.structural_facets);
        let semantic = score_semantic(a, b, &self.weights.semantic_facets);
        let heritage = score_heritage(a, b);

        let overall_score = structural.score * self.weights.structural
            + semantic.score * self.weights.semantic
            + heritage.score * self.weights.heritage;

        let explanation = build_explanation(
            overall_score,
            &structural,
            &semantic,
            &heritage,
            self.link_threshold,
        );

        Ok(SimilarityResult {
            game_a_id: a.game.id,
            game_b_id: b.game.id,
            overall_score,
            structural,
            semantic,
            heritage,
            explanation,
            algorithm_version: ALGORITHM_VERSION.to_string(),
            ai_assisted: false,
        })
    }

    /// Score a target against an immutable snapshot of candidate games:
    /// skips the target itself, keeps results at or above `threshold`,
    /// sorted by overall score descending.
    ///
    /// One comparison per snapshot entry — a plain scan is fine at
    /// catalog scale (hundreds of games); nothing here precludes sharding
    /// the snapshot across workers if that ever stops being true.
    pub fn rank_against_snapshot(
        &self,
        target: &GameWithRelations,
        snapshot: &[GameWithRelations],
        threshold: f64,
    ) -> Result<Vec<SimilarityResult>, TurathError> {
        let mut results = Vec::new();
        for candidate in snapshot {
            if candidate.game.id == target.game.id {
                continue;
            }
            let result = self.calculate(target, candidate)?;
            if result.overall_score >= threshold {
                results.push(result);
            }
        }
        results.sort_by(|x, y| y.overall_score.total_cmp(&x.overall_score));
        Ok(results)
    }
}

fn validate_comparable(g: &GameWithRelations) -> Result<(), TurathError> {
    if g.game.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
        return Err(TurathError::MissingRequiredField {
            game_id: g.game.id,
            field: "description",
        });
    }
    if g.game.rules.is_empty() {
        return Err(TurathError::MissingRequiredField {
            game_id: g.game.id,
            field: "rules",
        });
    }
    Ok(())
}

/// Shared fixtures for the crate's unit tests.
#[cfg(test)]
pub mod tests_support {
    use chrono::{TimeZone, Utc};
    use turath_common::{Country, Game, GameStatus, GameWithRelations, HeritageField, Tag};
    use uuid::Uuid;

    /// A published game with the mandatory fields set and everything else
    /// absent. Country carries the الخليج macro-region.
    pub fn minimal_game(name: &str, description: &str, rules: &[&str]) -> GameWithRelations {
        let country_id = Uuid::new_v4();
        let heritage_field_id = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        GameWithRelations {
            game: Game {
                id: Uuid::new_v4(),
                name: name.to_string(),
                local_names: Vec::new(),
                country_id,
                region: None,
                heritage_field_id,
                game_type: "شعبية".to_string(),
                age_group: None,
                practitioners: None,
                players_count: None,
                tools: Vec::new(),
                environment: None,
                timing: None,
                description: Some(description.to_string()),
                rules: rules.iter().map(|r| r.to_string()).collect(),
                win_loss_system: None,
                start_end_mechanism: None,
                oral_tradition: None,
                social_context: None,
                tag_ids: Vec::new(),
                concept_id: None,
                status: GameStatus::Published,
                created_at: now,
                updated_at: now,
            },
            country: Country {
                id: country_id,
                name: "السعودية".to_string(),
                region: Some("الخليج".to_string()),
            },
            heritage_field: HeritageField {
                id: heritage_field_id,
                name: "ألعاب شعبية".to_string(),
            },
            tags: Vec::new(),
        }
    }

    /// A fully-populated fixture for the richer scorer tests.
    pub fn rich_game_a() -> GameWithRelations {
        let mut g = minimal_game(
            "الحبار",
            "لعبة قفز شعبية يرسم فيها اللاعبون مربعات على الأرض ويتنقلون بينها",
            &[
                "يرسم اللاعبون مربعات متتالية على الأرض",
                "يقفز اللاعب على رجل واحدة بين المربعات",
                "من يدوس الخط يخرج من الجولة",
            ],
        );
        g.game.local_names = vec!["الحجلة".to_string(), "البربر".to_string()];
        g.game.players_count = Some("من 2 إلى 6 لاعبين".to_string());
        g.game.tools = vec!["حجر مسطح".to_string(), "طباشير".to_string()];
        g.game.environment = Some("ساحة الحي".to_string());
        g.game.timing = Some("في النهار".to_string());
        g.game.win_loss_system = Some("من يكمل كل المربعات دون خطأ يفوز".to_string());
        g.game.start_end_mechanism = Some("قرعة تحدد من يبدأ".to_string());
        g.game.oral_tradition = Some("ينشد الأطفال حبار حبار يا ولد أثناء القفز".to_string());
        g
    }

    /// Two same-country games sharing `n` tags (and the same heritage
    /// field), for the tag-bonus tests.
    pub fn with_shared_tags(n: usize) -> (GameWithRelations, GameWithRelations) {
        let a = minimal_game("الحبار", "وصف اللعبة الأولى", &["قاعدة أولى"]);
        let mut b = a.clone();
        b.game.id = Uuid::new_v4();
        let tags: Vec<Tag> = (0..n)
            .map(|i| Tag {
                id: Uuid::new_v4(),
                name: format!("وسم-{i}"),
            })
            .collect();
        let (mut a, mut b) = (a, b);
        a.tags = tags.clone();
        a.game.tag_ids = tags.iter().map(|t| t.id).collect();
        b.tags = tags.clone();
        b.game.tag_ids = tags.iter().map(|t| t.id).collect();
        (a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::{minimal_game, rich_game_a};
    use super::*;
    use turath_common::TurathError;

    #[test]
    fn overall_is_the_weighted_combination() {
        let engine = SimilarityEngine::default();
        let a = rich_game_a();
        let mut b = rich_game_a();
        b.game.id = uuid::Uuid::new_v4();
        b.game.tools = vec!["حبل".to_string()];

        let r = engine.calculate(&a, &b).unwrap();
        let w = engine.weights();
        let expected = r.structural.score * w.structural
            + r.semantic.score * w.semantic
            + r.heritage.score * w.heritage;
        assert!((r.overall_score - expected).abs() < 1e-12);
        assert!((w.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_description_fails_loudly() {
        let engine = SimilarityEngine::default();
        let a = rich_game_a();
        let mut b = rich_game_a();
        b.game.description = None;
        match engine.calculate(&a, &b) {
            Err(TurathError::MissingRequiredField { field, .. }) => {
                assert_eq!(field, "description")
            }
            other => panic!("expected MissingRequiredField, got {other:?}"),
        }
    }

    #[test]
    fn missing_rules_fail_loudly() {
        let engine = SimilarityEngine::default();
        let a = rich_game_a();
        let mut b = rich_game_a();
        b.game.rules.clear();
        assert!(matches!(
            engine.calculate(&a, &b),
            Err(TurathError::MissingRequiredField { field: "rules", .. })
        ));
    }

    #[test]
    fn blank_description_counts_as_missing() {
        let engine = SimilarityEngine::default();
        let a = rich_game_a();
        let mut b = rich_game_a();
        b.game.description = Some("   ".to_string());
        assert!(engine.calculate(&a, &b).is_err());
    }

    #[test]
    fn snapshot_ranking_skips_target_and_respects_threshold() {
        let engine = SimilarityEngine::default();
        let target = rich_game_a();
        let near = {
            let mut g = rich_game_a();
            g.game.id = uuid::Uuid::new_v4();
            g
        };
        let far = minimal_game("الدامة", "لعبة تفكير على رقعة بحجارة ملونة", &[
            "يحرك كل لاعب حجارته قطريا",
        ]);

        let snapshot = vec![target.clone(), near.clone(), far];
        let results = engine
            .rank_against_snapshot(&target, &snapshot, 0.75)
            .unwrap();

        assert!(results.iter().all(|r| r.game_b_id != target.game.id));
        assert!(results.iter().all(|r| r.overall_score >= 0.75));
        assert_eq!(results.first().map(|r| r.game_b_id), Some(near.game.id));
    }

    #[test]
    fn ranking_is_sorted_descending() {
        let engine = SimilarityEngine::default();
        let target = rich_game_a();
        let mut snapshot = Vec::new();
        for tools in [vec!["حجر مسطح".to_string(), "طباشير".to_string()], vec![], vec!["حبل".to_string()]] {
            let mut g = rich_game_a();
            g.game.id = uuid::Uuid::new_v4();
            g.game.tools = tools;
            snapshot.push(g);
        }
        let results = engine.rank_against_snapshot(&target, &snapshot, 0.0).unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
    }
}

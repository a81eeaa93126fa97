//! End-to-end scenarios for the similarity engine: whole-pipeline scoring
//! of realistic game records, determinism, and ranking behavior.

use chrono::{TimeZone, Utc};
use turath_common::{Country, Game, GameStatus, GameWithRelations, HeritageField, Tag};
use turath_similarity::{ScoringWeights, SimilarityEngine, SuggestedAction};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct GameSpec<'a> {
    name: &'a str,
    description: &'a str,
    rules: &'a [&'a str],
    country: (&'a str, Option<&'a str>),
    heritage_field_id: Uuid,
    game_type: &'a str,
}

fn build_game(spec: GameSpec<'_>) -> GameWithRelations {
    let country_id = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    GameWithRelations {
        game: Game {
            id: Uuid::new_v4(),
            name: spec.name.to_string(),
            local_names: Vec::new(),
            country_id,
            region: None,
            heritage_field_id: spec.heritage_field_id,
            game_type: spec.game_type.to_string(),
            age_group: None,
            practitioners: None,
            players_count: None,
            tools: Vec::new(),
            environment: None,
            timing: None,
            description: Some(spec.description.to_string()),
            rules: spec.rules.iter().map(|r| r.to_string()).collect(),
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
            name: spec.country.0.to_string(),
            region: spec.country.1.map(|r| r.to_string()),
        },
        heritage_field: HeritageField {
            id: spec.heritage_field_id,
            name: "ألعاب شعبية".to_string(),
        },
        tags: Vec::new(),
    }
}

fn tag(name: &str) -> Tag {
    Tag {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Scenario 1: same game documented in two countries
// ---------------------------------------------------------------------------

#[test]
fn identical_game_across_borders_links() {
    let field_id = Uuid::new_v4();
    let rules = [
        "يرسم اللاعبون مربعات متتالية على الأرض",
        "يقفز اللاعب على رجل واحدة بين المربعات",
        "من يدوس الخط يخرج من الجولة",
    ];
    let description = "لعبة قفز شعبية يتنقل فيها اللاعبون بين مربعات مرسومة على الأرض";

    let mut saudi = build_game(GameSpec {
        name: "الحجلة",
        description,
        rules: &rules,
        country: ("السعودية", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "حركية",
    });
    saudi.game.local_names = vec!["الحبار".to_string()];

    let mut kuwaiti = build_game(GameSpec {
        name: "الحجلة",
        description,
        rules: &rules,
        country: ("الكويت", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "حركية",
    });
    kuwaiti.game.local_names = vec!["الحبار".to_string()];

    let engine = SimilarityEngine::default();
    let result = engine.calculate(&saudi, &kuwaiti).unwrap();

    assert!(
        result.overall_score > 0.8,
        "overall was {}",
        result.overall_score
    );
    assert_eq!(result.explanation.suggested_action, SuggestedAction::Link);
    assert!(result.heritage.cultural_diffusion);
    assert!(!result.heritage.same_country);
}

// ---------------------------------------------------------------------------
// Scenario 2: same classification and region, different game
// ---------------------------------------------------------------------------

#[test]
fn unrelated_game_in_same_region_is_ignored() {
    let field_id = Uuid::new_v4();

    let mut jumping = build_game(GameSpec {
        name: "الحجلة",
        description: "لعبة قفز يتنقل فيها اللاعبون بين مربعات مرسومة",
        rules: &["يقفز اللاعب بين المربعات دون لمس الخطوط"],
        country: ("السعودية", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "حركية",
    });
    jumping.game.tools = vec!["حجر مسطح".to_string(), "طباشير".to_string()];
    jumping.game.oral_tradition = Some("حجلة حجلة يا بنات الحارة".to_string());

    let mut board = build_game(GameSpec {
        name: "الدامة",
        description: "رقعة خشبية تتوزع عليها قطع ملونة ويتبادل الخصمان التحريك",
        rules: &["يحرك كل خصم قطعه قطريا نحو صف الخصم"],
        country: ("البحرين", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "ذهنية",
    });
    board.game.tools = vec!["رقعة خشبية".to_string(), "قطع ملونة".to_string()];
    board.game.oral_tradition = Some("دامتك ضايعة يا فلان".to_string());

    let engine = SimilarityEngine::default();
    let result = engine.calculate(&jumping, &board).unwrap();

    // 0.4 same field + 0.15 same region + 0.1 cross-border diffusion
    assert!((result.heritage.score - 0.65).abs() < 1e-9);
    assert!(result.semantic.score < 0.15, "semantic was {}", result.semantic.score);
    assert!(result.overall_score < 0.5, "overall was {}", result.overall_score);
    assert_eq!(result.explanation.suggested_action, SuggestedAction::Ignore);
}

// ---------------------------------------------------------------------------
// Determinism & weighting
// ---------------------------------------------------------------------------

#[test]
fn calculate_is_deterministic() {
    let field_id = Uuid::new_v4();
    let mut a = build_game(GameSpec {
        name: "الكيرم",
        description: "طاولة خشبية مربعة تقذف عليها أقراص صغيرة نحو الجيوب",
        rules: &["يصوب اللاعب القرص الضارب نحو أقراصه", "من يدخل أقراصه كلها أولا يفوز"],
        country: ("عمان", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "ذهنية",
    });
    a.game.tools = vec!["طاولة كيرم".to_string(), "أقراص".to_string()];
    a.tags = vec![tag("ألعاب الطاولة"), tag("ألعاب جماعية")];
    a.game.tag_ids = a.tags.iter().map(|t| t.id).collect();

    let mut b = build_game(GameSpec {
        name: "الكيرم البحري",
        description: "لوح خشبي مربع تقذف فوقه أقراص نحو جيوب الزوايا",
        rules: &["يصوب اللاعب القرص الضارب نحو أقراصه الملونة"],
        country: ("البحرين", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "ذهنية",
    });
    b.game.tools = vec!["لوح كيرم".to_string(), "أقراص ملونة".to_string()];
    b.tags = a.tags.clone();
    b.game.tag_ids = a.game.tag_ids.clone();

    let engine = SimilarityEngine::default();
    let first = engine.calculate(&a, &b).unwrap();
    let second = engine.calculate(&a, &b).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn overall_is_a_convex_combination() {
    let w = ScoringWeights::default();
    assert!((w.sum() - 1.0).abs() < 1e-12);
    assert!((w.structural_facets.sum() - 1.0).abs() < 1e-12);
    assert!((w.semantic_facets.sum() - 1.0).abs() < 1e-12);

    let field_id = Uuid::new_v4();
    let a = build_game(GameSpec {
        name: "لعبة أولى",
        description: "وصف اللعبة الأولى مع تفاصيل القفز والجري",
        rules: &["قاعدة أولى عن الجري"],
        country: ("قطر", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "حركية",
    });
    let b = build_game(GameSpec {
        name: "لعبة ثانية",
        description: "وصف مختلف تماما عن رمي السهام الخشبية",
        rules: &["قاعدة عن التصويب بدقة"],
        country: ("قطر", Some("الخليج")),
        heritage_field_id: field_id,
        game_type: "حركية",
    });

    let engine = SimilarityEngine::new(w.clone());
    let r = engine.calculate(&a, &b).unwrap();
    let expected = r.structural.score * w.structural
        + r.semantic.score * w.semantic
        + r.heritage.score * w.heritage;
    assert!((r.overall_score - expected).abs() < 1e-12);
}

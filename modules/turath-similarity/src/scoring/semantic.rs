//! Semantic facet scorer: free-text attributes compared by keyword overlap
//! and phrase matching.

use turath_common::GameWithRelations;

use crate::result::{FacetScore, SemanticScore};
use crate::text::{array_keyword_overlap, fuzzy_match, keyword_overlap, normalize};

use super::weights::SemanticWeights;

/// Compare the four free-text facets and combine them with the injected
/// weight table. Callers must have validated that description and rules are
/// present on both sides (the engine does).
pub fn score_semantic(
    a: &GameWithRelations,
    b: &GameWithRelations,
    weights: &SemanticWeights,
) -> SemanticScore {
    let description = score_description(
        a.game.description.as_deref().unwrap_or(""),
        b.game.description.as_deref().unwrap_or(""),
    );
    let rules = score_rules(&a.game.rules, &b.game.rules);
    let oral_tradition = score_oral_tradition(&a.game.oral_tradition, &b.game.oral_tradition);
    let local_names = score_local_names(&a.game.local_names, &b.game.local_names);

    let score = description.score * weights.description
        + rules.score * weights.rules
        + oral_tradition.score * weights.oral_tradition
        + local_names.score * weights.local_names;

    SemanticScore {
        score,
        description,
        rules,
        oral_tradition,
        local_names,
    }
}

fn score_description(a: &str, b: &str) -> FacetScore {
    let overlap = keyword_overlap(a, b);
    let reason = if overlap.matched.is_empty() {
        "لا توجد كلمات مشتركة في الوصف".to_string()
    } else {
        format!(
            "كلمات مشتركة في الوصف: {}",
            preview(&overlap.matched)
        )
    };
    FacetScore { score: overlap.score, reason }
}

fn score_rules(a: &[String], b: &[String]) -> FacetScore {
    let overlap = array_keyword_overlap(a, b);
    let reason = if overlap.matched.is_empty() {
        "لا يوجد تقاطع في قواعد اللعب".to_string()
    } else {
        format!("قواعد متقاربة حول: {}", preview(&overlap.matched))
    };
    FacetScore { score: overlap.score, reason }
}

/// Up to five matched stems for the reason line.
fn preview(matched: &[String]) -> String {
    matched
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join("، ")
}

// --- Oral tradition ---

const PHRASE_WINDOW_MIN: usize = 3;
const PHRASE_WINDOW_MAX: usize = 5;
const PHRASE_FUZZY_THRESHOLD: f64 = 0.85;
const PHRASE_BONUS: f64 = 0.2;

fn score_oral_tradition(a: &Option<String>, b: &Option<String>) -> FacetScore {
    let (a, b) = match (a, b) {
        (None, None) => {
            return FacetScore {
                score: 1.0,
                reason: "لا توجد مأثورات شفهية مسجلة في اللعبتين".to_string(),
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return FacetScore {
                score: 0.0,
                reason: "المأثورات الشفهية مسجلة في لعبة واحدة فقط".to_string(),
            }
        }
        (Some(a), Some(b)) => (a.as_str(), b.as_str()),
    };

    let overlap = keyword_overlap(a, b);
    let phrase_hit = shares_phrase(a, b);
    let score = if phrase_hit {
        (overlap.score + PHRASE_BONUS).min(1.0)
    } else {
        overlap.score
    };

    let reason = if phrase_hit {
        "تتشارك اللعبتان عبارة شفهية متوارثة".to_string()
    } else if overlap.matched.is_empty() {
        "المأثورات الشفهية مختلفة".to_string()
    } else {
        format!("مفردات شفهية مشتركة: {}", preview(&overlap.matched))
    };

    FacetScore { score, reason }
}

/// Any pair of 3-to-5-word normalized windows fuzzy-matching across the two
/// texts. Quadratic in window counts, which is fine for chant-length text.
fn shares_phrase(a: &str, b: &str) -> bool {
    let wa = phrase_windows(a);
    let wb = phrase_windows(b);
    wa.iter()
        .any(|pa| wb.iter().any(|pb| fuzzy_match(pa, pb, PHRASE_FUZZY_THRESHOLD)))
}

fn phrase_windows(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let mut out = Vec::new();
    for size in PHRASE_WINDOW_MIN..=PHRASE_WINDOW_MAX {
        if words.len() < size {
            break;
        }
        for window in words.windows(size) {
            out.push(window.join(" "));
        }
    }
    out
}

// --- Local names ---

/// Three-tier per-name comparison: exact normalized match (1.0), fuzzy at
/// 0.8 (0.8), substring containment either way (0.6) — the first tier that
/// fires on the first matching counterpart wins for each name of side A.
/// Total is divided by the longer list and capped at 1.0.
///
/// Absent local names carry no signal, so empty-on-both-sides scores 0.0 —
/// unlike tools or timing, where shared absence is agreement.
fn score_local_names(a: &[String], b: &[String]) -> FacetScore {
    if a.is_empty() || b.is_empty() {
        return FacetScore {
            score: 0.0,
            reason: "لا تتوفر أسماء محلية للمقارنة".to_string(),
        };
    }

    let nb: Vec<String> = b.iter().map(|n| normalize(n)).collect();
    let mut total = 0.0;
    let mut matched_names: Vec<String> = Vec::new();

    for name in a {
        let na = normalize(name);
        for candidate in &nb {
            let tier = if na == *candidate {
                1.0
            } else if fuzzy_match(&na, candidate, 0.8) {
                0.8
            } else if na.contains(candidate.as_str()) || candidate.contains(na.as_str()) {
                0.6
            } else {
                continue;
            };
            total += tier;
            matched_names.push(name.clone());
            break;
        }
    }

    let score = (total / a.len().max(b.len()) as f64).min(1.0);
    let reason = if matched_names.is_empty() {
        "الأسماء المحلية مختلفة".to_string()
    } else {
        format!("أسماء محلية متقاربة: {}", matched_names.join("، "))
    };

    FacetScore { score, reason }
}

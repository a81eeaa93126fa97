//! Structural facet scorer: discrete and structured attributes.

use std::sync::OnceLock;

use regex::Regex;
use turath_common::GameWithRelations;

use crate::result::{FacetScore, StructuralScore};
use crate::text::{array_jaccard, fuzzy_match, normalize, tokenize};

use super::weights::StructuralWeights;

/// Compare the six structured facets of two games and combine them with the
/// injected weight table.
pub fn score_structural(
    a: &GameWithRelations,
    b: &GameWithRelations,
    weights: &StructuralWeights,
) -> StructuralScore {
    let players = score_players(&a.game.players_count, &b.game.players_count);
    let (tools, matched_tools) = score_tools(&a.game.tools, &b.game.tools);
    let environment = score_environment(&a.game.environment, &b.game.environment);
    let game_type = score_game_type(&a.game.game_type, &b.game.game_type);
    let timing = score_timing(&a.game.timing, &b.game.timing);
    let mechanics = score_mechanics(a, b);

    let score = players.score * weights.players
        + tools.score * weights.tools
        + environment.score * weights.environment
        + game_type.score * weights.game_type
        + timing.score * weights.timing
        + mechanics.score * weights.mechanics;

    StructuralScore {
        score,
        players,
        tools,
        environment,
        game_type,
        timing,
        mechanics,
        matched_tools,
    }
}

// --- Players ---

fn score_players(a: &Option<String>, b: &Option<String>) -> FacetScore {
    let (a, b) = match (a, b) {
        (None, None) => {
            return FacetScore {
                score: 1.0,
                reason: "عدد اللاعبين غير محدد في اللعبتين".to_string(),
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return FacetScore {
                score: 0.3,
                reason: "عدد اللاعبين محدد في لعبة واحدة فقط".to_string(),
            }
        }
        (Some(a), Some(b)) => (normalize(a), normalize(b)),
    };

    if a == b {
        return FacetScore {
            score: 1.0,
            reason: "عدد اللاعبين متطابق".to_string(),
        };
    }

    match (extract_count(&a), extract_count(&b)) {
        (Some(x), Some(y)) => {
            let diff = x.abs_diff(y);
            let score = match diff {
                0 => 1.0,
                1..=2 => 0.8,
                3..=5 => 0.5,
                _ => 0.2,
            };
            FacetScore {
                score,
                reason: format!("فرق عدد اللاعبين {diff}"),
            }
        }
        _ => {
            if fuzzy_match(&a, &b, 0.7) {
                FacetScore {
                    score: 0.7,
                    reason: "وصف عدد اللاعبين متقارب".to_string(),
                }
            } else {
                FacetScore {
                    score: 0.3,
                    reason: "وصف عدد اللاعبين مختلف".to_string(),
                }
            }
        }
    }
}

/// First integer in the string, reading both ASCII and Arabic-Indic digits.
fn extract_count(s: &str) -> Option<u32> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| {
        Regex::new(r"[0-9\u{0660}-\u{0669}]+").expect("digit pattern compiles")
    });
    let found = re.find(s)?;
    let ascii: String = found
        .as_str()
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => {
                char::from(b'0' + (c as u32 - 0x0660) as u8)
            }
            c => c,
        })
        .collect();
    ascii.parse().ok()
}

// --- Tools ---

fn score_tools(a: &[String], b: &[String]) -> (FacetScore, Vec<String>) {
    if a.is_empty() && b.is_empty() {
        return (
            FacetScore {
                score: 1.0,
                reason: "اللعبتان لا تحتاجان أدوات".to_string(),
            },
            Vec::new(),
        );
    }
    if a.is_empty() || b.is_empty() {
        return (
            FacetScore {
                score: 0.3,
                reason: "الأدوات مذكورة في لعبة واحدة فقط".to_string(),
            },
            Vec::new(),
        );
    }

    // The facet score is the plain Jaccard of the normalized lists. The
    // fuzzy-matched pairs below feed the reason text only and do not move
    // the score — an open question inherited from the first version of the
    // algorithm; folding them in would reshuffle existing rankings.
    let score = array_jaccard(a, b);

    let mut matched = Vec::new();
    for tool_a in a {
        let na = normalize(tool_a);
        if b.iter().any(|tool_b| fuzzy_match(&na, &normalize(tool_b), 0.75)) {
            matched.push(tool_a.clone());
        }
    }

    let reason = if matched.is_empty() {
        "لا توجد أدوات مشتركة".to_string()
    } else {
        format!("أدوات مشتركة: {}", matched.join("، "))
    };

    (FacetScore { score, reason }, matched)
}

// --- Environment ---

// Keyword lists are stored in normalized form (taa marbuta as ه, hamza
// folded) because membership is checked on normalized text.
const INDOOR: &[&str] = &["داخل", "منزل", "بيت", "غرفه", "مغلق", "مجلس", "مقهي"];
const OUTDOOR: &[&str] = &[
    "خارج", "ساحه", "شارع", "حي", "بر", "صحراء", "بحر", "شاطي", "حديقه", "هواء", "ارض",
];

fn environment_category(env: &str) -> Option<&'static str> {
    if INDOOR.iter().any(|k| env.contains(k)) {
        return Some("indoor");
    }
    if OUTDOOR.iter().any(|k| env.contains(k)) {
        return Some("outdoor");
    }
    None
}

fn score_environment(a: &Option<String>, b: &Option<String>) -> FacetScore {
    let (a, b) = match (a, b) {
        (None, None) => {
            return FacetScore {
                score: 1.0,
                reason: "بيئة اللعب غير محددة في اللعبتين".to_string(),
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return FacetScore {
                score: 0.3,
                reason: "بيئة اللعب محددة في لعبة واحدة فقط".to_string(),
            }
        }
        (Some(a), Some(b)) => (normalize(a), normalize(b)),
    };

    if a == b {
        return FacetScore {
            score: 1.0,
            reason: "بيئة اللعب متطابقة".to_string(),
        };
    }

    match (environment_category(&a), environment_category(&b)) {
        (Some(ca), Some(cb)) if ca == cb => FacetScore {
            score: 0.8,
            reason: if ca == "indoor" {
                "كلتا اللعبتين داخلية".to_string()
            } else {
                "كلتا اللعبتين خارجية".to_string()
            },
        },
        _ => {
            if fuzzy_match(&a, &b, 0.6) {
                FacetScore {
                    score: 0.6,
                    reason: "وصف بيئة اللعب متقارب".to_string(),
                }
            } else {
                FacetScore {
                    score: 0.2,
                    reason: "بيئتا اللعب مختلفتان".to_string(),
                }
            }
        }
    }
}

// --- Game type ---

// Five synonym groups: physical, mental, folk, comedic, maritime.
const TYPE_GROUPS: &[&[&str]] = &[
    &["حركيه", "جري", "قفز", "مطارده", "رياضيه", "جسديه"],
    &["ذهنيه", "فكريه", "ذكاء", "الغاز", "تفكير", "حسابيه"],
    &["شعبيه", "تراثيه", "تقليديه", "قديمه", "فلكلوريه"],
    &["فكاهيه", "مرح", "ضحك", "تسليه", "ترفيهيه"],
    &["بحريه", "صيد", "غوص", "سفن", "ساحليه"],
];

fn score_game_type(a: &str, b: &str) -> FacetScore {
    let (a, b) = (normalize(a), normalize(b));

    if a == b {
        return FacetScore {
            score: 1.0,
            reason: "نوع اللعبة متطابق".to_string(),
        };
    }

    let co_member = TYPE_GROUPS.iter().any(|group| {
        group.iter().any(|k| a.contains(k)) && group.iter().any(|k| b.contains(k))
    });

    if co_member {
        FacetScore {
            score: 0.8,
            reason: "نوعا اللعبتين من نفس الفئة".to_string(),
        }
    } else {
        FacetScore {
            score: 0.2,
            reason: "نوعا اللعبتين مختلفان".to_string(),
        }
    }
}

// --- Timing ---

const DAY: &[&str] = &["نهار", "صباح", "ظهر", "عصر", "ضحي"];
const NIGHT: &[&str] = &["ليل", "مساء", "عشاء", "سهره"];
const SEASONS: &[&str] = &["صيف", "شتاء", "ربيع", "خريف"];

fn score_timing(a: &Option<String>, b: &Option<String>) -> FacetScore {
    let (a, b) = match (a, b) {
        (None, None) => {
            return FacetScore {
                score: 1.0,
                reason: "وقت اللعب غير محدد في اللعبتين".to_string(),
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return FacetScore {
                score: 0.5,
                reason: "وقت اللعب محدد في لعبة واحدة فقط".to_string(),
            }
        }
        (Some(a), Some(b)) => (normalize(a), normalize(b)),
    };

    if a == b {
        return FacetScore {
            score: 1.0,
            reason: "وقت اللعب متطابق".to_string(),
        };
    }

    let day_night = |s: &str| {
        if DAY.iter().any(|k| s.contains(k)) {
            Some("day")
        } else if NIGHT.iter().any(|k| s.contains(k)) {
            Some("night")
        } else {
            None
        }
    };

    match (day_night(&a), day_night(&b)) {
        (Some(x), Some(y)) if x == y => {
            return FacetScore {
                score: 0.8,
                reason: "اللعبتان تمارسان في نفس فترة اليوم".to_string(),
            }
        }
        _ => {}
    }

    let same_season = SEASONS
        .iter()
        .any(|season| a.contains(season) && b.contains(season));
    if same_season {
        FacetScore {
            score: 0.7,
            reason: "اللعبتان تمارسان في نفس الموسم".to_string(),
        }
    } else {
        FacetScore {
            score: 0.3,
            reason: "وقتا اللعب مختلفان".to_string(),
        }
    }
}

// --- Mechanics ---

/// Fraction of words on the longer side that fuzzy-match a word on the
/// other side. Stem-free: mechanics text is short and formulaic, and
/// stemming erases the signal.
fn word_fuzzy_overlap(a: &str, b: &str) -> f64 {
    let wa = tokenize(&normalize(a));
    let wb = tokenize(&normalize(b));
    if wa.is_empty() && wb.is_empty() {
        return 1.0;
    }
    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }
    let matched = wa
        .iter()
        .filter(|w| wb.iter().any(|x| fuzzy_match(w, x, 0.8)))
        .count();
    matched as f64 / wa.len().max(wb.len()) as f64
}

fn score_text_pair(a: &Option<String>, b: &Option<String>) -> f64 {
    match (a, b) {
        (None, None) => 1.0,
        (Some(_), None) | (None, Some(_)) => 0.3,
        (Some(a), Some(b)) => word_fuzzy_overlap(a, b),
    }
}

/// Mean of the win/loss-system and start/end-mechanism comparisons.
fn score_mechanics(a: &GameWithRelations, b: &GameWithRelations) -> FacetScore {
    let win_loss = score_text_pair(&a.game.win_loss_system, &b.game.win_loss_system);
    let start_end = score_text_pair(&a.game.start_end_mechanism, &b.game.start_end_mechanism);
    let score = (win_loss + start_end) / 2.0;

    let reason = if score >= 0.7 {
        "آليات الفوز والبدء متشابهة".to_string()
    } else if score >= 0.4 {
        "آليات اللعب متشابهة جزئيا".to_string()
    } else {
        "آليات اللعب مختلفة".to_string()
    };

    FacetScore { score, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_absence_defaults() {
        assert_eq!(score_players(&None, &None).score, 1.0);
        assert_eq!(score_players(&Some("٤".into()), &None).score, 0.3);
    }

    #[test]
    fn players_exact_match_wins() {
        let s = score_players(&Some("٤ لاعبين".into()), &Some("٤ لاعبين".into()));
        assert_eq!(s.score, 1.0);
    }

    #[test]
    fn players_integer_difference_buckets() {
        let s = |x: &str, y: &str| score_players(&Some(x.into()), &Some(y.into())).score;
        assert_eq!(s("4 لاعبين", "٤ أشخاص"), 1.0);
        assert_eq!(s("4 لاعبين", "6 لاعبين"), 0.8);
        assert_eq!(s("4 لاعبين", "9 لاعبين"), 0.5);
        assert_eq!(s("2 لاعبين", "20 لاعبا"), 0.2);
    }

    #[test]
    fn players_fuzzy_fallback_without_integers() {
        let s = score_players(
            &Some("مجموعة كبيرة".into()),
            &Some("مجموعه كبيره".into()),
        );
        assert_eq!(s.score, 1.0); // normalization makes these identical

        let s = score_players(&Some("فريقان".into()), &Some("مجموعة كبيرة".into()));
        assert_eq!(s.score, 0.3);
    }

    #[test]
    fn tools_defaults_and_jaccard() {
        let (s, m) = score_tools(&[], &[]);
        assert_eq!(s.score, 1.0);
        assert!(m.is_empty());

        let (s, _) = score_tools(&["حبل".into()], &[]);
        assert_eq!(s.score, 0.3);

        let (s, m) = score_tools(
            &["حبل".into(), "حجر".into()],
            &["حبل".into(), "عصا".into()],
        );
        // Jaccard: 1 shared of 3 distinct
        assert!((s.score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(m, vec!["حبل".to_string()]);
    }

    #[test]
    fn tools_score_ignores_fuzzy_matches() {
        // حبال fuzzy-matches حبل (ratio 0.75) but the normalized strings
        // differ, so Jaccard stays zero while the matched list fills in.
        let (s, m) = score_tools(&["حبال".into()], &["حبل".into()]);
        assert_eq!(m, vec!["حبال".to_string()]);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn environment_categories() {
        let s = score_environment(
            &Some("ساحة الحي".into()),
            &Some("في الهواء الطلق".into()),
        );
        assert_eq!(s.score, 0.8);

        let s = score_environment(&Some("داخل المنزل".into()), &Some("ساحة خارجية".into()));
        assert_eq!(s.score, 0.2);

        assert_eq!(score_environment(&None, &None).score, 1.0);
        assert_eq!(score_environment(&Some("بر".into()), &None).score, 0.3);
    }

    #[test]
    fn game_type_synonym_groups() {
        assert_eq!(score_game_type("لعبة حركية", "لعبة حركية").score, 1.0);
        assert_eq!(score_game_type("جري ومطاردة", "لعبة حركية").score, 0.8);
        assert_eq!(score_game_type("لعبة ذهنية", "لعبة حركية").score, 0.2);
    }

    #[test]
    fn timing_buckets() {
        assert_eq!(score_timing(&None, &None).score, 1.0);
        assert_eq!(score_timing(&Some("ليلا".into()), &None).score, 0.5);
        assert_eq!(
            score_timing(&Some("بعد صلاة العشاء".into()), &Some("في الليل".into())).score,
            0.8
        );
        assert_eq!(
            score_timing(&Some("في الصيف".into()), &Some("عطلة الصيف".into())).score,
            0.7
        );
        assert_eq!(
            score_timing(&Some("في الصيف".into()), &Some("في الشتاء".into())).score,
            0.3
        );
    }

    #[test]
    fn mechanics_absence_defaults() {
        let game = crate::engine::tests_support::minimal_game("لعبة", "وصف", &["قاعدة اولى"]);
        let mut with_win = game.clone();
        with_win.game.win_loss_system = Some("من يصل أولا يفوز".into());

        // both fields absent on both sides → 1.0
        let s = score_mechanics(&game, &game);
        assert_eq!(s.score, 1.0);

        // one side has win/loss, other doesn't: (0.3 + 1.0) / 2
        let s = score_mechanics(&with_win, &game);
        assert!((s.score - 0.65).abs() < 1e-9);
    }

    #[test]
    fn word_overlap_penalizes_length_mismatch() {
        let full = word_fuzzy_overlap("من يجمع النقاط يفوز", "من يجمع النقاط يفوز");
        assert_eq!(full, 1.0);
        let partial = word_fuzzy_overlap("يجمع النقاط", "يجمع النقاط ثم يعلن الفائز");
        assert!(partial < 1.0 && partial > 0.0);
    }
}

//! Heritage facet scorer: classification, geography, and shared tags.
//!
//! Additive rather than weighted-average: each signal stacks a fixed bonus
//! and the total is capped at 1.0. The flags on the result are contract —
//! explanation building and the curation UI read them.

use std::collections::HashSet;

use turath_common::GameWithRelations;
use uuid::Uuid;

use crate::result::HeritageScore;
use crate::text::normalize;

const SAME_FIELD_BONUS: f64 = 0.4;
const SAME_COUNTRY_BONUS: f64 = 0.2;
const SAME_REGION_BONUS: f64 = 0.15;
const PER_TAG_BONUS: f64 = 0.1;
const TAG_BONUS_CAP: f64 = 0.3;
/// Same classification practiced across a border — the signature of a
/// culturally diffused game rather than a coincidence.
const DIFFUSION_BONUS: f64 = 0.1;
const NEIGHBOR_BONUS: f64 = 0.05;

pub fn score_heritage(a: &GameWithRelations, b: &GameWithRelations) -> HeritageScore {
    let same_heritage_field = a.game.heritage_field_id == b.game.heritage_field_id;
    let same_country = a.game.country_id == b.game.country_id;

    let region_a = a.effective_region().map(normalize);
    let region_b = b.effective_region().map(normalize);
    let same_region = match (&region_a, &region_b) {
        (Some(ra), Some(rb)) => ra == rb,
        _ => false,
    };

    let shared_tags = shared_tag_names(a, b);

    let mut score = 0.0;
    if same_heritage_field {
        score += SAME_FIELD_BONUS;
    }
    if same_country {
        score += SAME_COUNTRY_BONUS;
    } else if same_region {
        score += SAME_REGION_BONUS;
    }
    score += (PER_TAG_BONUS * shared_tags.len() as f64).min(TAG_BONUS_CAP);

    let cultural_diffusion = same_heritage_field && !same_country;
    if cultural_diffusion {
        score += DIFFUSION_BONUS;
    }

    let neighboring_regions = !same_country
        && !same_region
        && match (&region_a, &region_b) {
            (Some(ra), Some(rb)) => are_neighboring_regions(ra, rb),
            _ => false,
        };
    if neighboring_regions {
        score += NEIGHBOR_BONUS;
    }

    HeritageScore {
        score: score.min(1.0),
        same_heritage_field,
        same_country,
        same_region,
        shared_tags,
        cultural_diffusion,
        neighboring_regions,
    }
}

/// Tag names present on both games, sorted for deterministic output.
fn shared_tag_names(a: &GameWithRelations, b: &GameWithRelations) -> Vec<String> {
    let ids_b: HashSet<Uuid> = b.tags.iter().map(|t| t.id).collect();
    let mut names: Vec<String> = a
        .tags
        .iter()
        .filter(|t| ids_b.contains(&t.id))
        .map(|t| t.name.clone())
        .collect();
    names.sort();
    names
}

// --- Macro-region adjacency ---

// Region strings are mapped onto five macro-regions by keyword containment
// (normalized forms). Unresolvable regions simply earn no bonus.
const MACRO_REGIONS: &[(&str, &[&str])] = &[
    ("الخليج", &["خليج", "نجد", "حجاز", "عمان", "بحرين", "قطر", "كويت", "امارات", "سعوديه", "يمن"]),
    ("العراق", &["عراق", "رافدين", "بغداد", "بصره", "موصل"]),
    ("الشام", &["شام", "سوريا", "لبنان", "اردن", "فلسطين", "دمشق"]),
    ("وادي النيل", &["نيل", "مصر", "سودان", "صعيد", "نوبه"]),
    ("المغرب العربي", &["مغرب", "جزاير", "تونس", "ليبيا", "موريتانيا"]),
];

const ADJACENT: &[(&str, &str)] = &[
    ("الخليج", "العراق"),
    ("الخليج", "الشام"),
    ("العراق", "الشام"),
    ("الشام", "وادي النيل"),
    ("وادي النيل", "المغرب العربي"),
];

fn macro_region(region: &str) -> Option<&'static str> {
    MACRO_REGIONS
        .iter()
        .find(|(label, keywords)| {
            region == *label || keywords.iter().any(|k| region.contains(k))
        })
        .map(|(label, _)| *label)
}

fn are_neighboring_regions(a: &str, b: &str) -> bool {
    match (macro_region(a), macro_region(b)) {
        (Some(ma), Some(mb)) => ADJACENT
            .iter()
            .any(|(x, y)| (*x == ma && *y == mb) || (*x == mb && *y == ma)),
        _ => false,
    }
}

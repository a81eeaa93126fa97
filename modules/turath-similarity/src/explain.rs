//! Explanation building: turns the three partial scores into the
//! curator-facing summary, strengths/differences, confidence tier, and
//! suggested action.

use crate::result::{
    ConfidenceTier, Explanation, HeritageScore, SemanticScore, StructuralScore, SuggestedAction,
};

const STRUCTURAL_STRENGTH_THRESHOLD: f64 = 0.7;
const SEMANTIC_STRENGTH_THRESHOLD: f64 = 0.6;
const REVIEW_THRESHOLD: f64 = 0.5;

pub fn build_explanation(
    overall: f64,
    structural: &StructuralScore,
    semantic: &SemanticScore,
    heritage: &HeritageScore,
    link_threshold: f64,
) -> Explanation {
    let mut strengths = Vec::new();
    if structural.score > STRUCTURAL_STRENGTH_THRESHOLD {
        strengths.push("تشابه قوي في بنية اللعب وأدواته".to_string());
    }
    if semantic.score > SEMANTIC_STRENGTH_THRESHOLD {
        strengths.push("تقارب واضح في الوصف والقواعد".to_string());
    }
    if heritage.same_heritage_field {
        strengths.push("تنتميان إلى المجال التراثي نفسه".to_string());
    }
    if heritage.same_country {
        strengths.push("موثقتان من البلد نفسه".to_string());
    }

    let mut differences = Vec::new();
    if !heritage.same_country && !heritage.same_region {
        differences.push("موثقتان من بلدين ومنطقتين مختلفتين".to_string());
    }

    // Confidence tiers are stricter than the act-on threshold; a pair can
    // clear the link threshold and still read as low confidence.
    let confidence = if overall >= 0.90 {
        ConfidenceTier::High
    } else if overall >= 0.80 {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    };

    let suggested_action = if overall >= link_threshold {
        SuggestedAction::Link
    } else if overall >= REVIEW_THRESHOLD {
        SuggestedAction::Review
    } else {
        SuggestedAction::Ignore
    };

    let summary = build_summary(overall, &strengths, &differences);

    Explanation {
        summary,
        strengths,
        differences,
        confidence,
        suggested_action,
    }
}

fn build_summary(overall: f64, strengths: &[String], differences: &[String]) -> String {
    let percent = (overall * 100.0).round() as u32;
    let strengths_text = join_or(strengths, "دون نقاط تشابه بارزة");
    let differences_text = join_or(differences, "دون فروق جوهرية");

    if overall >= 0.8 {
        format!(
            "اللعبتان متطابقتان على الأرجح بنسبة {percent}٪: {strengths_text}."
        )
    } else if overall >= 0.6 {
        format!(
            "تشابه كبير بنسبة {percent}٪ بين اللعبتين: {strengths_text}؛ {differences_text}."
        )
    } else if overall >= 0.4 {
        format!(
            "تشابه جزئي بنسبة {percent}٪: {strengths_text}؛ {differences_text}."
        )
    } else {
        format!("تشابه ضعيف بنسبة {percent}٪ — {differences_text}.")
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join("، ")
    }
}

//! Lexical comparison primitives over normalized strings and sets.

use std::collections::HashSet;

use super::normalize::normalize;

/// Levenshtein edit distance. Inputs are expected to be normalized already;
/// the distance itself is plain character-level DP (via strsim).
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Similarity ratio in [0,1]: `1 - distance / max(len)`.
///
/// 1.0 for two empty strings, 0.0 when exactly one side is empty.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

pub fn fuzzy_match(a: &str, b: &str, threshold: f64) -> bool {
    similarity_ratio(a, b) >= threshold
}

/// Jaccard similarity over two sets: `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets compare as identical (1.0) — absence on both sides is
/// agreement, not missing data.
pub fn set_jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Jaccard over two string arrays, normalizing every element first.
pub fn array_jaccard(a: &[String], b: &[String]) -> f64 {
    let na: HashSet<String> = a.iter().map(|s| normalize(s)).collect();
    let nb: HashSet<String> = b.iter().map(|s| normalize(s)).collect();
    set_jaccard(&na, &nb)
}

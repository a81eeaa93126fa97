//! Tokenization and keyword extraction.
//!
//! Keywords are stems: normalize → tokenize → drop stopwords → stem →
//! dedupe → drop short stems. The resulting set is order-irrelevant and is
//! what the semantic scorer compares.

use std::collections::HashSet;

use super::normalize::{normalize, stem};
use super::stopwords::is_stopword;

// Arabic and Latin punctuation treated as token boundaries.
const PUNCTUATION: &[char] = &[
    '.', ',', '،', '؛', ';', ':', '!', '؟', '?', '"', '\'', '«', '»', '(', ')', '[', ']', '{',
    '}', '-', '_', '/', '\\', '…',
];

/// Split on whitespace and punctuation, dropping one-character fragments.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || PUNCTUATION.contains(&c))
        .filter(|t| t.chars().count() > 1)
        .map(|t| t.to_string())
        .collect()
}

/// Extract the keyword set of a free-text field.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    tokenize(&normalize(text))
        .into_iter()
        .filter(|t| !is_stopword(t))
        .map(|t| stem(&t))
        .filter(|s| s.chars().count() > 2)
        .collect()
}

/// Keyword overlap between two texts: the matched stems (sorted, for
/// deterministic output) and the Jaccard score of the two keyword sets.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordOverlap {
    pub matched: Vec<String>,
    pub score: f64,
}

pub fn keyword_overlap(a: &str, b: &str) -> KeywordOverlap {
    overlap_of(extract_keywords(a), extract_keywords(b))
}

/// Keyword overlap of two string arrays, pooling each side's keywords
/// across all of its elements first.
pub fn array_keyword_overlap(a: &[String], b: &[String]) -> KeywordOverlap {
    let pool = |items: &[String]| -> HashSet<String> {
        items.iter().flat_map(|s| extract_keywords(s)).collect()
    };
    overlap_of(pool(a), pool(b))
}

fn overlap_of(ka: HashSet<String>, kb: HashSet<String>) -> KeywordOverlap {
    if ka.is_empty() && kb.is_empty() {
        return KeywordOverlap { matched: Vec::new(), score: 1.0 };
    }
    if ka.is_empty() || kb.is_empty() {
        return KeywordOverlap { matched: Vec::new(), score: 0.0 };
    }
    let mut matched: Vec<String> = ka.intersection(&kb).cloned().collect();
    matched.sort();
    let union = ka.union(&kb).count();
    let score = matched.len() as f64 / union as f64;
    KeywordOverlap { matched, score }
}

//! Arabic-aware text primitives: normalization, stemming, lexical
//! comparison, and keyword extraction.

pub mod compare;
pub mod keywords;
pub mod normalize;
pub mod stopwords;

pub use compare::{array_jaccard, edit_distance, fuzzy_match, set_jaccard, similarity_ratio};
pub use keywords::{array_keyword_overlap, extract_keywords, keyword_overlap, tokenize};
pub use normalize::{normalize, stem};
pub use stopwords::is_stopword;

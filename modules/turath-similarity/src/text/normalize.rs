//! Arabic orthographic normalization and light stemming.
//!
//! `normalize` is lossy: it merges spelling variants that differ only by
//! regionally inconsistent orthography (hamza carriers, taa marbuta, alef
//! maksura, diacritics), which is what makes two independently written
//! descriptions of the same game comparable at all.

use super::stopwords::is_stopword;

const TATWEEL: char = '\u{0640}';

/// Canonicalize an Arabic string for comparison. Pure, total, idempotent.
///
/// Folds hamza-carrier letters to their bare bases, strips diacritics and
/// tatweel, folds taa marbuta to haa and alef maksura to yaa, collapses
/// whitespace runs, and trims.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        if is_diacritic(ch) || ch == TATWEEL {
            continue;
        }
        out.push(match ch {
            // Hamza alef variants and alef wasla to bare alef
            '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => '\u{0627}',
            // Hamza on waw to waw
            '\u{0624}' => '\u{0648}',
            // Hamza on yaa to yaa
            '\u{0626}' => '\u{064A}',
            // Taa marbuta to haa
            '\u{0629}' => '\u{0647}',
            // Alef maksura to yaa
            '\u{0649}' => '\u{064A}',
            c => c,
        });
    }

    // Collapse whitespace runs and trim in one pass.
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Combining marks stripped by normalization: tashkeel, superscript alef,
/// maddah/hamza marks.
fn is_diacritic(ch: char) -> bool {
    matches!(ch,
        '\u{064B}'..='\u{0652}' |
        '\u{0653}'..='\u{0655}' |
        '\u{0670}' |
        '\u{065F}'
    )
}

/// Weak letters, never kept when falling back to a consonant skeleton.
fn is_weak(ch: char) -> bool {
    matches!(ch, 'ا' | 'و' | 'ي' | 'ء')
}

// Checked in order: preposition+article compounds first, then the bare
// article, then bare waw. Bare ب/ك/ل are not stripped; outside the
// compounds they are usually root letters.
const PREFIXES: &[&str] = &["وال", "بال", "كال", "فال", "لل", "ال", "و"];

// Plural, dual, feminine and possessive endings. Taa marbuta appears as ه
// here because stemming runs on normalized text.
const SUFFIXES: &[&str] = &["ات", "ون", "ين", "ان", "ها", "ه", "ي", "ا"];

/// Heuristic light stem of a normalized Arabic word.
///
/// Best-effort, not a morphological analyzer: strips one article or
/// particle prefix (when the remainder keeps at least three letters and is
/// not itself a stopword), strips one common suffix under the same length
/// guard, collapses a handful of broken-plural shapes to their three-letter
/// root, and finally falls back to the first three non-weak consonants of
/// long words. False stems are expected; scoring downstream is statistical.
///
/// Output is never longer than the input and never empty for input of
/// three letters or more.
pub fn stem(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    if chars.len() < 3 {
        return word.to_string();
    }

    for prefix in PREFIXES {
        let pc: Vec<char> = prefix.chars().collect();
        if chars.len() >= pc.len() + 3 && chars[..pc.len()] == pc[..] {
            let rest: String = chars[pc.len()..].iter().collect();
            if !is_stopword(&rest) {
                chars = chars.split_off(pc.len());
                break;
            }
        }
    }

    for suffix in SUFFIXES {
        let sc: Vec<char> = suffix.chars().collect();
        if chars.len() >= sc.len() + 3 && chars[chars.len() - sc.len()..] == sc[..] {
            chars.truncate(chars.len() - sc.len());
            break;
        }
    }

    if let Some(root) = collapse_broken_plural(&chars) {
        return root;
    }

    if chars.len() > 4 {
        let skeleton: String = chars.iter().copied().filter(|c| !is_weak(*c)).take(3).collect();
        if skeleton.chars().count() == 3 {
            return skeleton;
        }
    }

    chars.into_iter().collect()
}

/// Collapse the common broken-plural shapes to their triliteral root.
/// Patterns are matched on normalized letters (hamzas already folded).
fn collapse_broken_plural(chars: &[char]) -> Option<String> {
    let root = |a: &char, b: &char, c: &char| Some([*a, *b, *c].iter().collect());
    match chars {
        // مفاعيل — e.g. مفاتيح
        ['م', a, 'ا', b, 'ي', c] => root(a, b, c),
        // افعال — e.g. اولاد, العاب
        ['ا', a, b, 'ا', c] => root(a, b, c),
        // مفاعل — e.g. ملاعب
        ['م', a, 'ا', b, c] => root(a, b, c),
        // فواعل — e.g. شوارع
        [a, 'و', 'ا', b, c] => root(a, b, c),
        // فعايل — e.g. عرايس (hamza already folded to yaa)
        [a, b, 'ا', 'ي', c] => root(a, b, c),
        // فعول — e.g. بيوت
        [a, b, 'و', c] => root(a, b, c),
        // فعال — e.g. جبال
        [a, b, 'ا', c] => root(a, b, c),
        _ => None,
    }
}

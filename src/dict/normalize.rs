// src/dict/normalize.rs
//! Label grammar.
//!
//! ```text
//! label     := base suffix* whitespace*
//! suffix    := whitespace* "(" digit+ ")"
//! ```
//!
//! The base word is `base` with trailing whitespace removed. Only a *numeric*
//! parenthetical at the very end counts as a disambiguator: `"bread (2)"` → `"bread"`,
//! while `"bread (food)"` keeps its gloss. Stacked suffixes all go, so a base word never
//! has a suffix left to strip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::curation::CorrectionTable;

static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.*?)(?:\s*\(\d+\))*$").expect("label grammar compiles"));

/// Base word of an already-corrected label.
pub fn base_word(label: &str) -> &str {
    // The pattern matches every string; the fallback is unreachable.
    let label = label.trim_end();
    let base = LABEL
        .captures(label)
        .and_then(|c| c.get(1))
        .map_or(label, |m| m.as_str());
    base.trim_end()
}

/// Correct a raw label (identity unless listed), then take its base word.
pub fn normalize(raw_label: &str, corrections: &CorrectionTable) -> String {
    let corrected = corrections.get(raw_label).map_or(raw_label, String::as_str);
    s!(base_word(corrected))
}

/// Matching key for cross-source lookups: only Hebrew letters and Latin letters survive.
/// Punctuation, digits, whitespace and niqqud are dropped.
pub fn normalized_key(text: &str) -> String {
    text.chars()
        .filter(|c| ('א'..='ת').contains(c) || c.is_ascii_alphabetic())
        .collect()
}

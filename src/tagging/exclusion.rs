//! Structural exclusion rules for keyword candidates.
//!
//! Each rule is an independent predicate named for the pattern it rejects.
//! [`EXCLUSIONS`] lists them in evaluation order and [`is_excluded`] ORs them
//! with short-circuiting. Length and stopword checks depend on the run
//! configuration and live in the extractor instead.
//!
//! # Example
//!
//! ```rust
//! use chatmd::tagging::exclusion::{excluded_by, is_excluded};
//!
//! assert_eq!(excluded_by("turn1search2"), Some("search_citation"));
//! assert_eq!(excluded_by("#3.14"), Some("numeric"));
//! assert!(!is_excluded("tokenizer"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::corruption::is_corrupted;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid URL regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+$").expect("valid email regex"));
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{P}\p{S}]+$").expect("valid punctuation regex"));
static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[\d.]+$").expect("valid numeric regex"));
static SEARCH_CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^turn\d+search\d+$").expect("valid citation regex"));
static ALTERNATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+\d+[a-z]+\d+$").expect("valid alternating regex"));

/// A named candidate-rejection rule.
#[derive(Debug, Clone, Copy)]
pub struct Exclusion {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
}

/// All structural rules, in evaluation order.
pub const EXCLUSIONS: &[Exclusion] = &[
    Exclusion { name: "url", matches: is_url },
    Exclusion { name: "email", matches: is_email },
    Exclusion { name: "punctuation", matches: is_punctuation_only },
    Exclusion { name: "numeric", matches: is_numeric },
    Exclusion { name: "search_citation", matches: is_search_citation },
    Exclusion { name: "alternating_alnum", matches: is_alternating_alnum },
    Exclusion { name: "corrupted", matches: is_corrupted },
];

/// `http://...` or `https://...`.
pub fn is_url(candidate: &str) -> bool {
    URL_RE.is_match(candidate)
}

/// `local@domain` with word characters, dots and dashes.
pub fn is_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Only punctuation and symbol characters.
pub fn is_punctuation_only(candidate: &str) -> bool {
    PUNCTUATION_RE.is_match(candidate)
}

/// Only digits and periods, optionally behind a `#` (`42`, `3.14`, `#1.2`).
pub fn is_numeric(candidate: &str) -> bool {
    NUMERIC_RE.is_match(candidate)
}

/// Synthetic search citation markers such as `turn0search3`.
pub fn is_search_citation(candidate: &str) -> bool {
    SEARCH_CITATION_RE.is_match(candidate)
}

/// Generated identifiers alternating letters and digits (`abc12def34`).
pub fn is_alternating_alnum(candidate: &str) -> bool {
    ALTERNATING_RE.is_match(candidate)
}

/// Name of the first rule rejecting `candidate`, if any.
pub fn excluded_by(candidate: &str) -> Option<&'static str> {
    EXCLUSIONS
        .iter()
        .find(|rule| (rule.matches)(candidate))
        .map(|rule| rule.name)
}

/// Returns `true` if any structural rule rejects `candidate`.
pub fn is_excluded(candidate: &str) -> bool {
    EXCLUSIONS.iter().any(|rule| (rule.matches)(candidate))
}

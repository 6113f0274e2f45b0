//! Frequency-based keyword extraction for mixed Latin/CJK text.
//!
//! The pipeline, in order:
//!
//! 1. strip fenced code blocks and URLs ([`normalize_text`])
//! 2. normalize whitespace and pad sentence punctuation with spaces
//! 3. tokenize once and count noun-like tokens (CJK namespace)
//! 4. count Latin words matched by `[a-zA-Z][a-zA-Z0-9]{2,}` (Latin namespace)
//! 5. title boost: an occurrence that also appears in the title counts 3 times
//! 6. per namespace: drop counts below `min_frequency`, rank by
//!    `(count desc, term asc)`, keep the first `max_keywords`
//! 7. union both lists, then reject short terms, stopwords and anything
//!    matched by the [exclusion rules](super::exclusion)
//!
//! The result is deterministic for identical input.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatmd::Config;
//! use chatmd::tagging::{JiebaAnalyzer, KeywordExtractor};
//!
//! let analyzer = JiebaAnalyzer::new();
//! let config = Config::default().with_min_frequency(2);
//! let extractor = KeywordExtractor::new(&analyzer, &config);
//!
//! let keywords = extractor.extract(
//!     "Rust ownership rules. Ownership moves values. Rust borrows too.",
//!     Some("Rust questions"),
//! );
//! assert!(keywords.contains(&"Rust".to_string()));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::exclusion::excluded_by;
use super::tokenizer::Analyzer;
use crate::config::{Config, KeywordSettings, TitleMatch};

/// Weight of one occurrence of a term that also appears in the title.
pub const TITLE_BOOST: i64 = 3;

static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid code block regex"));
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[\w/:%#$&?()~.=+\-]+").expect("valid URL regex")
});
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SENTENCE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,!?;:])").expect("valid punctuation regex"));
static LATIN_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9]{2,}\b").expect("valid word regex"));

/// Removes fenced code blocks, including their contents.
pub fn strip_code_blocks(text: &str) -> String {
    CODE_BLOCK_RE.replace_all(text, "").into_owned()
}

/// Removes `http(s)://` URLs.
pub fn strip_urls(text: &str) -> String {
    URL_RE.replace_all(text, "").into_owned()
}

/// Prepares raw message text for tokenization.
///
/// ```rust
/// use chatmd::tagging::normalize_text;
///
/// assert_eq!(
///     normalize_text("See\u{3000}https://x.io now,ok\n```rs\nlet a = 1;\n```"),
///     "See now , ok "
/// );
/// ```
pub fn normalize_text(text: &str) -> String {
    let text = strip_code_blocks(text);
    let text = strip_urls(&text);
    let text = text.replace('\u{3000}', " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    SENTENCE_PUNCT_RE.replace_all(&text, " $1 ").into_owned()
}

/// Latin words of `text` (alphabetic start, alphanumeric continuation, 3+ chars).
pub fn latin_words(text: &str) -> impl Iterator<Item = &str> {
    LATIN_WORD_RE.find_iter(text).map(|m| m.as_str())
}

/// Decides whether a term occurs in the conversation title.
enum TitleAnchor<'t> {
    Absent,
    Substring(&'t str),
    Tokens(HashSet<String>),
}

impl TitleAnchor<'_> {
    fn contains(&self, term: &str) -> bool {
        match self {
            TitleAnchor::Absent => false,
            TitleAnchor::Substring(title) => title.contains(term),
            TitleAnchor::Tokens(terms) => terms.contains(term),
        }
    }

    fn weight(&self, term: &str) -> i64 {
        if self.contains(term) { TITLE_BOOST } else { 1 }
    }
}

/// Term → weighted occurrence count.
#[derive(Debug, Default)]
struct FrequencyTable {
    counts: HashMap<String, i64>,
}

impl FrequencyTable {
    fn add(&mut self, term: &str, weight: i64) {
        *self.counts.entry(term.to_string()).or_insert(0) += weight;
    }

    /// Terms with `count >= min_frequency`, ranked by count desc then term
    /// asc, truncated to `max_keywords`.
    fn ranked(self, min_frequency: i64, max_keywords: usize) -> Vec<String> {
        let mut frequent: Vec<(String, i64)> = self
            .counts
            .into_iter()
            .filter(|(_, count)| *count >= min_frequency)
            .collect();
        frequent.sort_by(|(a_term, a_count), (b_term, b_count)| {
            b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
        });
        frequent
            .into_iter()
            .take(max_keywords)
            .map(|(term, _)| term)
            .collect()
    }
}

/// Keyword extractor bound to an analyzer and a configuration.
///
/// Build one per conversation (or per worker) and call
/// [`extract`](Self::extract) for every message; the stopword set is
/// computed once at construction.
pub struct KeywordExtractor<'a, A: Analyzer + ?Sized> {
    analyzer: &'a A,
    settings: &'a KeywordSettings,
    stopwords: HashSet<String>,
}

impl<'a, A: Analyzer + ?Sized> KeywordExtractor<'a, A> {
    pub fn new(analyzer: &'a A, config: &'a Config) -> Self {
        Self {
            analyzer,
            settings: &config.keyword_settings,
            stopwords: config.stopword_set(),
        }
    }

    /// Extracts keywords from `text`, boosting terms found in `title`.
    ///
    /// Returns deduplicated terms, CJK-namespace terms first. Empty text and
    /// analyzer failures both yield an empty list.
    pub fn extract(&self, text: &str, title: Option<&str>) -> Vec<String> {
        let normalized = normalize_text(text);
        if normalized.trim().is_empty() {
            return Vec::new();
        }

        let tokens = match self.analyzer.tokenize(&normalized) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::warn!(
                    analyzer = self.analyzer.name(),
                    error = %err,
                    "tokenization failed, no keywords for this text"
                );
                return Vec::new();
            }
        };

        let anchor = self.title_anchor(title);
        let min_length = self.settings.min_length;

        let mut cjk = FrequencyTable::default();
        for token in tokens {
            if token.surface.trim().is_empty() {
                continue;
            }
            if char_len(&token.surface) >= min_length && token.is_noun() {
                cjk.add(&token.surface, anchor.weight(&token.surface));
            }
        }

        let mut latin = FrequencyTable::default();
        for word in latin_words(&normalized) {
            latin.add(word, anchor.weight(word));
        }

        let min_frequency = self.settings.min_frequency;
        let max_keywords = usize::try_from(self.settings.max_keywords).unwrap_or(0);

        let mut seen = HashSet::new();
        let candidates: Vec<String> = cjk
            .ranked(min_frequency, max_keywords)
            .into_iter()
            .chain(latin.ranked(min_frequency, max_keywords))
            .filter(|term| seen.insert(term.clone()))
            .collect();

        let candidate_count = candidates.len();
        let keywords: Vec<String> = candidates
            .into_iter()
            .filter(|term| self.accepts(term))
            .collect();

        tracing::trace!(
            candidates = candidate_count,
            keywords = keywords.len(),
            "extracted keywords"
        );
        keywords
    }

    /// Applies the length, stopword and structural filters to one candidate.
    pub fn accepts(&self, candidate: &str) -> bool {
        self.rejection_reason(candidate).is_none()
    }

    /// Name of the filter rejecting `candidate`, if any.
    pub fn rejection_reason(&self, candidate: &str) -> Option<&'static str> {
        if char_len(candidate) < self.settings.min_length {
            return Some("min_length");
        }
        if self.stopwords.contains(&candidate.to_lowercase()) {
            return Some("stopword");
        }
        excluded_by(candidate)
    }

    fn title_anchor<'t>(&self, title: Option<&'t str>) -> TitleAnchor<'t> {
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            return TitleAnchor::Absent;
        };

        match self.settings.title_match {
            TitleMatch::Substring => TitleAnchor::Substring(title),
            TitleMatch::Token => {
                let mut terms: HashSet<String> =
                    latin_words(title).map(ToString::to_string).collect();
                if let Ok(tokens) = self.analyzer.tokenize(title) {
                    terms.extend(tokens.map(|t| t.surface));
                }
                TitleAnchor::Tokens(terms)
            }
        }
    }
}

fn char_len(text: &str) -> i64 {
    text.chars().count() as i64
}

/// Extracts keywords from `text` with a one-off extractor.
pub fn extract_keywords<A: Analyzer + ?Sized>(
    analyzer: &A,
    text: &str,
    config: &Config,
    title: Option<&str>,
) -> Vec<String> {
    KeywordExtractor::new(analyzer, config).extract(text, title)
}

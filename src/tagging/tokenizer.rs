//! Morphological analyzer adapter.
//!
//! The keyword extractor only needs two things from an analyzer: the surface
//! form of each token and a coarse part-of-speech category. [`Analyzer`] is
//! that contract; [`JiebaAnalyzer`] implements it with `jieba-rs`, and the
//! `japanese` feature adds a lindera-backed analyzer for Japanese.
//!
//! Analyzers are plain owned values. Create one per run (or per worker) and
//! pass it by reference; nothing here is global.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatmd::tagging::{Analyzer, JiebaAnalyzer};
//!
//! let analyzer = JiebaAnalyzer::new();
//! for token in analyzer.tokenize("我们在学习自然语言处理")? {
//!     println!("{}\t{}", token.surface, token.tag);
//! }
//! # Ok::<(), chatmd::ChatmdError>(())
//! ```

use jieba_rs::Jieba;

use crate::error::Result;

/// Coarse part-of-speech category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    /// Dictionary noun of any subclass.
    Noun,
    /// Out-of-vocabulary word: proper names, coinages, slang, loanwords.
    Unknown,
    /// Everything else (verbs, particles, numerals, punctuation, ...).
    Other,
}

impl PartOfSpeech {
    /// Maps a jieba POS tag (ICTCLAS style) to a coarse category.
    ///
    /// jieba tags whitespace and punctuation `x` as well, so an `x` token is
    /// only an unknown word when its surface contains a letter or ideograph.
    pub fn from_jieba_tag(tag: &str, surface: &str) -> Self {
        if tag.starts_with('n') {
            PartOfSpeech::Noun
        } else if matches!(tag, "x" | "eng" | "un") && has_word_char(surface) {
            PartOfSpeech::Unknown
        } else {
            PartOfSpeech::Other
        }
    }

    /// Maps the top-level IPADIC part of speech (`名詞`, `動詞`, ...) to a
    /// coarse category. `UNK` marks a word missing from the dictionary.
    pub fn from_ipadic(pos: &str, surface: &str) -> Self {
        match pos {
            "名詞" => PartOfSpeech::Noun,
            "未知語" | "UNK" if has_word_char(surface) => PartOfSpeech::Unknown,
            _ => PartOfSpeech::Other,
        }
    }
}

/// Returns `true` if `text` contains at least one letter, digit or ideograph.
pub(crate) fn has_word_char(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// One analyzed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The literal text span of the token.
    pub surface: String,
    /// Analyzer-specific fine-grained tag.
    pub tag: String,
    pub part_of_speech: PartOfSpeech,
}

impl Token {
    pub fn new(
        surface: impl Into<String>,
        tag: impl Into<String>,
        part_of_speech: PartOfSpeech,
    ) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
            part_of_speech,
        }
    }

    /// Nouns and unknown words both count as nouns.
    ///
    /// Treating unknown words as nouns keeps neologisms and names in play;
    /// the frequency floor and stopword filters deal with the extra noise.
    pub fn is_noun(&self) -> bool {
        matches!(
            self.part_of_speech,
            PartOfSpeech::Noun | PartOfSpeech::Unknown
        )
    }

    /// Length of the surface form in characters.
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}

/// One-shot token sequence. Call [`Analyzer::tokenize`] again for a fresh one.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// A morphological analyzer producing surface/part-of-speech pairs.
pub trait Analyzer: Send + Sync {
    /// Human-readable analyzer name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Segments `text` into tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ChatmdError::Tokenizer`](crate::ChatmdError::Tokenizer) when
    /// the analyzer cannot process the text.
    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>>;
}

/// Returns `true` if the first token of `word` is noun-like.
///
/// Analyzer failures and empty input count as "not a noun".
pub fn is_noun<A: Analyzer + ?Sized>(analyzer: &A, word: &str) -> bool {
    analyzer
        .tokenize(word)
        .ok()
        .and_then(|mut tokens| tokens.next())
        .is_some_and(|token| token.is_noun())
}

/// [`Analyzer`] backed by the jieba segmenter with HMM-based
/// out-of-vocabulary detection.
///
/// jieba emits kana one character at a time, so adjacent katakana
/// characters are merged back into a single unknown-word token. That keeps
/// loanwords such as `データベース` intact.
pub struct JiebaAnalyzer {
    jieba: Jieba,
    hmm: bool,
}

impl JiebaAnalyzer {
    /// Loads the bundled dictionary.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            hmm: true,
        }
    }

    /// Wraps an already configured segmenter (e.g. with a user dictionary).
    pub fn with_jieba(jieba: Jieba) -> Self {
        Self { jieba, hmm: true }
    }

    /// Enables or disables HMM discovery of unknown words.
    #[must_use]
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }
}

impl Default for JiebaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JiebaAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiebaAnalyzer")
            .field("hmm", &self.hmm)
            .finish_non_exhaustive()
    }
}

impl Analyzer for JiebaAnalyzer {
    fn name(&self) -> &'static str {
        "jieba"
    }

    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        let tokens = self.jieba.tag(text, self.hmm).into_iter().map(|tag| {
            Token::new(
                tag.word,
                tag.tag,
                PartOfSpeech::from_jieba_tag(tag.tag, tag.word),
            )
        });
        Ok(Box::new(merge_katakana_runs(tokens).into_iter()))
    }
}

fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{FF66}'..='\u{FF9F}')
}

fn is_katakana_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_katakana)
}

/// Joins consecutive katakana-only tokens into one [`PartOfSpeech::Unknown`] token.
fn merge_katakana_runs(tokens: impl Iterator<Item = Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::new();
    let mut run = String::new();

    let flush = |run: &mut String, merged: &mut Vec<Token>| {
        if !run.is_empty() {
            merged.push(Token::new(
                std::mem::take(run),
                "x",
                PartOfSpeech::Unknown,
            ));
        }
    };

    for token in tokens {
        if is_katakana_word(&token.surface) {
            run.push_str(&token.surface);
        } else {
            flush(&mut run, &mut merged);
            merged.push(token);
        }
    }
    flush(&mut run, &mut merged);

    merged
}

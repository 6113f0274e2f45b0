//! Japanese [`Analyzer`] backed by lindera.
//!
//! jieba segments kana one character at a time, so Japanese nouns written
//! with hiragana never survive the length filter. [`LinderaAnalyzer`] runs a
//! real Japanese morphological analysis against an IPADIC-format dictionary.
//!
//! The dictionary is chosen at runtime:
//!
//! ```rust,no_run
//! use chatmd::tagging::{Analyzer, LinderaAnalyzer};
//!
//! // A compiled lindera dictionary on disk
//! let analyzer = LinderaAnalyzer::from_uri("/usr/share/lindera/ipadic")?;
//! for token in analyzer.tokenize("おにぎりを食べる")? {
//!     println!("{}\t{}", token.surface, token.tag);
//! }
//! # Ok::<(), chatmd::ChatmdError>(())
//! ```
//!
//! With the `japanese-ipadic` feature the dictionary is embedded in the
//! binary and [`LinderaAnalyzer::ipadic`] needs no files.

use std::borrow::Cow;

use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;

use super::tokenizer::{Analyzer, PartOfSpeech, Token, TokenStream};
use crate::error::{ChatmdError, Result};

const NAME: &str = "lindera";

/// Embedded IPADIC, available with the `japanese-ipadic` feature.
pub const EMBEDDED_IPADIC: &str = "embedded://ipadic";

/// [`Analyzer`] for Japanese text using lindera in normal mode.
///
/// Whitespace is dropped by the segmenter. Words missing from the
/// dictionary are reported as [`PartOfSpeech::Unknown`].
pub struct LinderaAnalyzer {
    segmenter: Segmenter,
}

impl LinderaAnalyzer {
    /// Loads a dictionary from a filesystem path, a `file://` URI or an
    /// `embedded://` URI.
    ///
    /// # Errors
    ///
    /// Returns [`ChatmdError::Tokenizer`] if the dictionary cannot be loaded.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let dictionary = load_dictionary(uri)
            .map_err(|err| ChatmdError::tokenizer(NAME, format!("{uri}: {err}")))?;
        tracing::debug!(dictionary = uri, "loaded lindera dictionary");
        Ok(Self {
            segmenter: Segmenter::new(Mode::Normal, dictionary, None),
        })
    }

    /// Uses the IPADIC dictionary compiled into the binary.
    #[cfg(feature = "japanese-ipadic")]
    pub fn ipadic() -> Result<Self> {
        Self::from_uri(EMBEDDED_IPADIC)
    }
}

impl std::fmt::Debug for LinderaAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinderaAnalyzer").finish_non_exhaustive()
    }
}

impl Analyzer for LinderaAnalyzer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        let segments = self
            .segmenter
            .segment(Cow::Borrowed(text))
            .map_err(|err| ChatmdError::tokenizer(NAME, err.to_string()))?;
        Ok(Box::new(segments.into_iter().map(to_token)))
    }
}

/// Converts a lindera token; the tag keeps the first two IPADIC fields.
fn to_token(mut segment: lindera::token::Token<'_>) -> Token {
    let surface = segment.surface.to_string();
    let unknown = segment.word_id.is_unknown();

    let details = segment.details();
    let tag = details.iter().take(2).copied().collect::<Vec<_>>().join(",");
    let pos = if unknown {
        "UNK"
    } else {
        details.first().copied().unwrap_or("UNK")
    };
    let part_of_speech = PartOfSpeech::from_ipadic(pos, &surface);

    Token::new(surface, tag, part_of_speech)
}

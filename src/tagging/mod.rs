//! Keyword and tag extraction.
//!
//! - [`corruption`] - detection of mis-decoded text
//! - [`tokenizer`] - the [`Analyzer`] contract and the jieba-backed [`JiebaAnalyzer`]
//! - `japanese` - lindera-backed `LinderaAnalyzer` (feature `japanese`)
//! - [`exclusion`] - structural rejection rules for keyword candidates
//! - [`keywords`] - frequency-based [`KeywordExtractor`]
//! - [`assembler`] - conversation-level [`assemble_tags`]

pub mod assembler;
pub mod corruption;
pub mod exclusion;
#[cfg(feature = "japanese")]
pub mod japanese;
pub mod keywords;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{LANGUAGE_TAG_PREFIX, assemble_tags, custom_tags, language_tags};
pub use corruption::{is_corrupted, is_corrupted_char};
pub use exclusion::{EXCLUSIONS, Exclusion, excluded_by, is_excluded};
#[cfg(feature = "japanese")]
pub use japanese::{EMBEDDED_IPADIC, LinderaAnalyzer};
pub use keywords::{KeywordExtractor, TITLE_BOOST, extract_keywords, latin_words, normalize_text};
pub use tokenizer::{Analyzer, JiebaAnalyzer, PartOfSpeech, Token, TokenStream, is_noun};

use crate::error::Result;

/// Picks the analyzer for a run.
///
/// A `dictionary` selects lindera with that dictionary. Without one, the
/// embedded IPADIC is used when the `japanese-ipadic` feature is on and
/// jieba otherwise.
///
/// # Errors
///
/// Returns [`ChatmdError::Tokenizer`](crate::ChatmdError::Tokenizer) if the
/// dictionary cannot be loaded, or a dictionary is given but the crate was
/// built without the `japanese` feature.
pub fn select_analyzer(dictionary: Option<&str>) -> Result<Box<dyn Analyzer>> {
    match dictionary {
        #[cfg(feature = "japanese")]
        Some(uri) => Ok(Box::new(LinderaAnalyzer::from_uri(uri)?)),
        #[cfg(not(feature = "japanese"))]
        Some(_) => Err(crate::ChatmdError::tokenizer(
            "lindera",
            "dictionaries need the `japanese` feature",
        )),
        #[cfg(feature = "japanese-ipadic")]
        None => Ok(Box::new(LinderaAnalyzer::ipadic()?)),
        #[cfg(not(feature = "japanese-ipadic"))]
        None => Ok(Box::new(JiebaAnalyzer::new())),
    }
}

//! Deterministic analyzers for unit tests.

use super::tokenizer::{Analyzer, PartOfSpeech, Token, TokenStream};
use crate::error::{ChatmdError, Result};

/// Splits on whitespace and tags every token as a noun.
pub struct WhitespaceAnalyzer;

impl Analyzer for WhitespaceAnalyzer {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        Ok(Box::new(
            text.split_whitespace()
                .map(|word| Token::new(word, "n", PartOfSpeech::Noun)),
        ))
    }
}

/// Fails on every call.
pub struct FailingAnalyzer;

impl Analyzer for FailingAnalyzer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn tokenize<'a>(&'a self, _text: &'a str) -> Result<TokenStream<'a>> {
        Err(ChatmdError::tokenizer(self.name(), "forced failure"))
    }
}

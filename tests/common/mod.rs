//! Shared helpers for integration tests.

#![allow(dead_code)]

use chatmd::error::{ChatmdError, Result};
use chatmd::tagging::{Analyzer, PartOfSpeech, Token, TokenStream};

/// Deterministic analyzer: whitespace split, every token a noun.
///
/// With `failing()` every call returns a tokenizer error instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeAnalyzer {
    fail: bool,
}

impl FakeAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Analyzer for FakeAnalyzer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn tokenize<'a>(&'a self, text: &'a str) -> Result<TokenStream<'a>> {
        if self.fail {
            return Err(ChatmdError::tokenizer(self.name(), "forced failure"));
        }
        Ok(Box::new(
            text.split_whitespace()
                .map(|word| Token::new(word, "n", PartOfSpeech::Noun)),
        ))
    }
}

/// Builds a `conversations.json` entry from `(role, text, create_time)` turns.
pub fn conversation_json(title: Option<&str>, create_time: f64, turns: &[(&str, &str, f64)]) -> serde_json::Value {
    let mapping: serde_json::Map<String, serde_json::Value> = turns
        .iter()
        .enumerate()
        .map(|(i, (role, text, time))| {
            (
                format!("node-{i}"),
                serde_json::json!({
                    "message": {
                        "author": {"role": role},
                        "content": {"content_type": "text", "parts": [text]},
                        "create_time": time
                    },
                    "children": []
                }),
            )
        })
        .collect();

    serde_json::json!({
        "title": title,
        "create_time": create_time,
        "update_time": create_time + 600.0,
        "mapping": mapping
    })
}

/// Serializes conversation entries into an export document.
pub fn export_json(conversations: &[serde_json::Value]) -> String {
    serde_json::to_string_pretty(conversations).unwrap()
}

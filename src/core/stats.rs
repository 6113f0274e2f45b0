//! Per-conversation statistics: counts, duration, code blocks and links.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::message::Message;

/// Language reported for fences without an annotation.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w*)\n(.*?)```").expect("valid code block regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));

/// A fenced code block found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub language: String,
    /// Length of the block body in characters.
    pub length: usize,
}

/// A Markdown inline link found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// Summary figures shown in the statistics sections of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    pub total_chars: usize,
    /// Seconds between the first and the last message.
    pub duration_seconds: f64,
    pub code_blocks: Vec<CodeBlock>,
    pub links: Vec<Link>,
}

impl ConversationStats {
    /// Computes statistics over time-ordered messages.
    ///
    /// An empty slice yields all-zero statistics.
    ///
    /// ```rust
    /// use chatmd::core::ConversationStats;
    /// use chatmd::{Message, Role};
    ///
    /// let messages = vec![
    ///     Message::new(Role::User, "see [docs](https://docs.rs)").with_create_time(0.0),
    ///     Message::new(Role::Assistant, "```rust\nfn f() {}\n```").with_create_time(5400.0),
    /// ];
    /// let stats = ConversationStats::from_messages(&messages);
    /// assert_eq!(stats.total_messages, 2);
    /// assert_eq!(stats.links[0].url, "https://docs.rs");
    /// assert_eq!(stats.code_blocks[0].language, "rust");
    /// assert_eq!(stats.duration_hours(), 1.5);
    /// ```
    pub fn from_messages(messages: &[Message]) -> Self {
        let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
            return Self::default();
        };

        Self {
            total_messages: messages.len(),
            total_chars: messages.iter().map(Message::length).sum(),
            duration_seconds: last.create_time - first.create_time,
            code_blocks: messages.iter().flat_map(|m| code_blocks(&m.text)).collect(),
            links: messages.iter().flat_map(|m| links(&m.text)).collect(),
        }
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_seconds / 3600.0
    }
}

/// Fenced code blocks of `text`, in order of appearance.
pub fn code_blocks(text: &str) -> Vec<CodeBlock> {
    CODE_BLOCK_RE
        .captures_iter(text)
        .map(|caps| {
            let language = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|lang| !lang.is_empty())
                .unwrap_or(DEFAULT_CODE_LANGUAGE);
            let body = caps.get(2).map_or("", |m| m.as_str());
            CodeBlock {
                language: language.to_string(),
                length: body.chars().count(),
            }
        })
        .collect()
}

/// `[text](url)` links of `text`, in order of appearance.
pub fn links(text: &str) -> Vec<Link> {
    LINK_RE
        .captures_iter(text)
        .map(|caps| Link {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

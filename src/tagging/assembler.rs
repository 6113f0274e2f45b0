//! Conversation-level tag assembly.
//!
//! Three independent sources feed the tag set, each behind its own feature
//! flag:
//!
//! - `lang:<name>` for every fenced code block annotation (`plaintext` and
//!   empty annotations are ignored)
//! - keywords extracted from every message, boosted by the derived title
//! - custom tags whose trigger phrases appear in any message
//!
//! The result is a [`BTreeSet`], so tags come out deduplicated and sorted.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::keywords::KeywordExtractor;
use super::tokenizer::Analyzer;
use crate::config::Config;
use crate::message::{Message, derive_title};

/// Prefix of tags derived from code block languages.
pub const LANGUAGE_TAG_PREFIX: &str = "lang:";

/// Annotation treated as "no language".
const PLAINTEXT: &str = "plaintext";

static FENCE_LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(\w*)\n").expect("valid fence regex"));

/// Language tags (`lang:python`, ...) for the fenced blocks in `text`.
pub fn language_tags(text: &str) -> impl Iterator<Item = String> + '_ {
    FENCE_LANGUAGE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|lang| lang.as_str())
        .filter(|lang| !lang.is_empty() && *lang != PLAINTEXT)
        .map(|lang| format!("{LANGUAGE_TAG_PREFIX}{lang}"))
}

/// Names of the custom tags triggered by at least one message.
///
/// Matching is a case-insensitive substring test.
pub fn custom_tags<'c>(messages: &[Message], config: &'c Config) -> Vec<&'c str> {
    let lowered: Vec<String> = messages.iter().map(|m| m.text.to_lowercase()).collect();

    config
        .custom_tags
        .iter()
        .filter(|(_, triggers)| {
            triggers.iter().any(|trigger| {
                let trigger = trigger.to_lowercase();
                lowered.iter().any(|text| text.contains(&trigger))
            })
        })
        .map(|(tag, _)| tag.as_str())
        .collect()
}

/// Builds the sorted, deduplicated tag set of a conversation.
///
/// # Example
///
/// ```rust,no_run
/// use chatmd::{Config, Message, Role};
/// use chatmd::tagging::{JiebaAnalyzer, assemble_tags};
///
/// let messages = vec![
///     Message::new(Role::User, "How do I fix this error?"),
///     Message::new(Role::Assistant, "```python\nprint(1)\n```"),
/// ];
/// let tags = assemble_tags(&messages, &Config::default(), &JiebaAnalyzer::new());
/// assert!(tags.contains("lang:python"));
/// assert!(tags.contains("error"));
/// ```
pub fn assemble_tags<A: Analyzer + ?Sized>(
    messages: &[Message],
    config: &Config,
    analyzer: &A,
) -> BTreeSet<String> {
    let features = &config.features;
    let mut tags = BTreeSet::new();

    if features.use_language_tags {
        for message in messages {
            tags.extend(language_tags(&message.text));
        }
    }

    if features.use_keyword_tags {
        let title = derive_title(messages);
        let extractor = KeywordExtractor::new(analyzer, config);
        for message in messages {
            tags.extend(extractor.extract(&message.text, title.as_deref()));
        }
    }

    if features.use_custom_tags {
        tags.extend(custom_tags(messages, config).into_iter().map(String::from));
    }

    tracing::debug!(count = tags.len(), "assembled tags");
    tags
}

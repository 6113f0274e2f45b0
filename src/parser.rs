//! Parser for ChatGPT `conversations.json` exports.
//!
//! # Example
//!
//! ```rust
//! use chatmd::parser::ChatGptParser;
//!
//! let export = r#"[{
//!     "title": "Greeting",
//!     "create_time": 1700000000,
//!     "mapping": {
//!         "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["Hi"]}, "create_time": 1700000001}},
//!         "b": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["Hello!"]}, "create_time": 1700000002}}
//!     }
//! }]"#;
//!
//! let conversations = ChatGptParser::new().parse_str(export)?;
//! assert_eq!(conversations.len(), 1);
//! assert_eq!(conversations[0].messages.len(), 2);
//! # Ok::<(), chatmd::ChatmdError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChatmdError, ParseErrorKind, Result};
use crate::message::Conversation;
use crate::parsing::{RawConversation, parse_conversation};

const FORMAT: &str = "ChatGPT JSON";

/// Parser for ChatGPT JSON exports.
#[derive(Debug, Clone)]
pub struct ChatGptParser {
    skip_invalid: bool,
}

impl Default for ChatGptParser {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}

impl ChatGptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether malformed conversation entries are skipped (default) or
    /// turned into an error.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    pub fn name(&self) -> &'static str {
        "ChatGPT"
    }

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatmdError`] if:
    /// - File cannot be read ([`ChatmdError::Io`])
    /// - Content is not JSON ([`ChatmdError::Parse`])
    /// - The top-level value is not an array ([`ChatmdError::InvalidFormat`])
    pub fn parse(&self, path: &Path) -> Result<Vec<Conversation>> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content).map_err(|err| match err {
            ChatmdError::Parse { format, source, .. } => ChatmdError::Parse {
                format,
                source,
                path: Some(path.to_path_buf()),
            },
            other => other,
        })
    }

    /// Parses export content already in memory.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Conversation>> {
        let root: Value =
            serde_json::from_str(content).map_err(|e| ChatmdError::export_parse(e, None))?;

        let Value::Array(entries) = root else {
            return Err(ChatmdError::invalid_format(
                FORMAT,
                "expected a top-level array of conversations",
            ));
        };

        let mut conversations = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match RawConversation::deserialize(entry) {
                Ok(raw) => conversations.push(parse_conversation(raw)),
                Err(err) if self.skip_invalid => {
                    tracing::warn!(index, error = %err, "skipping malformed conversation");
                }
                Err(err) => {
                    return Err(ChatmdError::Parse {
                        format: FORMAT,
                        source: ParseErrorKind::Other(format!("conversation #{index}: {err}")),
                        path: None,
                    });
                }
            }
        }

        Ok(conversations)
    }
}

/// Parses export content with the default (lenient) parser.
pub fn parse_export(content: &str) -> Result<Vec<Conversation>> {
    ChatGptParser::new().parse_str(content)
}

/// Parses an export file with the default (lenient) parser.
pub fn parse_export_file(path: impl AsRef<Path>) -> Result<Vec<Conversation>> {
    ChatGptParser::new().parse(path.as_ref())
}

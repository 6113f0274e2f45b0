//! Conversation and message types.
//!
//! A ChatGPT export is flattened into [`Conversation`]s, each holding an
//! ordered list of [`Message`]s. Only `user` and `assistant` turns survive
//! flattening; system and tool nodes are dropped.
//!
//! # Examples
//!
//! ```
//! use chatmd::{Message, Role};
//!
//! let msg = Message::new(Role::User, "What is a function?").with_create_time(1_700_000_000.0);
//! assert_eq!(msg.role(), Role::User);
//! assert_eq!(msg.length(), 19);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatmd::{Message, Role};
//!
//! let msg = Message::new(Role::Assistant, "Hello!");
//! let json = serde_json::to_string(&msg)?;
//! assert!(json.contains(r#""role":"assistant""#));
//!
//! let parsed: Message = serde_json::from_str(&json)?;
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// Title used when neither the export nor the first prompt provides one.
pub const UNTITLED: &str = "Untitled Conversation";

/// Number of characters of the first prompt used as a derived title.
pub const DERIVED_TITLE_CHARS: usize = 50;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A prompt written by the user.
    User,
    /// A response from the model.
    Assistant,
}

impl Role {
    /// Parses an export `author.role` value. Other roles (`system`, `tool`) yield `None`.
    pub fn from_export(role: &str) -> Option<Self> {
        match role {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    /// Display label used in rendered metadata lines.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single flattened conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the turn.
    pub role: Role,

    /// Raw Markdown text of the turn.
    pub text: String,

    /// Unix seconds; `0.0` when the export had no timestamp.
    #[serde(default)]
    pub create_time: f64,

    /// Length of `text` in characters.
    pub length: usize,
}

impl Message {
    /// Creates a message with no timestamp.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            role,
            text,
            create_time: 0.0,
            length,
        }
    }

    /// Builder method to set the creation time (unix seconds).
    #[must_use]
    pub fn with_create_time(mut self, create_time: f64) -> Self {
        self.create_time = create_time;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn create_time(&self) -> f64 {
        self.create_time
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns `true` for user prompts.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// A flattened conversation, messages ordered by `create_time`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Title from the export, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Unix seconds.
    #[serde(default)]
    pub create_time: f64,

    /// Unix seconds.
    #[serde(default)]
    pub update_time: f64,

    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_times(mut self, create_time: f64, update_time: f64) -> Self {
        self.create_time = create_time;
        self.update_time = update_time;
        self
    }

    /// The title derived from the first user prompt, if there is one.
    pub fn derived_title(&self) -> Option<String> {
        derive_title(&self.messages)
    }

    /// The export title, else the derived title, else [`UNTITLED`].
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .or_else(|| self.derived_title().filter(|t| !t.is_empty()))
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Derives a title from the first user message: its first 50 characters,
/// trimmed, with `#`, `*` and `_` removed.
pub fn derive_title(messages: &[Message]) -> Option<String> {
    let first = messages.iter().find(|m| m.is_user())?;
    let head: String = first.text.chars().take(DERIVED_TITLE_CHARS).collect();
    let stripped: String = head
        .trim()
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '_'))
        .collect();
    Some(stripped.trim().to_string())
}

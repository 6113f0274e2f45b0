//! Markdown document rendering.
//!
//! A document is laid out as:
//!
//! ```text
//! # <title>
//!
//! ### Tags                          (show_tags, at least one tag)
//! **User:** / **Created:** / **Updated:** / **Exported:**
//! ### Conversation Statistics       (show_statistics)
//! ### Code Blocks                   (show_code_blocks, at least one block)
//! ### Links                         (show_links, at least one link)
//! ## Table of Contents              (show_toc, messages >= toc_threshold)
//! ## Prompt: / ## Response:         (one section per message)
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, Local};

use super::stats::ConversationStats;
use super::timestamp::{DISPLAY_FORMAT, format_filename_timestamp, format_timestamp};
use crate::config::Config;
use crate::message::{Conversation, Message, Role};

/// Maximum characters of the title kept in a file name.
pub const FILENAME_TITLE_CHARS: usize = 50;

/// Maximum characters of a prompt's first line shown in the table of contents.
pub const TOC_ENTRY_CHARS: usize = 50;

/// Renders conversations to Markdown.
///
/// The export instant printed in the `**Exported:**` line defaults to the
/// construction time; tests pin it with [`with_exported_at`](Self::with_exported_at).
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeSet;
/// use chatmd::core::MarkdownRenderer;
/// use chatmd::{Config, Conversation, Message, Role};
///
/// let config = Config::default();
/// let conversation = Conversation::new(vec![
///     Message::new(Role::User, "Hi"),
///     Message::new(Role::Assistant, "Hello!"),
/// ])
/// .with_title("Greeting");
///
/// let tags = BTreeSet::from(["rust".to_string()]);
/// let markdown = MarkdownRenderer::new(&config).render(&conversation, &tags);
/// assert!(markdown.starts_with("# Greeting\n\n### Tags\n\n#rust\n\n"));
/// assert!(markdown.contains("## Response:\n"));
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownRenderer<'a> {
    config: &'a Config,
    exported_at: DateTime<Local>,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            exported_at: Local::now(),
        }
    }

    /// Pins the instant printed as the export time.
    #[must_use]
    pub fn with_exported_at(mut self, exported_at: DateTime<Local>) -> Self {
        self.exported_at = exported_at;
        self
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Renders one conversation with its precomputed tags.
    pub fn render(&self, conversation: &Conversation, tags: &BTreeSet<String>) -> String {
        let features = &self.config.features;
        let messages = &conversation.messages;
        let stats = ConversationStats::from_messages(messages);

        let mut markdown = format!("# {}\n\n", conversation.display_title());

        if features.show_tags && !tags.is_empty() {
            markdown.push_str("### Tags\n\n");
            let line: Vec<String> = tags.iter().map(|tag| format!("#{tag}")).collect();
            markdown.push_str(&line.join(" "));
            markdown.push_str("\n\n");
        }

        markdown.push_str(&self.header(conversation));

        if features.show_statistics {
            markdown.push_str(&render_statistics(&stats));
        }

        if features.show_code_blocks && !stats.code_blocks.is_empty() {
            markdown.push_str("### Code Blocks\n\n");
            for block in &stats.code_blocks {
                markdown.push_str(&format!("- {}: {} characters\n", block.language, block.length));
            }
            markdown.push('\n');
        }

        if features.show_links && !stats.links.is_empty() {
            markdown.push_str("### Links\n\n");
            for link in &stats.links {
                markdown.push_str(&format!("- [{}]({})\n", link.text, link.url));
            }
            markdown.push('\n');
        }

        let toc_threshold = usize::try_from(features.toc_threshold).unwrap_or(0);
        if features.show_toc && messages.len() >= toc_threshold {
            markdown.push_str(&render_toc(messages));
        }

        for (index, message) in messages.iter().enumerate() {
            markdown.push_str(&self.render_message(message, index + 1));
        }

        markdown
    }

    /// User, created, updated and exported lines (Markdown hard breaks).
    fn header(&self, conversation: &Conversation) -> String {
        let config = self.config;
        let mut header = if config.user_email.is_empty() {
            format!("**User:** {}  \n", config.user_name)
        } else {
            format!("**User:** {} ({})  \n", config.user_name, config.user_email)
        };
        header.push_str(&format!(
            "**Created:** {}  \n",
            format_timestamp(conversation.create_time)
        ));
        header.push_str(&format!(
            "**Updated:** {}  \n",
            format_timestamp(conversation.update_time)
        ));
        header.push_str(&format!(
            "**Exported:** {}  \n\n",
            self.exported_at.format(DISPLAY_FORMAT)
        ));
        header
    }

    fn render_message(&self, message: &Message, section: usize) -> String {
        let features = &self.config.features;

        let mut rendered = match message.role {
            Role::User => format!("## <a id='section-{section}'></a>Prompt:\n"),
            Role::Assistant => "## Response:\n".to_string(),
        };

        if features.show_message_metadata {
            let mut parts = vec![message.role.label().to_string()];
            if features.show_timestamps {
                parts.push(format_timestamp(message.create_time));
            }
            if features.show_message_length {
                parts.push(format!("{} characters", message.length));
            }
            rendered.push_str(&format!("*{}*\n\n", parts.join(" • ")));
        }

        rendered.push_str(&message.text);
        rendered.push_str("\n\n");
        rendered
    }
}

fn render_statistics(stats: &ConversationStats) -> String {
    format!(
        "### Conversation Statistics\n\n\
         - Total Messages: {}\n\
         - Total Characters: {}\n\
         - Duration: {:.1} hours\n\n",
        stats.total_messages,
        stats.total_chars,
        stats.duration_hours()
    )
}

/// Numbered links to every user prompt; numbers are message positions.
fn render_toc(messages: &[Message]) -> String {
    let mut toc = "## Table of Contents\n\n".to_string();
    for (index, message) in messages.iter().enumerate() {
        if message.is_user() {
            let section = index + 1;
            let first_line = message.text.split('\n').next().unwrap_or_default();
            let entry: String = first_line.chars().take(TOC_ENTRY_CHARS).collect();
            toc.push_str(&format!("{section}. [{}](#section-{section})\n", entry.trim()));
        }
    }
    toc.push('\n');
    toc
}

/// Builds `ChatGPT-<title>-<YYYYMMDD_HHMMSS>.md`.
///
/// The title keeps only alphanumerics, `_`, `-` and `.`, truncated to 50
/// characters; the timestamp is the creation time in local time.
///
/// ```rust
/// use chatmd::core::generate_filename;
///
/// let name = generate_filename("Rust: what is 'borrowing'?", 0.0);
/// assert!(name.starts_with("ChatGPT-Rustwhatisborrowing-"));
/// assert!(name.ends_with(".md"));
/// ```
pub fn generate_filename(title: &str, create_time: f64) -> String {
    let safe_title: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .take(FILENAME_TITLE_CHARS)
        .collect();
    format!(
        "ChatGPT-{safe_title}-{}.md",
        format_filename_timestamp(create_time)
    )
}

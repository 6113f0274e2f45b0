//! Conversion pipeline: tag, render and write each conversation.
//!
//! Every conversation is handled in isolation. Tagging failures degrade to
//! fewer tags and a failed write only marks that conversation as failed in
//! the returned [`ProcessingStats`]; the batch always runs to the end.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::filter::ConversationFilter;
use super::render::{MarkdownRenderer, generate_filename};
use crate::config::Config;
use crate::error::{ChatmdError, Result};
use crate::message::Conversation;
use crate::parser::ChatGptParser;
use crate::tagging::{Analyzer, assemble_tags};

/// A conversation converted to a Markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedConversation {
    /// Output file name (no directory).
    pub filename: String,
    pub markdown: String,
    pub tags: BTreeSet<String>,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    /// Conversations found in the export.
    pub total: usize,
    /// Conversations rejected by the filter.
    pub skipped: usize,
    /// Files written, in export order.
    pub written: Vec<PathBuf>,
    /// Export index and error message of every conversation that failed.
    pub failed: Vec<(usize, String)>,
}

impl ProcessingStats {
    /// Number of files written.
    pub fn converted(&self) -> usize {
        self.written.len()
    }

    /// Returns `true` if no conversation failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Tags and renders one conversation.
///
/// # Example
///
/// ```rust,no_run
/// use chatmd::core::{MarkdownRenderer, convert_conversation};
/// use chatmd::tagging::JiebaAnalyzer;
/// use chatmd::{Config, Conversation, Message, Role};
///
/// let config = Config::default();
/// let renderer = MarkdownRenderer::new(&config);
/// let conversation = Conversation::new(vec![Message::new(Role::User, "Hello")]);
///
/// let rendered = convert_conversation(&conversation, &renderer, &JiebaAnalyzer::new());
/// assert!(rendered.filename.starts_with("ChatGPT-Hello-"));
/// ```
pub fn convert_conversation<A: Analyzer + ?Sized>(
    conversation: &Conversation,
    renderer: &MarkdownRenderer<'_>,
    analyzer: &A,
) -> RenderedConversation {
    let tags = assemble_tags(&conversation.messages, renderer.config(), analyzer);
    let markdown = renderer.render(conversation, &tags);
    let filename = generate_filename(&conversation.display_title(), conversation.create_time);

    RenderedConversation {
        filename,
        markdown,
        tags,
    }
}

/// Converts already parsed conversations and writes one file each into
/// `output_dir`, creating it if needed.
///
/// Files with the same name overwrite each other.
///
/// # Errors
///
/// Fails only when `output_dir` cannot be created. A conversation that
/// cannot be written is reported in [`ProcessingStats::failed`].
pub fn write_conversations<A: Analyzer + ?Sized>(
    conversations: &[Conversation],
    output_dir: &Path,
    renderer: &MarkdownRenderer<'_>,
    analyzer: &A,
    filter: &ConversationFilter,
) -> Result<ProcessingStats> {
    fs::create_dir_all(output_dir).map_err(|source| ChatmdError::write(output_dir, source))?;

    let mut stats = ProcessingStats {
        total: conversations.len(),
        ..ProcessingStats::default()
    };

    for (index, conversation) in conversations.iter().enumerate() {
        if !filter.matches(conversation) {
            stats.skipped += 1;
            continue;
        }

        let rendered = convert_conversation(conversation, renderer, analyzer);
        let path = output_dir.join(&rendered.filename);

        match fs::write(&path, rendered.markdown) {
            Ok(()) => {
                tracing::info!(path = %path.display(), tags = rendered.tags.len(), "created");
                stats.written.push(path);
            }
            Err(source) => {
                let err = ChatmdError::write(&path, source);
                tracing::warn!(index, error = %err, "conversation not written");
                stats.failed.push((index, err.to_string()));
            }
        }
    }

    Ok(stats)
}

/// Runs the whole pipeline on an export file.
///
/// # Errors
///
/// Fails only when the export cannot be read or parsed, or the output
/// directory cannot be created. Per-conversation failures are reported in
/// [`ProcessingStats::failed`].
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use chatmd::Config;
/// use chatmd::core::{ConversationFilter, process_export};
/// use chatmd::tagging::JiebaAnalyzer;
///
/// let stats = process_export(
///     Path::new("conversations.json"),
///     Path::new("output"),
///     &Config::load("config.json"),
///     &JiebaAnalyzer::new(),
///     &ConversationFilter::new(),
/// )?;
/// println!("{} files written", stats.converted());
/// # Ok::<(), chatmd::ChatmdError>(())
/// ```
pub fn process_export<A: Analyzer + ?Sized>(
    input: &Path,
    output_dir: &Path,
    config: &Config,
    analyzer: &A,
    filter: &ConversationFilter,
) -> Result<ProcessingStats> {
    let conversations = ChatGptParser::new().parse(input)?;
    tracing::debug!(count = conversations.len(), input = %input.display(), "parsed export");

    let renderer = MarkdownRenderer::new(config);
    write_conversations(&conversations, output_dir, &renderer, analyzer, filter)
}

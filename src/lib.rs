//! # chatmd
//!
//! A Rust library for converting ChatGPT `conversations.json` exports into
//! one Markdown note per conversation, tagged with code languages, extracted
//! keywords and rule-based custom tags.
//!
//! ## Overview
//!
//! The pipeline for every conversation:
//!
//! 1. **Flatten** the export's message tree into time-ordered user/assistant turns
//! 2. **Tag** it: `lang:*` tags from code fences, keywords from a frequency
//!    analysis of Latin and CJK text, custom tags from trigger phrases
//! 3. **Render** a Markdown document with metadata, statistics and a table of contents
//! 4. **Write** it as `ChatGPT-<title>-<timestamp>.md`
//!
//! Keyword extraction works on mixed-script text: Latin words are found with
//! a regular expression, CJK text is segmented by a morphological
//! [`Analyzer`](tagging::Analyzer): jieba by default, or lindera with an
//! IPADIC dictionary for Japanese (feature `japanese`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatmd::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::load("config.json");
//!     let analyzer = JiebaAnalyzer::new();
//!
//!     let stats = process_export(
//!         Path::new("conversations.json"),
//!         Path::new("output"),
//!         &config,
//!         &analyzer,
//!         &ConversationFilter::new(),
//!     )?;
//!
//!     println!("{} notes written", stats.converted());
//!     Ok(())
//! }
//! ```
//!
//! ## Extracting Keywords Only
//!
//! ```rust,no_run
//! use chatmd::Config;
//! use chatmd::tagging::{JiebaAnalyzer, extract_keywords};
//!
//! let analyzer = JiebaAnalyzer::new();
//! let keywords = extract_keywords(
//!     &analyzer,
//!     "機械学習のモデル。機械学習の評価。機械学習の実装。",
//!     &Config::default(),
//!     Some("機械学習"),
//! );
//! println!("{keywords:?}");
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - Run configuration ([`Config`], feature flags, keyword settings)
//! - [`message`] - [`Conversation`], [`Message`], [`Role`]
//! - [`parser`] - [`ChatGptParser`](parser::ChatGptParser) for export files
//! - [`parsing`] - Raw export structures and tree flattening
//! - [`tagging`] - Analyzer adapter, keyword extractor, tag assembler
//! - [`core`] - Statistics, rendering, filtering and the batch pipeline
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`ChatmdError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod tagging;

// Re-export the main types at the crate root for convenience
pub use config::Config;
pub use error::{ChatmdError, Result};
pub use message::{Conversation, Message, Role};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatmd::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Conversation, Message, Role};

    // Error types
    pub use crate::error::{ChatmdError, Result};

    // Configuration
    pub use crate::config::{Config, Features, KeywordSettings, TitleMatch};

    // Parsing
    pub use crate::parser::{ChatGptParser, parse_export, parse_export_file};

    // Tagging
    pub use crate::tagging::{
        Analyzer, JiebaAnalyzer, KeywordExtractor, assemble_tags, extract_keywords,
        select_analyzer,
    };

    #[cfg(feature = "japanese")]
    pub use crate::tagging::LinderaAnalyzer;

    // Rendering and processing
    pub use crate::core::{
        ConversationFilter, ConversationStats, MarkdownRenderer, ProcessingStats,
        convert_conversation, generate_filename, process_export,
    };
}

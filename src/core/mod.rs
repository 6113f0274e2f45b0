//! Document rendering and batch processing.
//!
//! This module contains:
//! - [`timestamp`] - Unix-seconds conversion and date formatting
//! - [`stats`] - Per-conversation statistics (code blocks, links, duration)
//! - [`render`] - Markdown layout and output file naming
//! - [`filter`] - Conversation selection by date and title
//! - [`processor`] - The tag → render → write pipeline
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatmd::Config;
//! use chatmd::core::{ConversationFilter, process_export};
//! use chatmd::tagging::JiebaAnalyzer;
//!
//! let filter = ConversationFilter::new().with_date_from("2024-01-01")?;
//! let stats = process_export(
//!     Path::new("conversations.json"),
//!     Path::new("output"),
//!     &Config::default(),
//!     &JiebaAnalyzer::new(),
//!     &filter,
//! )?;
//! assert!(stats.is_success());
//! # Ok::<(), chatmd::ChatmdError>(())
//! ```

pub mod filter;
pub mod processor;
pub mod render;
pub mod stats;
pub mod timestamp;

pub use filter::{ConversationFilter, apply_filters};
pub use processor::{
    ProcessingStats, RenderedConversation, convert_conversation, process_export,
    write_conversations,
};
pub use render::{MarkdownRenderer, generate_filename};
pub use stats::{CodeBlock, ConversationStats, Link};
pub use timestamp::format_timestamp;

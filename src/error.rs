//! Unified error types for chatmd.
//!
//! This module provides a single [`ChatmdError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Batch runs** never abort on a single conversation: per-conversation
//!   failures are collected into [`ProcessingStats`](crate::core::ProcessingStats)
//!
//! Configuration problems are not errors at all: [`Config::load`](crate::Config::load)
//! logs a warning and falls back to the built-in defaults.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatmd operations.
///
/// # Example
///
/// ```rust
/// use chatmd::error::Result;
/// use chatmd::Conversation;
///
/// fn my_function() -> Result<Vec<Conversation>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatmdError>;

/// The error type for all chatmd operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatmdError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input export doesn't exist
    /// - Permission denied
    /// - The output directory cannot be created
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse the input file.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "ChatGPT JSON")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file format doesn't match the expected structure.
    ///
    /// This occurs when the export's top-level value is not an array of
    /// conversations.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The morphological analyzer failed on a piece of text.
    ///
    /// The keyword extractor catches this and degrades to an empty keyword
    /// list for the affected text.
    #[error("Tokenizer error in {analyzer}: {message}")]
    Tokenizer {
        /// Name of the analyzer that failed
        analyzer: &'static str,
        /// Description of the failure
        message: String,
    },

    /// Writing a rendered document failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path of the document
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Generic parsing error
    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatmdError {
    /// Creates a parse error for a ChatGPT export.
    pub fn export_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatmdError::Parse {
            format: "ChatGPT JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatmdError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatmdError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a tokenizer error.
    pub fn tokenizer(analyzer: &'static str, message: impl Into<String>) -> Self {
        ChatmdError::Tokenizer {
            analyzer,
            message: message.into(),
        }
    }

    /// Creates a document write error.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatmdError::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatmdError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatmdError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatmdError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatmdError::InvalidDate { .. })
    }

    /// Returns `true` if this is a tokenizer error.
    pub fn is_tokenizer(&self) -> bool {
        matches!(self, ChatmdError::Tokenizer { .. })
    }

    /// Returns `true` if this is a document write error.
    pub fn is_write(&self) -> bool {
        matches!(self, ChatmdError::Write { .. })
    }
}

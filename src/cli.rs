//! Command-line interface definition using clap.
//!
//! [`Args`] is public so the argument surface can be tested and reused:
//!
//! ```rust
//! use clap::Parser;
//! use chatmd::cli::Args;
//!
//! let args = Args::parse_from(["chatmd", "export.json", "-o", "notes", "--after", "2024-01-01"]);
//! assert_eq!(args.output, "notes");
//! assert!(args.filter()?.is_active());
//! # Ok::<(), chatmd::ChatmdError>(())
//! ```

use clap::{ArgAction, Parser};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::core::ConversationFilter;
use crate::error::Result;

/// Convert a ChatGPT conversations.json export into one tagged Markdown
/// file per conversation.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatmd")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatmd
    chatmd conversations.json -o notes
    chatmd export.json -c my-config.json --after 2024-01-01
    chatmd export.json --title rust --dry-run
    chatmd export.json --dictionary ./ipadic
    RUST_LOG=chatmd=debug chatmd export.json")]
pub struct Args {
    /// Path to the ChatGPT export
    #[arg(default_value = "conversations.json")]
    pub input: String,

    /// Directory the Markdown files are written to
    #[arg(short, long, default_value = "output")]
    pub output: String,

    /// Path to the JSON configuration file (defaults are used if missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Only convert conversations created on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only convert conversations created on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only convert conversations whose title contains this text
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Japanese dictionary for lindera: a path, `file://` or `embedded://ipadic` URI
    #[arg(long, value_name = "URI")]
    pub dictionary: Option<String>,

    /// Print file names and tags without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the conversation filter from `--after`, `--before` and `--title`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatmdError::InvalidDate`](crate::ChatmdError::InvalidDate)
    /// for a malformed date.
    pub fn filter(&self) -> Result<ConversationFilter> {
        let mut filter = ConversationFilter::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref title) = self.title {
            filter = filter.with_title(title.as_str());
        }
        Ok(filter)
    }

    /// Default log directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

//! Select conversations by creation date and title.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](ConversationFilter::with_date_from) | Created on or after date |
//! | Date to | [`with_date_to`](ConversationFilter::with_date_to) | Created on or before date |
//! | Title | [`with_title`](ConversationFilter::with_title) | Title contains text |
//!
//! # Example
//!
//! ```
//! use chatmd::core::filter::{ConversationFilter, apply_filters};
//! use chatmd::Conversation;
//!
//! # fn main() -> chatmd::Result<()> {
//! let conversations = vec![
//!     Conversation::new(vec![]).with_title("Rust lifetimes").with_times(1_704_110_400.0, 0.0), // 2024-01-01
//!     Conversation::new(vec![]).with_title("Rust traits").with_times(1_718_452_800.0, 0.0),    // 2024-06-15
//!     Conversation::new(vec![]).with_title("Dinner ideas").with_times(1_718_452_800.0, 0.0),
//! ];
//!
//! let filter = ConversationFilter::new()
//!     .with_date_from("2024-06-01")?
//!     .with_title("rust");
//!
//! let selected = apply_filters(conversations, &filter);
//! assert_eq!(selected.len(), 1);
//! assert_eq!(selected[0].display_title(), "Rust traits");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Dates are compared in UTC against the conversation's `create_time`
//! - Conversations without a creation time are **excluded** when date filters are active
//! - Title matching is case-insensitive and uses the displayed title
//! - Multiple filters are combined with AND logic

use chrono::{DateTime, NaiveDate, Utc};

use super::timestamp::to_utc;
use crate::error::ChatmdError;
use crate::message::Conversation;

/// Criteria for selecting conversations, combined with AND logic.
#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    /// Include only conversations created on or after this instant.
    pub after: Option<DateTime<Utc>>,

    /// Include only conversations created on or before this instant.
    pub before: Option<DateTime<Utc>>,

    /// Include only conversations whose title contains this text (lowercased).
    pub title: Option<String>,
}

impl ConversationFilter {
    /// Creates a filter that lets every conversation through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatmdError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatmdError> {
        self.after = Some(parse_date_start(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatmdError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatmdError> {
        self.before = Some(parse_date_end(date_str)?);
        Ok(self)
    }

    /// Sets the title filter (case-insensitive substring).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into().to_lowercase());
        self
    }

    /// Sets the start instant directly.
    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end instant directly.
    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.title.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `conversation` passes every active filter.
    pub fn matches(&self, conversation: &Conversation) -> bool {
        if let Some(ref needle) = self.title {
            if !conversation.display_title().to_lowercase().contains(needle) {
                return false;
            }
        }

        if self.has_date_filter() {
            let created = Some(conversation.create_time)
                .filter(|t| *t > 0.0)
                .and_then(to_utc);
            match created {
                Some(ts) => {
                    if self.after.is_some_and(|after| ts < after) {
                        return false;
                    }
                    if self.before.is_some_and(|before| ts > before) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        true
    }
}

/// Parses `YYYY-MM-DD` to the first instant of that day (UTC).
fn parse_date_start(date_str: &str) -> Result<DateTime<Utc>, ChatmdError> {
    let naive = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatmdError::invalid_date(date_str))?;
    naive
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ChatmdError::invalid_date(date_str))
}

/// Parses `YYYY-MM-DD` to the last instant of that day (UTC).
fn parse_date_end(date_str: &str) -> Result<DateTime<Utc>, ChatmdError> {
    let naive = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatmdError::invalid_date(date_str))?;
    naive
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ChatmdError::invalid_date(date_str))
}

/// Keeps the conversations matching every active filter, in input order.
pub fn apply_filters(conversations: Vec<Conversation>, filter: &ConversationFilter) -> Vec<Conversation> {
    if !filter.is_active() {
        return conversations;
    }

    conversations
        .into_iter()
        .filter(|conversation| filter.matches(conversation))
        .collect()
}

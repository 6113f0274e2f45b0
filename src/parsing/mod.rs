//! Shared parsing utilities for ChatGPT exports.
//!
//! These functions are used by [`ChatGptParser`](crate::parser::ChatGptParser)
//! and are public so that callers holding an already-decoded
//! `serde_json::Value` can reuse the flattening logic directly.

pub mod chatgpt;

pub use chatgpt::{
    RawConversation, RawNode, flatten_mapping, parse_conversation, parse_node,
};

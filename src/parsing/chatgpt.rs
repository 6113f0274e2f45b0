//! ChatGPT export structures and message-tree flattening.
//!
//! A `conversations.json` export is an array of conversations. Each
//! conversation stores its turns as a `mapping` from node id to node:
//!
//! ```json
//! {
//!   "title": "Chat title",
//!   "create_time": 1700000000.5,
//!   "update_time": 1700000600,
//!   "mapping": {
//!     "node-id": {
//!       "message": {
//!         "author": {"role": "user"},
//!         "content": {"parts": ["Hello"]},
//!         "create_time": 1700000001.25
//!       },
//!       "parent": null,
//!       "children": []
//!     }
//!   }
//! }
//! ```
//!
//! Decoding is lenient at every level: a malformed node is skipped without
//! affecting its siblings, and a malformed conversation is skipped without
//! affecting the rest of the export.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::message::{Conversation, Message, Role};

/// Raw conversation entry.
#[derive(Debug, Deserialize)]
pub struct RawConversation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub update_time: Option<f64>,
    /// Node id → node. Kept as raw values so one bad node can't poison the rest.
    #[serde(default)]
    pub mapping: Option<Map<String, Value>>,
}

/// Raw node of the message tree.
#[derive(Debug, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub message: Option<RawMessage>,
    #[serde(default)]
    pub create_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub create_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawContent {
    /// Usually strings; multimodal exports mix in objects.
    #[serde(default)]
    pub parts: Option<Vec<Value>>,
}

/// Treats `None` and `0.0` alike, the way the export uses them.
fn nonzero(time: Option<f64>) -> Option<f64> {
    time.filter(|t| *t != 0.0)
}

/// Converts one raw node into a [`Message`].
///
/// Returns `None` when:
/// - the node has no message
/// - the role is not `user` or `assistant`
/// - `content.parts` is missing or empty
/// - the first part is not a non-empty string
pub fn parse_node(node: &RawNode) -> Option<Message> {
    let message = node.message.as_ref()?;
    let role = message
        .author
        .as_ref()
        .and_then(|a| a.role.as_deref())
        .and_then(Role::from_export)?;
    let parts = message.content.as_ref()?.parts.as_ref()?;
    let text = parts.first()?.as_str()?;

    if text.is_empty() {
        return None;
    }

    let create_time = nonzero(message.create_time)
        .or_else(|| nonzero(node.create_time))
        .unwrap_or(0.0);

    Some(Message::new(role, text).with_create_time(create_time))
}

/// Flattens a node mapping into messages ordered by `create_time`.
///
/// Ties keep the mapping's document order.
pub fn flatten_mapping(mapping: &Map<String, Value>) -> Vec<Message> {
    let mut messages: Vec<Message> = mapping
        .iter()
        .filter_map(|(id, value)| match RawNode::deserialize(value) {
            Ok(node) => parse_node(&node),
            Err(err) => {
                tracing::debug!(node = %id, error = %err, "skipping malformed node");
                None
            }
        })
        .collect();

    messages.sort_by(|a, b| a.create_time.total_cmp(&b.create_time));
    messages
}

/// Converts a raw conversation into a [`Conversation`].
///
/// A missing `mapping` yields a conversation with no messages.
pub fn parse_conversation(raw: RawConversation) -> Conversation {
    let messages = raw
        .mapping
        .as_ref()
        .map(flatten_mapping)
        .unwrap_or_default();

    Conversation {
        title: raw.title,
        create_time: raw.create_time.unwrap_or(0.0),
        update_time: raw.update_time.unwrap_or(0.0),
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> RawNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_node_user() {
        let n = node(json!({
            "message": {"author": {"role": "user"}, "content": {"parts": ["Hi"]}, "create_time": 5.0}
        }));
        let msg = parse_node(&n).unwrap();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "Hi");
        assert_eq!(msg.create_time, 5.0);
    }

    #[test]
    fn test_parse_node_falls_back_to_node_time() {
        let n = node(json!({
            "message": {"author": {"role": "assistant"}, "content": {"parts": ["Yo"]}, "create_time": null},
            "create_time": 7
        }));
        assert_eq!(parse_node(&n).unwrap().create_time, 7.0);

        let zero = node(json!({
            "message": {"author": {"role": "assistant"}, "content": {"parts": ["Yo"]}, "create_time": 0},
            "create_time": 9
        }));
        assert_eq!(parse_node(&zero).unwrap().create_time, 9.0);
    }

    #[test]
    fn test_parse_node_rejections() {
        let system = node(json!({
            "message": {"author": {"role": "system"}, "content": {"parts": ["sys"]}}
        }));
        assert!(parse_node(&system).is_none());

        let no_parts = node(json!({"message": {"author": {"role": "user"}, "content": {}}}));
        assert!(parse_node(&no_parts).is_none());

        let empty = node(json!({"message": {"author": {"role": "user"}, "content": {"parts": [""]}}}));
        assert!(parse_node(&empty).is_none());

        let object_part = node(json!({
            "message": {"author": {"role": "user"}, "content": {"parts": [{"asset": "img"}]}}
        }));
        assert!(parse_node(&object_part).is_none());

        let root = node(json!({"message": null, "children": ["a"]}));
        assert!(parse_node(&root).is_none());
    }

    #[test]
    fn test_flatten_sorts_and_keeps_tie_order() {
        let mapping = json!({
            "c": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["third"]}, "create_time": 3.0}},
            "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["first"]}, "create_time": 1.0}},
            "t1": {"message": {"author": {"role": "user"}, "content": {"parts": ["tie-1"]}, "create_time": 2.0}},
            "t2": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["tie-2"]}, "create_time": 2.0}},
            "bad": "not an object"
        });
        let messages = flatten_mapping(mapping.as_object().unwrap());
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "tie-1", "tie-2", "third"]);
    }

    #[test]
    fn test_parse_conversation_without_mapping() {
        let raw: RawConversation = serde_json::from_value(json!({"title": "Empty"})).unwrap();
        let conv = parse_conversation(raw);
        assert!(conv.is_empty());
        assert_eq!(conv.title.as_deref(), Some("Empty"));
    }
}

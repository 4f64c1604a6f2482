//! Chat message types.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::utils::now_ms;

/// Author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the message log.
///
/// Messages are never edited after creation; the log only ever appends.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Unique ID for efficient keying in For loops
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Whether `text` is reply markdown to be rendered as HTML
    pub is_html: bool,
}

// Global counter for generating unique IDs
static MESSAGE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl Message {
    fn new(role: Role, text: String, is_html: bool) -> Self {
        let n = MESSAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("msg-{n}"),
            role,
            text,
            timestamp: now_ms(),
            is_html,
        }
    }

    /// Text typed by the user. Never rendered as markup.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), false)
    }

    /// A reply from the backend, rendered through the markdown pipeline.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into(), true)
    }

    /// Assistant-side plain text, such as a failure notice.
    pub fn notice(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let user = Message::user("hi");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_html);

        let reply = Message::assistant("**hi**");
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.is_html);

        let notice = Message::notice("offline");
        assert_eq!(notice.role, Role::Assistant);
        assert!(!notice.is_html);
    }

    #[test]
    fn test_unique_ids() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn test_timestamp_set() {
        assert!(Message::user("x").timestamp > 0);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"user\"").unwrap(),
            Role::User
        );
    }
}

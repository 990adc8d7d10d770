//! Chat message domain types.
//!
//! The conversation is a strictly append-only sequence: the user's message is
//! appended before the completion call starts, and exactly one `ai` or
//! `system` message is appended when the call settles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the widget
    User,
    /// The assistant reply produced by the completion endpoint
    Ai,
    /// Errors and notices surfaced inline (offline, network, API errors)
    System,
}

/// A single message in the chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::with_role(Role::Ai, content)
    }

    /// Create a new system notice.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::ai("hello").role, Role::Ai);
        assert_eq!(Message::system("offline").role, Role::System);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Message::user("a").id, Message::user("a").id);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Message::ai("Hello!")).unwrap();
        assert!(json.contains("\"role\":\"ai\""));
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.role, Role::Ai);
        assert_eq!(parsed.content, "Hello!");
    }
}

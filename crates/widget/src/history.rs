//! Chat history persistence.
//!
//! The whole message sequence lives under one storage key as a JSON array.
//! It is read once at startup and overwritten on every change. A missing,
//! empty or unreadable value starts the conversation over from the welcome
//! message. Storage failures are logged, never surfaced.

use std::sync::Arc;
use swarmboard_core::message::Message;
use swarmboard_core::storage::KeyValueStorage;
use tracing::{debug, warn};

/// Storage key holding the serialized message sequence.
pub const HISTORY_KEY: &str = "swarm_chat_history";

/// The `ai` message every new or cleared conversation starts with.
pub const WELCOME_MESSAGE: &str =
    "Hi! I'm the Swarm Board assistant. Ask me anything about the project.";

pub struct ChatHistory {
    storage: Arc<dyn KeyValueStorage>,
    persist: bool,
}

impl ChatHistory {
    pub fn new(storage: Arc<dyn KeyValueStorage>, persist: bool) -> Self {
        Self { storage, persist }
    }

    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// A fresh conversation.
    pub fn seeded() -> Vec<Message> {
        vec![Message::ai(WELCOME_MESSAGE)]
    }

    /// Read the stored conversation, or seed a new one.
    pub async fn load(&self) -> Vec<Message> {
        if !self.persist {
            return Self::seeded();
        }

        let raw = match self.storage.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::seeded(),
            Err(e) => {
                warn!(error = %e, "Failed to read chat history");
                return Self::seeded();
            }
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) if !messages.is_empty() => {
                debug!(count = messages.len(), "Chat history restored");
                messages
            }
            Ok(_) => Self::seeded(),
            Err(e) => {
                warn!(error = %e, "Stored chat history is corrupted, starting over");
                Self::seeded()
            }
        }
    }

    /// Overwrite the stored conversation.
    pub async fn save(&self, messages: &[Message]) {
        if !self.persist {
            return;
        }
        let json = match serde_json::to_string(messages) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize chat history");
                return;
            }
        };
        if let Err(e) = self.storage.set(HISTORY_KEY, &json).await {
            warn!(error = %e, "Failed to persist chat history");
        }
    }

    /// Delete the stored conversation and return a freshly seeded one.
    pub async fn clear(&self) -> Vec<Message> {
        if self.persist {
            if let Err(e) = self.storage.remove(HISTORY_KEY).await {
                warn!(error = %e, "Failed to clear chat history");
            }
        }
        Self::seeded()
    }
}

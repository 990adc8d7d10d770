//! Document store contract: the shared, real-time database.
//!
//! The widget depends on five operations only: subscribe to the knowledge
//! collection, subscribe to the config document, add a knowledge record,
//! delete one by id, and upsert the config document with merge semantics.
//!
//! Subscriptions are `tokio::sync::watch` channels carrying the latest
//! snapshot. A snapshot is a `Result` so listener failures reach the
//! subscriber, which keeps its previous state when it sees an `Err`.
//!
//! Every operation takes a [`SessionHandle`], so no store access can happen
//! before the identity service has signed the client in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::StoreError;
use crate::identity::SessionHandle;
use crate::knowledge::{KnowledgeDraft, KnowledgeItem};

/// Name of the knowledge collection.
pub const KNOWLEDGE_COLLECTION: &str = "knowledge";

/// Id of the single shared config document.
pub const CONFIG_DOCUMENT: &str = "config";

/// Logical namespace all records live under.
pub fn namespace(app_id: &str) -> String {
    format!("artifacts/{app_id}/public/data")
}

/// A subscription to one watched resource.
pub type Subscription<T> = watch::Receiver<Result<T, StoreError>>;

/// The shared configuration document.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedConfig {
    #[serde(default)]
    pub api_key: String,
}

impl SharedConfig {
    /// The API key, if one is set.
    ///
    /// Surrounding whitespace is stripped from the stored value, and a key
    /// that is only whitespace counts as not configured. Callers that send
    /// the key upstream get the trimmed form.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

impl std::fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedConfig")
            .field(
                "api_key",
                &if self.api_key().is_some() { "[REDACTED]" } else { "None" },
            )
            .finish()
    }
}

/// A partial update merged into the config document. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ConfigPatch {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
        }
    }

    /// Merge into an existing (or missing) document.
    pub fn apply(self, current: Option<SharedConfig>) -> SharedConfig {
        let mut doc = current.unwrap_or_default();
        if let Some(key) = self.api_key {
            doc.api_key = key;
        }
        doc
    }
}

/// The core DocumentStore trait.
///
/// Implementations: in-memory (tests, ephemeral sessions) and JSON file.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The backend name (e.g., "memory", "file").
    fn name(&self) -> &str;

    /// Subscribe to the knowledge collection in insertion order.
    fn watch_knowledge(&self, session: &SessionHandle) -> Subscription<Vec<KnowledgeItem>>;

    /// Subscribe to the config document; `None` until it is first written.
    fn watch_config(&self, session: &SessionHandle) -> Subscription<Option<SharedConfig>>;

    /// Add a knowledge record. Returns the store-assigned id.
    async fn add_knowledge(
        &self,
        session: &SessionHandle,
        draft: KnowledgeDraft,
    ) -> Result<String, StoreError>;

    /// Delete a knowledge record by id.
    async fn delete_knowledge(&self, session: &SessionHandle, id: &str) -> Result<(), StoreError>;

    /// Upsert the config document, merging with what is already stored.
    async fn merge_config(&self, session: &SessionHandle, patch: ConfigPatch) -> Result<(), StoreError>;
}

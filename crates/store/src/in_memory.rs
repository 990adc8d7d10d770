//! In-memory document store for tests and ephemeral sessions.
//!
//! Holds the knowledge collection and the config document behind a lock and
//! pushes every committed change to subscribers through `watch` channels.
//! An optional persistence hook runs before a change is committed, which is
//! how [`crate::FileStore`] gets durable writes.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swarmboard_core::error::StoreError;
use swarmboard_core::identity::SessionHandle;
use swarmboard_core::knowledge::{KnowledgeDraft, KnowledgeItem};
use swarmboard_core::store::{
    ConfigPatch, DocumentStore, KNOWLEDGE_COLLECTION, SharedConfig, Subscription,
};
use tokio::sync::{RwLock, watch};
use tracing::debug;
use uuid::Uuid;

/// Everything the store holds under one namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documents {
    #[serde(default)]
    pub knowledge: Vec<KnowledgeItem>,
    #[serde(default)]
    pub config: Option<SharedConfig>,
}

/// Write access rules, the local stand-in for database security rules.
#[derive(Debug, Clone)]
pub struct AccessRules {
    pub allow_writes: bool,
}

impl Default for AccessRules {
    fn default() -> Self {
        Self { allow_writes: true }
    }
}

pub(crate) type PersistFn = dyn Fn(&Documents) -> Result<(), StoreError> + Send + Sync;

struct Inner {
    docs: RwLock<Documents>,
    knowledge_tx: watch::Sender<Result<Vec<KnowledgeItem>, StoreError>>,
    config_tx: watch::Sender<Result<Option<SharedConfig>, StoreError>>,
    persist: Option<Box<PersistFn>>,
}

/// An in-memory `DocumentStore`.
#[derive(Clone)]
pub struct InMemoryStore {
    namespace: String,
    rules: AccessRules,
    inner: Arc<Inner>,
}

impl InMemoryStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::from_documents(namespace, Documents::default())
    }

    /// Start from existing documents.
    pub fn from_documents(namespace: impl Into<String>, docs: Documents) -> Self {
        Self::build(namespace.into(), docs, None)
    }

    /// Apply write access rules (e.g. a read-only client). Clones share the
    /// same documents but each carries its own rules.
    pub fn with_rules(mut self, rules: AccessRules) -> Self {
        self.rules = rules;
        self
    }

    pub(crate) fn with_persistence(
        namespace: String,
        docs: Documents,
        persist: Box<PersistFn>,
    ) -> Self {
        Self::build(namespace, docs, Some(persist))
    }

    fn build(
        namespace: String,
        docs: Documents,
        persist: Option<Box<PersistFn>>,
    ) -> Self {
        let (knowledge_tx, _) = watch::channel(Ok(docs.knowledge.clone()));
        let (config_tx, _) = watch::channel(Ok(docs.config.clone()));
        Self {
            namespace,
            rules: AccessRules::default(),
            inner: Arc::new(Inner {
                docs: RwLock::new(docs),
                knowledge_tx,
                config_tx,
                persist,
            }),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// A copy of everything currently stored.
    pub async fn snapshot(&self) -> Documents {
        self.inner.docs.read().await.clone()
    }

    /// Push a listener error to every subscriber. Stored documents are untouched.
    pub fn report_listener_error(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.inner
            .knowledge_tx
            .send_replace(Err(StoreError::Unavailable(reason.clone())));
        self.inner
            .config_tx
            .send_replace(Err(StoreError::Unavailable(reason)));
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.rules.allow_writes {
            Ok(())
        } else {
            Err(StoreError::PermissionDenied(
                "Missing or insufficient permissions.".into(),
            ))
        }
    }

    /// Apply a mutation, persist it, then publish whatever changed.
    async fn commit<R>(
        &self,
        mutate: impl FnOnce(&mut Documents) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        self.check_write()?;

        let mut docs = self.inner.docs.write().await;
        let mut next = docs.clone();
        let out = mutate(&mut next)?;

        if let Some(persist) = &self.inner.persist {
            persist(&next)?;
        }

        let knowledge_changed = next.knowledge != docs.knowledge;
        let config_changed = next.config != docs.config;
        *docs = next;

        if knowledge_changed {
            self.inner.knowledge_tx.send_replace(Ok(docs.knowledge.clone()));
        }
        if config_changed {
            self.inner.config_tx.send_replace(Ok(docs.config.clone()));
        }
        Ok(out)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn watch_knowledge(&self, session: &SessionHandle) -> Subscription<Vec<KnowledgeItem>> {
        debug!(uid = %session.uid, namespace = %self.namespace, "Subscribed to knowledge");
        self.inner.knowledge_tx.subscribe()
    }

    fn watch_config(&self, session: &SessionHandle) -> Subscription<Option<SharedConfig>> {
        debug!(uid = %session.uid, namespace = %self.namespace, "Subscribed to config");
        self.inner.config_tx.subscribe()
    }

    async fn add_knowledge(
        &self,
        session: &SessionHandle,
        draft: KnowledgeDraft,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let item = draft.into_item(id.clone(), Utc::now());
        self.commit(move |docs| {
            docs.knowledge.push(item);
            Ok(())
        })
        .await?;
        debug!(uid = %session.uid, id = %id, "Knowledge record added");
        Ok(id)
    }

    async fn delete_knowledge(&self, session: &SessionHandle, id: &str) -> Result<(), StoreError> {
        self.commit(|docs| {
            let before = docs.knowledge.len();
            docs.knowledge.retain(|item| item.id != id);
            if docs.knowledge.len() == before {
                return Err(StoreError::NotFound {
                    collection: KNOWLEDGE_COLLECTION.into(),
                    id: id.to_string(),
                });
            }
            Ok(())
        })
        .await?;
        debug!(uid = %session.uid, id = %id, "Knowledge record deleted");
        Ok(())
    }

    async fn merge_config(&self, session: &SessionHandle, patch: ConfigPatch) -> Result<(), StoreError> {
        self.commit(move |docs| {
            docs.config = Some(patch.apply(docs.config.take()));
            Ok(())
        })
        .await?;
        debug!(uid = %session.uid, "Config document merged");
        Ok(())
    }
}

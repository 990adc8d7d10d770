//! File-based document store: persistent JSON storage.
//!
//! The whole namespace (knowledge collection + config document) is kept in a
//! single human-inspectable JSON file:
//!
//! ```json
//! {"namespace": "artifacts/swarm-board/public/data", "knowledge": [...], "config": {"apiKey": "..."}}
//! ```
//!
//! Documents are loaded on open and the file is rewritten before every
//! committed mutation, so a failed write never reaches subscribers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swarmboard_core::error::StoreError;
use swarmboard_core::identity::SessionHandle;
use swarmboard_core::knowledge::{KnowledgeDraft, KnowledgeItem};
use swarmboard_core::store::{ConfigPatch, DocumentStore, SharedConfig, Subscription};
use tracing::debug;

use crate::in_memory::{AccessRules, Documents, InMemoryStore};

#[derive(Serialize, Deserialize)]
struct StoreFile {
    namespace: String,
    #[serde(flatten)]
    documents: Documents,
}

/// A JSON-file-backed `DocumentStore`.
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    store: InMemoryStore,
}

impl FileStore {
    /// Open (or lazily create) the store file at `path`.
    ///
    /// A missing file starts empty and is created on first write. A file that
    /// exists but cannot be parsed is an error rather than being overwritten,
    /// and so is a file that belongs to a different namespace.
    pub fn open(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let namespace = namespace.into();
        let documents = Self::load_from_disk(&path, &namespace)?;

        debug!(
            path = %path.display(),
            namespace = %namespace,
            knowledge = documents.knowledge.len(),
            "File store loaded"
        );

        let persist_path = path.clone();
        let persist_namespace = namespace.clone();
        let store = InMemoryStore::with_persistence(
            namespace,
            documents,
            Box::new(move |docs: &Documents| flush(&persist_path, &persist_namespace, docs)),
        );

        Ok(Self { path, store })
    }

    pub fn with_rules(mut self, rules: AccessRules) -> Self {
        self.store = self.store.with_rules(rules);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Documents {
        self.store.snapshot().await
    }

    fn load_from_disk(path: &Path, namespace: &str) -> Result<Documents, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Documents::default()),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to read store file {}: {e}",
                    path.display()
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(Documents::default());
        }

        let file: StoreFile = serde_json::from_str(&content).map_err(|e| {
            StoreError::Serialization(format!("{}: {e}", path.display()))
        })?;
        if file.namespace != namespace {
            return Err(StoreError::PermissionDenied(format!(
                "store file {} holds namespace '{}', not '{namespace}'",
                path.display(),
                file.namespace
            )));
        }
        Ok(file.documents)
    }
}

/// Write all documents to disk.
fn flush(path: &Path, namespace: &str, docs: &Documents) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create store directory: {e}"))
        })?;
    }

    let file = StoreFile {
        namespace: namespace.to_string(),
        documents: docs.clone(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    std::fs::write(path, json)
        .map_err(|e| StoreError::Unavailable(format!("Failed to write store file: {e}")))
}

#[async_trait]
impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn watch_knowledge(&self, session: &SessionHandle) -> Subscription<Vec<KnowledgeItem>> {
        self.store.watch_knowledge(session)
    }

    fn watch_config(&self, session: &SessionHandle) -> Subscription<Option<SharedConfig>> {
        self.store.watch_config(session)
    }

    async fn add_knowledge(
        &self,
        session: &SessionHandle,
        draft: KnowledgeDraft,
    ) -> Result<String, StoreError> {
        self.store.add_knowledge(session, draft).await
    }

    async fn delete_knowledge(&self, session: &SessionHandle, id: &str) -> Result<(), StoreError> {
        self.store.delete_knowledge(session, id).await
    }

    async fn merge_config(&self, session: &SessionHandle, patch: ConfigPatch) -> Result<(), StoreError> {
        self.store.merge_config(session, patch).await
    }
}

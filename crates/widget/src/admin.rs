//! The admin panel: knowledge CRUD and the shared API key.
//!
//! Every write goes straight to the document store. Nothing here touches the
//! cached views: the listing only changes once the subscription pushes the
//! store's new state. Failures come back as [`AdminError`], whose
//! [`AdminError::user_message`] is the alert text shown to the admin.

use std::sync::Arc;
use swarmboard_core::error::{Error, StoreError};
use swarmboard_core::identity::SessionHandle;
use swarmboard_core::knowledge::{Category, KnowledgeDraft, KnowledgeItem};
use swarmboard_core::store::{ConfigPatch, DocumentStore, SharedConfig};
use tracing::{info, warn};

use crate::gate::AdminGate;
use crate::view::LiveView;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Admin panel is locked")]
    Locked,

    #[error("Not signed in to the document store")]
    NotSignedIn,

    #[error("{0}")]
    Validation(String),

    #[error("Store write failed: {0}")]
    Store(#[from] StoreError),
}

impl AdminError {
    /// Alert text for the admin.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Locked => "Unlock the admin panel first.".into(),
            AdminError::NotSignedIn => {
                "Not connected to the knowledge base. Check the connection warning and reload."
                    .into()
            }
            AdminError::Validation(message) => message.clone(),
            AdminError::Store(e) if e.is_permission_denied() => {
                "Permission denied: the database rejected this change. \
                 Check the store's access rules."
                    .into()
            }
            AdminError::Store(e) => format!("Error: {e}"),
        }
    }
}

impl From<Error> for AdminError {
    fn from(e: Error) -> Self {
        match e {
            Error::Validation(message) => AdminError::Validation(message),
            Error::Store(e) => AdminError::Store(e),
            other => AdminError::Validation(other.to_string()),
        }
    }
}

/// Whether the shared API key is set, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Missing,
    Configured { masked: String },
}

impl ApiKeyStatus {
    pub fn from_config(config: Option<&SharedConfig>) -> Self {
        match config.and_then(SharedConfig::api_key) {
            Some(key) => ApiKeyStatus::Configured {
                masked: mask_key(key),
            },
            None => ApiKeyStatus::Missing,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ApiKeyStatus::Configured { .. })
    }
}

impl std::fmt::Display for ApiKeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiKeyStatus::Missing => f.write_str("not configured"),
            ApiKeyStatus::Configured { masked } => write!(f, "configured ({masked})"),
        }
    }
}

/// Show the first four characters of a long key, nothing of a short one.
fn mask_key(key: &str) -> String {
    const VISIBLE: usize = 4;
    const STARS: &str = "********";
    if key.chars().count() <= VISIBLE * 2 {
        return STARS.to_string();
    }
    let prefix: String = key.chars().take(VISIBLE).collect();
    format!("{prefix}{STARS}")
}

pub struct AdminPanel {
    gate: AdminGate,
    store: Arc<dyn DocumentStore>,
    session: Option<SessionHandle>,
    knowledge: Arc<LiveView<Vec<KnowledgeItem>>>,
    config: Arc<LiveView<Option<SharedConfig>>>,
}

impl AdminPanel {
    pub fn new(
        gate: AdminGate,
        store: Arc<dyn DocumentStore>,
        session: Option<SessionHandle>,
        knowledge: Arc<LiveView<Vec<KnowledgeItem>>>,
        config: Arc<LiveView<Option<SharedConfig>>>,
    ) -> Self {
        Self {
            gate,
            store,
            session,
            knowledge,
            config,
        }
    }

    pub fn gate(&self) -> &AdminGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AdminGate {
        &mut self.gate
    }

    fn authorize(&self) -> Result<&SessionHandle, AdminError> {
        if !self.gate.is_unlocked() {
            return Err(AdminError::Locked);
        }
        self.session.as_ref().ok_or(AdminError::NotSignedIn)
    }

    /// Add a knowledge record. Returns the store-assigned id.
    pub async fn add_knowledge(
        &self,
        category: Category,
        title: &str,
        content: &str,
    ) -> Result<String, AdminError> {
        let session = self.authorize()?;
        let draft = KnowledgeDraft::new(category, title, content)?;
        let id = self
            .store
            .add_knowledge(session, draft)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to add knowledge record"))?;
        info!(id = %id, category = %category, "Knowledge record added");
        Ok(id)
    }

    pub async fn delete_knowledge(&self, id: &str) -> Result<(), AdminError> {
        let session = self.authorize()?;
        self.store
            .delete_knowledge(session, id)
            .await
            .inspect_err(|e| warn!(error = %e, id = %id, "Failed to delete knowledge record"))?;
        info!(id = %id, "Knowledge record deleted");
        Ok(())
    }

    /// Store the shared API key, merging into the config document.
    pub async fn save_api_key(&self, key: &str) -> Result<(), AdminError> {
        let session = self.authorize()?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AdminError::Validation("API key must not be empty".into()));
        }
        self.store
            .merge_config(session, ConfigPatch::api_key(key))
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to save API key"))?;
        info!("Shared API key updated");
        Ok(())
    }

    /// Knowledge as the admin sees it: newest first.
    pub async fn knowledge_listing(&self) -> Vec<KnowledgeItem> {
        let mut items = self.knowledge.current().await;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub async fn api_key_status(&self) -> ApiKeyStatus {
        ApiKeyStatus::from_config(self.config.current().await.as_ref())
    }
}

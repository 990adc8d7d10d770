//! Shared test doubles for widget tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use swarmboard_core::completion::{CompletionClient, CompletionReply, CompletionRequest};
use swarmboard_core::error::{CompletionError, StoreError};
use swarmboard_core::identity::SessionHandle;
use swarmboard_core::knowledge::{KnowledgeDraft, KnowledgeItem};
use swarmboard_core::store::{ConfigPatch, DocumentStore, SharedConfig, Subscription};
use tokio::sync::{Notify, watch};

/// A completion client that returns a sequence of scripted outcomes and
/// records every request it sees.
///
/// Panics if more calls are made than outcomes provided.
pub struct ScriptedCompletion {
    outcomes: Mutex<VecDeque<Result<CompletionReply, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(outcomes: Vec<Result<CompletionReply, CompletionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(vec![Ok(reply(Some(text)))])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn reply(text: Option<&str>) -> CompletionReply {
    CompletionReply {
        text: text.map(str::to_string),
        model: "scripted".into(),
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedCompletion {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, CompletionError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedCompletion: no outcome left for call #{call}"))
    }
}

/// A completion client that blocks until released.
#[derive(Default)]
pub struct GatedCompletion {
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait::async_trait]
impl CompletionClient for GatedCompletion {
    fn name(&self) -> &str {
        "gated"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionReply, CompletionError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(reply(Some("released")))
    }
}

/// A document store whose writes succeed immediately but only reach
/// subscribers when [`DeferredStore::release`] is called.
pub struct DeferredStore {
    knowledge: Mutex<Vec<KnowledgeItem>>,
    config: Mutex<Option<SharedConfig>>,
    knowledge_tx: watch::Sender<Result<Vec<KnowledgeItem>, StoreError>>,
    config_tx: watch::Sender<Result<Option<SharedConfig>, StoreError>>,
}

impl DeferredStore {
    pub fn new(items: Vec<KnowledgeItem>) -> Self {
        let (knowledge_tx, _) = watch::channel(Ok(items.clone()));
        let (config_tx, _) = watch::channel(Ok(None));
        Self {
            knowledge: Mutex::new(items),
            config: Mutex::new(None),
            knowledge_tx,
            config_tx,
        }
    }

    /// Push the pending state to subscribers.
    pub fn release(&self) {
        self.knowledge_tx
            .send_replace(Ok(self.knowledge.lock().unwrap().clone()));
        self.config_tx
            .send_replace(Ok(self.config.lock().unwrap().clone()));
    }
}

#[async_trait::async_trait]
impl DocumentStore for DeferredStore {
    fn name(&self) -> &str {
        "deferred"
    }

    fn watch_knowledge(&self, _session: &SessionHandle) -> Subscription<Vec<KnowledgeItem>> {
        self.knowledge_tx.subscribe()
    }

    fn watch_config(&self, _session: &SessionHandle) -> Subscription<Option<SharedConfig>> {
        self.config_tx.subscribe()
    }

    async fn add_knowledge(
        &self,
        _session: &SessionHandle,
        draft: KnowledgeDraft,
    ) -> Result<String, StoreError> {
        let mut knowledge = self.knowledge.lock().unwrap();
        let id = format!("deferred-{}", knowledge.len() + 1);
        knowledge.push(draft.into_item(id.clone(), chrono::Utc::now()));
        Ok(id)
    }

    async fn delete_knowledge(&self, _session: &SessionHandle, id: &str) -> Result<(), StoreError> {
        self.knowledge.lock().unwrap().retain(|item| item.id != id);
        Ok(())
    }

    async fn merge_config(&self, _session: &SessionHandle, patch: ConfigPatch) -> Result<(), StoreError> {
        let mut config = self.config.lock().unwrap();
        *config = Some(patch.apply(config.take()));
        Ok(())
    }
}

//! The explicitly constructed client context.

use std::sync::Arc;
use swarmboard_core::completion::CompletionClient;
use swarmboard_core::identity::IdentityService;
use swarmboard_core::storage::KeyValueStorage;
use swarmboard_core::store::DocumentStore;

/// Handles to every external collaborator the widget talks to.
#[derive(Clone)]
pub struct ClientContext {
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityService>,
    pub completion: Arc<dyn CompletionClient>,
    pub storage: Arc<dyn KeyValueStorage>,
}

impl ClientContext {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityService>,
        completion: Arc<dyn CompletionClient>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            store,
            identity,
            completion,
            storage,
        }
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("store", &self.store.name())
            .field("identity", &self.identity.name())
            .field("completion", &self.completion.name())
            .field("storage", &self.storage.name())
            .finish()
    }
}

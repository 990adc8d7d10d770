//! Local anonymous identity service.
//!
//! Hands out a random uid on first sign-in and keeps returning it for the
//! rest of the process. A failing instance is available to exercise the
//! "identity unavailable" path.

use async_trait::async_trait;
use swarmboard_core::error::IdentityError;
use swarmboard_core::identity::{AuthState, IdentityService, SessionHandle};
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

pub struct AnonymousIdentity {
    state: watch::Sender<AuthState>,
    failure: Option<String>,
}

impl AnonymousIdentity {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self {
            state,
            failure: None,
        }
    }

    /// An identity service whose sign-in always fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new()
        }
    }
}

impl Default for AnonymousIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityService for AnonymousIdentity {
    fn name(&self) -> &str {
        "anonymous"
    }

    async fn sign_in_anonymously(&self) -> Result<SessionHandle, IdentityError> {
        if let Some(reason) = &self.failure {
            warn!(reason = %reason, "Anonymous sign-in failed");
            self.state.send_replace(AuthState::Failed(reason.clone()));
            return Err(IdentityError::SignInFailed(reason.clone()));
        }

        if let Some(existing) = self.state.borrow().session() {
            return Ok(existing.clone());
        }

        let handle = SessionHandle::anonymous(Uuid::new_v4().simple().to_string());
        info!(uid = %handle.uid, "Signed in anonymously");
        self.state.send_replace(AuthState::SignedIn(handle.clone()));
        Ok(handle)
    }

    fn watch_auth(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}

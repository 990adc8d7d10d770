//! Anonymous identity contract.
//!
//! The client signs in anonymously once at startup. The resulting
//! [`SessionHandle`] is what unlocks every document store operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::IdentityError;

/// An opaque handle for a signed-in client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle {
    pub uid: String,
    #[serde(default)]
    pub anonymous: bool,
}

impl SessionHandle {
    pub fn anonymous(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            anonymous: true,
        }
    }
}

/// Authentication state as pushed by the identity service.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(SessionHandle),
    Failed(String),
}

impl AuthState {
    pub fn session(&self) -> Option<&SessionHandle> {
        match self {
            AuthState::SignedIn(handle) => Some(handle),
            _ => None,
        }
    }
}

/// The core IdentityService trait.
#[async_trait]
pub trait IdentityService: Send + Sync {
    fn name(&self) -> &str;

    /// Sign in anonymously and return the session handle.
    async fn sign_in_anonymously(&self) -> Result<SessionHandle, IdentityError>;

    /// Subscribe to auth-state changes.
    fn watch_auth(&self) -> watch::Receiver<AuthState>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_only_when_signed_in() {
        assert!(AuthState::SignedOut.session().is_none());
        assert!(AuthState::Failed("boom".into()).session().is_none());
        let state = AuthState::SignedIn(SessionHandle::anonymous("u1"));
        assert_eq!(state.session().unwrap().uid, "u1");
    }
}

//! Error types for the Swarm Board domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each external collaborator has its own error enum.

use thiserror::Error;

/// The top-level error type for all Swarm Board operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Document store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Identity errors ---
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    // --- Completion endpoint errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Local storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Input validation ---
    #[error("Validation failed: {0}")]
    Validation(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Collaborator errors ---

/// Failures reported by the document store.
///
/// `Clone` because read failures travel through subscription channels.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed record: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StoreError::PermissionDenied(_))
    }
}

#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Anonymous sign-in failed: {0}")]
    SignInFailed(String),

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the completion call.
///
/// The `Display` of `Network` and `Api` is the upstream message verbatim,
/// since that text is shown to the user as-is.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("No API key configured")]
    NotConfigured,

    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    Api {
        status_code: Option<u16>,
        message: String,
    },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode completion response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Stored value is malformed: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_message_verbatim() {
        let err = CompletionError::Api {
            status_code: Some(400),
            message: "API key not valid. Please pass a valid API key.".into(),
        };
        assert_eq!(
            err.to_string(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn store_error_wraps_into_top_level() {
        let err: Error = StoreError::PermissionDenied("missing or insufficient permissions".into()).into();
        assert!(err.to_string().contains("Permission denied"));
        assert!(err.to_string().contains("insufficient"));
    }

    #[test]
    fn permission_denied_is_detected() {
        assert!(StoreError::PermissionDenied("x".into()).is_permission_denied());
        assert!(!StoreError::Unavailable("x".into()).is_permission_denied());
    }
}

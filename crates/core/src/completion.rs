//! Completion endpoint contract.
//!
//! A single-turn request: one combined prompt in, one reply text out. The
//! reply text is optional because the endpoint may answer with a payload that
//! lacks the expected shape; callers degrade that to a fallback reply rather
//! than treating it as an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// A completion request.
#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Persona, retrieval context and question combined
    pub prompt: String,

    /// The shared API key read from the config document
    pub api_key: String,
}

impl std::fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("prompt_chars", &self.prompt.chars().count())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// A completion reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionReply {
    /// `candidates[0].content.parts[0].text`, when present
    pub text: Option<String>,

    /// The model that served the request
    pub model: String,
}

/// The core CompletionClient trait.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the prompt and wait for the reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, CompletionError>;
}

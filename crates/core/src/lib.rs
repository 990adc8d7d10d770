//! # Swarm Board Core
//!
//! Domain types, retrieval scoring, and service traits for the Swarm Board
//! knowledge chat widget. This crate has **no I/O of its own**. The document
//! store, identity service, completion endpoint and local storage are all
//! traits here, implemented in their respective crates.
//!
//! ## Layout
//!
//! - [`keywords`] and [`retrieval`] hold the only real algorithmic work: the
//!   keyword-overlap scorer that picks which knowledge items are quoted to
//!   the model.
//! - [`store`], [`identity`], [`completion`] and [`storage`] describe the
//!   external collaborators as request/response or subscribe/notify contracts.

pub mod completion;
pub mod error;
pub mod identity;
pub mod keywords;
pub mod knowledge;
pub mod message;
pub mod retrieval;
pub mod storage;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use completion::{CompletionClient, CompletionReply, CompletionRequest};
pub use error::{Error, Result};
pub use identity::{AuthState, IdentityService, SessionHandle};
pub use keywords::extract_keywords;
pub use knowledge::{Category, KnowledgeDraft, KnowledgeItem};
pub use message::{Message, Role};
pub use retrieval::{ScoredItem, build_context};
pub use storage::KeyValueStorage;
pub use store::{ConfigPatch, DocumentStore, SharedConfig, Subscription};

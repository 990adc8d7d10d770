//! Backends for the Swarm Board external collaborators.
//!
//! - [`InMemoryStore`] / [`FileStore`] implement `DocumentStore` with
//!   `watch`-based live subscriptions.
//! - [`AnonymousIdentity`] implements `IdentityService`.
//! - [`MemoryStorage`] / [`FileStorage`] implement `KeyValueStorage` for
//!   chat history.

pub mod file_backend;
pub mod identity;
pub mod in_memory;
pub mod local_storage;

pub use file_backend::FileStore;
pub use identity::AnonymousIdentity;
pub use in_memory::{AccessRules, Documents, InMemoryStore};
pub use local_storage::{FileStorage, MemoryStorage};

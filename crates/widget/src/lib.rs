//! The Swarm Board chat widget.
//!
//! A [`Widget`] is built from an explicitly constructed [`ClientContext`]
//! (document store, identity service, completion client, local storage) and
//! a set of [`WidgetOptions`]. Starting it:
//!
//! 1. **Signs in** anonymously; the session handle gates every store call
//! 2. **Subscribes** to the knowledge collection and the config document
//! 3. **Loads** the persisted chat history (or seeds the welcome message)
//!
//! From there the [`ChatSession`] answers questions by scoring the cached
//! knowledge base, assembling a prompt and calling the completion endpoint,
//! while the [`AdminPanel`] manages knowledge records and the shared API key
//! behind the [`AdminGate`].

pub mod admin;
pub mod chat;
pub mod context;
pub mod gate;
pub mod history;
pub mod options;
pub mod prompt;
pub mod view;
pub mod widget;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use admin::{AdminError, AdminPanel, ApiKeyStatus};
pub use chat::{ChatSession, FALLBACK_REPLY, SYSTEM_OFFLINE, SendRejected};
pub use context::ClientContext;
pub use gate::AdminGate;
pub use history::{ChatHistory, HISTORY_KEY, WELCOME_MESSAGE};
pub use options::{Variant, WidgetOptions};
pub use prompt::{DEFAULT_PERSONA, PromptAssembler};
pub use view::LiveView;
pub use widget::{Widget, WidgetStatus};

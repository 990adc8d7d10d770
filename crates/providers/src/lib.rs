//! Completion endpoint clients for Swarm Board.
//!
//! All clients implement the `swarmboard_core::CompletionClient` trait.

pub mod gemini;

pub use gemini::GeminiClient;

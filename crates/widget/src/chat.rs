//! The chat session: the message-send handler.
//!
//! # Flow
//!
//! 1. Reject empty input, or any send while a reply is pending
//! 2. Append the user message and raise the pending flag
//! 3. Without an API key, answer with the "System Offline" notice
//! 4. Otherwise score the cached knowledge base, assemble the prompt and
//!    call the completion endpoint
//! 5. Append exactly one `ai` or `system` message and drop the flag
//!
//! Failures never escape `send`; they become `system` messages in the
//! conversation, and the user can simply send again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use swarmboard_core::completion::{CompletionClient, CompletionRequest};
use swarmboard_core::knowledge::KnowledgeItem;
use swarmboard_core::message::Message;
use swarmboard_core::store::SharedConfig;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::history::ChatHistory;
use crate::prompt::PromptAssembler;
use crate::view::LiveView;

/// Shown instead of calling the endpoint when no API key is configured.
pub const SYSTEM_OFFLINE: &str =
    "System Offline: The AI service is not configured yet. Please ask an admin to set the API key.";

/// Shown when the endpoint answers without any reply text.
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response. Please try again.";

/// Why a send was refused before anything was appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendRejected {
    #[error("Message is empty")]
    Empty,
    #[error("A reply is still pending")]
    Pending,
}

/// Lowers the pending flag when dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ChatSession {
    completion: Arc<dyn CompletionClient>,
    knowledge: Arc<LiveView<Vec<KnowledgeItem>>>,
    config: Arc<LiveView<Option<SharedConfig>>>,
    prompt: PromptAssembler,
    history: ChatHistory,
    messages: Mutex<Vec<Message>>,
    pending: AtomicBool,
}

impl ChatSession {
    /// Open a session, restoring the stored conversation.
    pub async fn open(
        completion: Arc<dyn CompletionClient>,
        knowledge: Arc<LiveView<Vec<KnowledgeItem>>>,
        config: Arc<LiveView<Option<SharedConfig>>>,
        prompt: PromptAssembler,
        history: ChatHistory,
    ) -> Self {
        let messages = history.load().await;
        Self {
            completion,
            knowledge,
            config,
            prompt,
            history,
            messages: Mutex::new(messages),
            pending: AtomicBool::new(false),
        }
    }

    /// A copy of the conversation so far.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Send one question and wait for the reply message.
    pub async fn send(&self, input: &str) -> Result<Message, SendRejected> {
        let question = input.trim();
        if question.is_empty() {
            return Err(SendRejected::Empty);
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Send rejected while a reply is pending");
            return Err(SendRejected::Pending);
        }
        let _pending = PendingGuard(&self.pending);

        self.append(Message::user(question)).await;
        let reply = self.answer(question).await;
        self.append(reply.clone()).await;
        Ok(reply)
    }

    /// Reset to the seeded conversation, deleting stored history.
    pub async fn clear_history(&self) -> Vec<Message> {
        let fresh = self.history.clear().await;
        *self.messages.lock().await = fresh.clone();
        info!("Chat history cleared");
        fresh
    }

    async fn append(&self, message: Message) {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        self.history.save(&messages).await;
    }

    async fn answer(&self, question: &str) -> Message {
        let api_key = self
            .config
            .current()
            .await
            .and_then(|config| config.api_key().map(str::to_string));
        let Some(api_key) = api_key else {
            warn!("No API key configured, completion skipped");
            return Message::system(SYSTEM_OFFLINE);
        };

        let knowledge = self.knowledge.current().await;
        let prompt = self.prompt.assemble(&knowledge, question);
        debug!(
            client = %self.completion.name(),
            knowledge = knowledge.len(),
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        match self
            .completion
            .complete(CompletionRequest { prompt, api_key })
            .await
        {
            Ok(reply) => match reply.text.filter(|text| !text.is_empty()) {
                Some(text) => Message::ai(text),
                None => {
                    warn!(model = %reply.model, "Completion returned no text, using fallback");
                    Message::ai(FALLBACK_REPLY)
                }
            },
            Err(e) => {
                warn!(error = %e, "Completion failed");
                Message::system(e.to_string())
            }
        }
    }
}

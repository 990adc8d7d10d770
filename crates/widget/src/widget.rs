//! Widget startup and wiring.

use std::sync::Arc;
use swarmboard_core::identity::{AuthState, SessionHandle};
use swarmboard_core::knowledge::KnowledgeItem;
use swarmboard_core::store::SharedConfig;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::admin::{AdminPanel, ApiKeyStatus};
use crate::chat::ChatSession;
use crate::context::ClientContext;
use crate::gate::AdminGate;
use crate::history::ChatHistory;
use crate::options::{Variant, WidgetOptions};
use crate::prompt::PromptAssembler;
use crate::view::LiveView;

/// A snapshot of the widget's connection and data state.
#[derive(Debug, Clone)]
pub struct WidgetStatus {
    pub variant: Variant,
    pub uid: Option<String>,
    pub auth_warning: Option<String>,
    pub store: String,
    pub completion: String,
    pub knowledge_count: usize,
    pub api_key: ApiKeyStatus,
    pub persist_history: bool,
}

/// A running widget: one chat session and one admin panel over a shared
/// client context.
pub struct Widget {
    ctx: ClientContext,
    options: WidgetOptions,
    session: Option<SessionHandle>,
    auth_warning: Option<String>,
    auth: watch::Receiver<AuthState>,
    knowledge: Arc<LiveView<Vec<KnowledgeItem>>>,
    config: Arc<LiveView<Option<SharedConfig>>>,
    chat: Arc<ChatSession>,
    admin: AdminPanel,
}

impl Widget {
    /// Sign in, subscribe and restore history.
    ///
    /// Never fails. If sign-in fails the widget still starts, with an empty
    /// knowledge base, no API key and a persistent [`Widget::auth_warning`].
    pub async fn start(ctx: ClientContext, options: WidgetOptions) -> Self {
        let auth = ctx.identity.watch_auth();

        let (session, auth_warning) = match ctx.identity.sign_in_anonymously().await {
            Ok(handle) => (Some(handle), None),
            Err(e) => {
                warn!(error = %e, identity = %ctx.identity.name(), "Sign-in failed, store access disabled");
                (
                    None,
                    Some(format!(
                        "Could not connect to the knowledge base ({e}). Answers will not use project data."
                    )),
                )
            }
        };

        let (knowledge, config) = match &session {
            Some(handle) => (
                Arc::new(LiveView::new("knowledge", ctx.store.watch_knowledge(handle))),
                Arc::new(LiveView::new("config", ctx.store.watch_config(handle))),
            ),
            None => (
                Arc::new(LiveView::detached("knowledge", Vec::new())),
                Arc::new(LiveView::detached("config", None)),
            ),
        };

        let history = ChatHistory::new(ctx.storage.clone(), options.persist_history);
        let chat = Arc::new(
            ChatSession::open(
                ctx.completion.clone(),
                knowledge.clone(),
                config.clone(),
                PromptAssembler::new(options.persona.clone()),
                history,
            )
            .await,
        );

        let mut gate = AdminGate::new(options.admin_password.clone());
        if !options.clear_error_on_input {
            gate = gate.sticky_errors();
        }
        let admin = AdminPanel::new(
            gate,
            ctx.store.clone(),
            session.clone(),
            knowledge.clone(),
            config.clone(),
        );

        info!(
            variant = %options.variant,
            store = %ctx.store.name(),
            completion = %ctx.completion.name(),
            signed_in = session.is_some(),
            "Widget started"
        );

        Self {
            ctx,
            options,
            session,
            auth_warning,
            auth,
            knowledge,
            config,
            chat,
            admin,
        }
    }

    pub fn chat(&self) -> &Arc<ChatSession> {
        &self.chat
    }

    pub fn admin(&self) -> &AdminPanel {
        &self.admin
    }

    pub fn admin_mut(&mut self) -> &mut AdminPanel {
        &mut self.admin
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    /// Shown for as long as the widget runs when sign-in failed.
    pub fn auth_warning(&self) -> Option<&str> {
        self.auth_warning.as_deref()
    }

    /// The identity service's latest auth state.
    pub fn auth_state(&self) -> AuthState {
        self.auth.borrow().clone()
    }

    /// The cached knowledge base, in subscription order.
    pub async fn knowledge(&self) -> Vec<KnowledgeItem> {
        self.knowledge.current().await
    }

    /// Wait for the next knowledge push. `false` when there is none to wait for.
    pub async fn knowledge_changed(&self) -> bool {
        self.knowledge.changed().await
    }

    pub async fn status(&self) -> WidgetStatus {
        WidgetStatus {
            variant: self.options.variant,
            uid: self.session.as_ref().map(|s| s.uid.clone()),
            auth_warning: self.auth_warning.clone(),
            store: self.ctx.store.name().to_string(),
            completion: self.ctx.completion.name().to_string(),
            knowledge_count: self.knowledge.current().await.len(),
            api_key: ApiKeyStatus::from_config(self.config.current().await.as_ref()),
            persist_history: self.options.persist_history,
        }
    }
}

//! End-to-end integration tests for the Swarm Board widget.
//!
//! These tests exercise the full pipeline: admin writes reach the document
//! store, the subscription refreshes the cached knowledge base, and a chat
//! send scores it, assembles the prompt and calls the completion endpoint.

use std::sync::Arc;

use swarmboard_core::completion::{CompletionClient, CompletionReply, CompletionRequest};
use swarmboard_core::error::CompletionError;
use swarmboard_core::knowledge::Category;
use swarmboard_core::message::Role;
use swarmboard_core::retrieval::NO_MATCHES_PLACEHOLDER;
use swarmboard_core::store::{DocumentStore, namespace};
use swarmboard_providers::GeminiClient;
use swarmboard_store::{AnonymousIdentity, FileStorage, FileStore, InMemoryStore, MemoryStorage};
use swarmboard_widget::{
    ClientContext, SYSTEM_OFFLINE, Variant, WELCOME_MESSAGE, Widget, WidgetOptions,
};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Mock Completion ──────────────────────────────────────────────────────

/// A completion client that returns scripted replies in sequence.
struct ScriptedCompletion {
    replies: std::sync::Mutex<Vec<String>>,
    requests: std::sync::Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedCompletion {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, CompletionError> {
        let mut requests = self.requests.lock().unwrap();
        let replies = self.replies.lock().unwrap();
        if requests.len() >= replies.len() {
            panic!(
                "ScriptedCompletion exhausted: call #{}, have {}",
                requests.len(),
                replies.len()
            );
        }
        let text = replies[requests.len()].clone();
        requests.push(request);
        Ok(CompletionReply {
            text: Some(text),
            model: "mock".into(),
        })
    }
}

const PASSWORD: &str = "e2e-admin";

fn options(variant: Variant) -> WidgetOptions {
    WidgetOptions::for_variant(variant).with_admin_password(PASSWORD)
}

async fn admin_widget(ctx: ClientContext) -> Widget {
    let mut widget = Widget::start(ctx, options(Variant::Standard)).await;
    assert!(widget.admin_mut().gate_mut().unlock(PASSWORD));
    widget
}

// ── E2E: Admin → subscription → chat ─────────────────────────────────────

#[tokio::test]
async fn e2e_admin_knowledge_reaches_prompt() {
    let completion = Arc::new(ScriptedCompletion::new(&["Total supply is one million tokens."]));
    let ctx = ClientContext::new(
        Arc::new(InMemoryStore::new(namespace("e2e"))),
        Arc::new(AnonymousIdentity::new()),
        completion.clone(),
        Arc::new(MemoryStorage::new()),
    );
    let widget = admin_widget(ctx).await;
    let admin = widget.admin();

    admin
        .add_knowledge(Category::General, "Tokenomics", "Total supply is 1000000 tokens")
        .await
        .unwrap();
    admin
        .add_knowledge(Category::Team, "Founders", "Alice and Bob started the project")
        .await
        .unwrap();
    admin.save_api_key("AIza-e2e").await.unwrap();

    let reply = widget
        .chat()
        .send("What is the tokenomics supply?")
        .await
        .unwrap();
    assert_eq!(reply.role, Role::Ai);
    assert_eq!(reply.content, "Total supply is one million tokens.");

    let prompt = &completion.prompts()[0];
    assert!(prompt.contains("CONTEXT FROM KNOWLEDGE BASE:\n[Source: Tokenomics]\nTotal supply is 1000000 tokens"));
    assert!(!prompt.contains("Founders"));
    assert!(prompt.ends_with("USER QUESTION:\nWhat is the tokenomics supply?"));
}

#[tokio::test]
async fn e2e_unmatched_question_gets_placeholder() {
    let completion = Arc::new(ScriptedCompletion::new(&["I don't know."]));
    let ctx = ClientContext::new(
        Arc::new(InMemoryStore::new(namespace("e2e"))),
        Arc::new(AnonymousIdentity::new()),
        completion.clone(),
        Arc::new(MemoryStorage::new()),
    );
    let widget = admin_widget(ctx).await;
    widget.admin().save_api_key("AIza-e2e").await.unwrap();

    widget.chat().send("Is there a mobile app?").await.unwrap();
    assert!(completion.prompts()[0].contains(NO_MATCHES_PLACEHOLDER));
}

#[tokio::test]
async fn e2e_no_key_means_offline() {
    let completion = Arc::new(ScriptedCompletion::new(&[]));
    let ctx = ClientContext::new(
        Arc::new(InMemoryStore::new(namespace("e2e"))),
        Arc::new(AnonymousIdentity::new()),
        completion.clone(),
        Arc::new(MemoryStorage::new()),
    );
    let widget = Widget::start(ctx, options(Variant::Standard)).await;

    let reply = widget.chat().send("Hello?").await.unwrap();
    assert_eq!(reply.role, Role::System);
    assert_eq!(reply.content, SYSTEM_OFFLINE);
    assert_eq!(completion.calls(), 0);
    assert!(!widget.chat().is_pending());
}

#[tokio::test]
async fn e2e_second_client_sees_live_updates() {
    let shared = InMemoryStore::new(namespace("e2e"));
    let admin_ctx = ClientContext::new(
        Arc::new(shared.clone()),
        Arc::new(AnonymousIdentity::new()),
        Arc::new(ScriptedCompletion::new(&[])),
        Arc::new(MemoryStorage::new()),
    );
    let visitor_ctx = ClientContext::new(
        Arc::new(shared),
        Arc::new(AnonymousIdentity::new()),
        Arc::new(ScriptedCompletion::new(&[])),
        Arc::new(MemoryStorage::new()),
    );

    let admin = admin_widget(admin_ctx).await;
    let visitor = Widget::start(visitor_ctx, options(Variant::Ephemeral)).await;
    assert!(visitor.knowledge().await.is_empty());

    let (changed, id) = tokio::join!(visitor.knowledge_changed(), async {
        admin
            .admin()
            .add_knowledge(Category::Roadmap, "Mainnet", "Mainnet launches in Q3")
            .await
            .unwrap()
    });
    assert!(changed);
    let seen = visitor.knowledge().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, id);

    admin.admin().delete_knowledge(&id).await.unwrap();
    assert!(visitor.knowledge().await.is_empty());
}

// ── E2E: Persistence across restarts ────────────────────────────────────

fn file_context(dir: &TempDir, completion: Arc<dyn CompletionClient>) -> ClientContext {
    let store = FileStore::open(dir.path().join("store.json"), namespace("e2e")).unwrap();
    ClientContext::new(
        Arc::new(store),
        Arc::new(AnonymousIdentity::new()),
        completion,
        Arc::new(FileStorage::new(dir.path().join("local_storage.json"))),
    )
}

#[tokio::test]
async fn e2e_file_backends_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let widget = admin_widget(file_context(&dir, Arc::new(ScriptedCompletion::new(&["Q3."])))).await;
        widget
            .admin()
            .add_knowledge(Category::Roadmap, "Mainnet", "Mainnet launches in Q3")
            .await
            .unwrap();
        widget.admin().save_api_key("AIza-file").await.unwrap();
        widget.chat().send("When is mainnet?").await.unwrap();
    }

    let widget = Widget::start(
        file_context(&dir, Arc::new(ScriptedCompletion::new(&[]))),
        options(Variant::Standard),
    )
    .await;
    let status = widget.status().await;
    assert_eq!(status.knowledge_count, 1);
    assert!(status.api_key.is_configured());

    let contents: Vec<String> = widget
        .chat()
        .messages()
        .await
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, [WELCOME_MESSAGE, "When is mainnet?", "Q3."]);

    widget.chat().clear_history().await;
    let restarted = Widget::start(
        file_context(&dir, Arc::new(ScriptedCompletion::new(&[]))),
        options(Variant::Standard),
    )
    .await;
    assert_eq!(restarted.chat().messages().await.len(), 1);
}

#[tokio::test]
async fn e2e_ephemeral_history_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let widget = Widget::start(
            file_context(&dir, Arc::new(ScriptedCompletion::new(&[]))),
            options(Variant::Ephemeral),
        )
        .await;
        widget.chat().send("Hello?").await.unwrap();
        assert_eq!(widget.chat().messages().await.len(), 3);
    }

    let widget = Widget::start(
        file_context(&dir, Arc::new(ScriptedCompletion::new(&[]))),
        options(Variant::Ephemeral),
    )
    .await;
    assert_eq!(widget.chat().messages().await.len(), 1);
    assert!(!dir.path().join("local_storage.json").exists());
}

#[tokio::test]
async fn e2e_failed_sign_in_blocks_store() {
    let store = InMemoryStore::new(namespace("e2e"));
    let ctx = ClientContext::new(
        Arc::new(store.clone()),
        Arc::new(AnonymousIdentity::failing("anonymous auth disabled")),
        Arc::new(ScriptedCompletion::new(&[])),
        Arc::new(MemoryStorage::new()),
    );
    let mut widget = Widget::start(ctx, options(Variant::Standard)).await;

    assert!(widget.auth_warning().unwrap().contains("anonymous auth disabled"));
    widget.admin_mut().gate_mut().unlock(PASSWORD);
    let err = widget
        .admin()
        .add_knowledge(Category::General, "Blocked", "Should not land")
        .await
        .unwrap_err();
    assert!(err.user_message().contains("Not connected"));
    assert!(store.snapshot().await.knowledge.is_empty());
    assert_eq!(store.name(), "memory");
}

// ── E2E: Real Gemini client against a mock endpoint ─────────────────────

async fn gemini_widget(server: &MockServer) -> Widget {
    let gemini = GeminiClient::new("gemini-2.5-flash").with_base_url(server.uri());
    let ctx = ClientContext::new(
        Arc::new(InMemoryStore::new(namespace("e2e"))),
        Arc::new(AnonymousIdentity::new()),
        Arc::new(gemini),
        Arc::new(MemoryStorage::new()),
    );
    let widget = admin_widget(ctx).await;
    widget
        .admin()
        .add_knowledge(Category::Technical, "Consensus", "The chain uses proof of stake consensus")
        .await
        .unwrap();
    widget.admin().save_api_key("AIza-e2e").await.unwrap();
    widget
}

#[tokio::test]
async fn e2e_gemini_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "AIza-e2e"))
        .and(body_string_contains("[Source: Consensus]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "It uses proof of stake."}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let widget = gemini_widget(&server).await;
    let reply = widget
        .chat()
        .send("Which consensus does the chain use?")
        .await
        .unwrap();
    assert_eq!(reply.role, Role::Ai);
    assert_eq!(reply.content, "It uses proof of stake.");
}

#[tokio::test]
async fn e2e_gemini_error_is_a_system_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let widget = gemini_widget(&server).await;
    let reply = widget.chat().send("consensus?").await.unwrap();
    assert_eq!(reply.role, Role::System);
    assert_eq!(reply.content, "API key not valid. Please pass a valid API key.");

    let messages = widget.chat().messages().await;
    assert_eq!(messages.len(), 3);
    assert!(!widget.chat().is_pending());
}

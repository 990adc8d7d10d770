//! Builds the client context and widget from configuration.

use std::sync::Arc;
use swarmboard_config::AppConfig;
use swarmboard_core::store::{self, DocumentStore};
use swarmboard_providers::GeminiClient;
use swarmboard_store::{AnonymousIdentity, FileStorage, FileStore, InMemoryStore};
use swarmboard_widget::{ClientContext, Widget, WidgetOptions};

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Wire the configured backends into a client context.
pub fn build_context(config: &AppConfig) -> Result<ClientContext, Box<dyn std::error::Error>> {
    let namespace = store::namespace(&config.app_id);
    let document_store: Arc<dyn DocumentStore> = match config.store.backend.as_str() {
        "memory" => Arc::new(InMemoryStore::new(namespace)),
        _ => Arc::new(
            FileStore::open(config.store_path(), namespace)
                .map_err(|e| format!("Failed to open document store: {e}"))?,
        ),
    };

    tracing::debug!(
        store = %document_store.name(),
        app_id = %config.app_id,
        "Client context ready"
    );
    Ok(ClientContext::new(
        document_store,
        Arc::new(AnonymousIdentity::new()),
        Arc::new(GeminiClient::from_config(&config.completion)),
        Arc::new(FileStorage::new(config.history_path())),
    ))
}

/// Load config, wire the context and start the widget.
pub async fn start() -> Result<(AppConfig, Widget), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let options = WidgetOptions::from_config(&config)?;
    let ctx = build_context(&config)?;
    let widget = Widget::start(ctx, options).await;

    if let Some(warning) = widget.auth_warning() {
        eprintln!("  ⚠️  {warning}");
    }
    Ok((config, widget))
}

/// Unlock the admin panel or fail with the gate's message.
pub fn unlock(widget: &mut Widget, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    if widget.admin_mut().gate_mut().unlock(password) {
        Ok(())
    } else {
        Err("Incorrect admin password".into())
    }
}

//! Configuration loading, validation, and management for Swarm Board.
//!
//! Loads configuration from `~/.swarmboard/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.swarmboard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application id, used to build the store namespace
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Widget presentation and history settings
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Completion endpoint settings
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Document store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Local chat-history storage settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Admin panel settings
    #[serde(default)]
    pub admin: AdminConfig,
}

fn default_app_id() -> String {
    "swarm-board".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &str) -> &'static str {
    if s.is_empty() { "None" } else { "[REDACTED]" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// "standard", "ephemeral" or "branded"
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Override the persona instruction prepended to every prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    /// Logo asset shown in the header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Override the variant's history persistence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_history: Option<bool>,

    /// Clear the wrong-password flag as soon as the password input changes
    #[serde(default = "default_true")]
    pub clear_error_on_input: bool,
}

fn default_variant() -> String {
    "standard".into()
}
fn default_true() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            persona: None,
            logo: None,
            persist_history: None,
            clear_error_on_input: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "file" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Path of the JSON store file (file backend only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn default_store_backend() -> String {
    "file".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path of the local key-value storage file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_password() -> String {
    "swarmadmin".into()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &redact(&self.password))
            .finish()
    }
}

/// Configuration blob injected by a hosting sandbox (preview deployments).
///
/// Read from `SWARMBOARD_INJECTED_CONFIG` as JSON; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectedConfig {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub store_backend: Option<String>,
    #[serde(default)]
    pub store_path: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.swarmboard/config.toml).
    ///
    /// Environment overrides, applied after the file:
    /// - `SWARMBOARD_INJECTED_CONFIG` (JSON blob, see [`InjectedConfig`])
    /// - `SWARMBOARD_MODEL`
    /// - `SWARMBOARD_ADMIN_PASSWORD`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(blob) = std::env::var("SWARMBOARD_INJECTED_CONFIG") {
            config.apply_injected(&blob)?;
        }

        if let Ok(model) = std::env::var("SWARMBOARD_MODEL") {
            config.completion.model = model;
        }

        if let Ok(password) = std::env::var("SWARMBOARD_ADMIN_PASSWORD") {
            config.admin.password = password;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Overlay an injected JSON configuration blob.
    pub fn apply_injected(&mut self, blob: &str) -> Result<(), ConfigError> {
        let injected: InjectedConfig = serde_json::from_str(blob)
            .map_err(|e| ConfigError::InjectedConfig(e.to_string()))?;

        if let Some(app_id) = injected.app_id {
            self.app_id = app_id;
        }
        if let Some(backend) = injected.store_backend {
            self.store.backend = backend;
        }
        if let Some(path) = injected.store_path {
            self.store.path = Some(path);
        }
        tracing::debug!(app_id = %self.app_id, backend = %self.store.backend, "Applied injected configuration");
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".swarmboard")
    }

    /// Resolved path of the JSON document store.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::config_dir().join("store.json"))
    }

    /// Resolved path of the local key-value storage file.
    pub fn history_path(&self) -> PathBuf {
        self.history
            .path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::config_dir().join("local_storage.json"))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::ValidationError("app_id must not be empty".into()));
        }

        if !matches!(self.store.backend.as_str(), "file" | "memory") {
            return Err(ConfigError::ValidationError(format!(
                "store.backend must be \"file\" or \"memory\", got \"{}\"",
                self.store.backend
            )));
        }

        if !matches!(self.widget.variant.as_str(), "standard" | "ephemeral" | "branded") {
            return Err(ConfigError::ValidationError(format!(
                "widget.variant must be one of standard, ephemeral, branded; got \"{}\"",
                self.widget.variant
            )));
        }

        if self.completion.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "completion.timeout_secs must be > 0".into(),
            ));
        }

        if self.admin.password.is_empty() {
            return Err(ConfigError::ValidationError(
                "admin.password must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            widget: WidgetConfig::default(),
            completion: CompletionConfig::default(),
            store: StoreConfig::default(),
            history: HistoryConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid injected configuration: {0}")]
    InjectedConfig(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

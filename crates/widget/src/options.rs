//! Widget variants and presentation options.
//!
//! The three historical widgets differ only in persona text, logo and
//! whether the chat history survives a restart, so they are one
//! implementation configured by [`WidgetOptions`].

use std::str::FromStr;
use swarmboard_config::AppConfig;
use swarmboard_core::error::Error;

use crate::prompt::DEFAULT_PERSONA;

/// Persona for the branded widget.
pub const BRANDED_PERSONA: &str = "You are Swarm, the official guide to The Swarm Board. \
Answer only from the knowledge base context below. \
If it does not cover the question, say you don't know and suggest asking the team.";

/// Logo shown by the branded widget when none is configured.
pub const BRANDED_LOGO: &str = "assets/swarm-board-logo.svg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Persistent history, default persona
    #[default]
    Standard,
    /// Memory-only history
    Ephemeral,
    /// Custom logo and persona, persistent history
    Branded,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Ephemeral => "ephemeral",
            Variant::Branded => "branded",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Variant::Standard),
            "ephemeral" => Ok(Variant::Ephemeral),
            "branded" => Ok(Variant::Branded),
            other => Err(Error::Config {
                message: format!("unknown widget variant \"{other}\""),
            }),
        }
    }
}

#[derive(Clone)]
pub struct WidgetOptions {
    pub variant: Variant,
    pub persona: String,
    pub logo: Option<String>,
    pub persist_history: bool,
    pub clear_error_on_input: bool,
    pub admin_password: String,
}

impl WidgetOptions {
    /// Defaults for a variant.
    pub fn for_variant(variant: Variant) -> Self {
        let (persona, logo, persist_history) = match variant {
            Variant::Standard => (DEFAULT_PERSONA, None, true),
            Variant::Ephemeral => (DEFAULT_PERSONA, None, false),
            Variant::Branded => (BRANDED_PERSONA, Some(BRANDED_LOGO.to_string()), true),
        };
        Self {
            variant,
            persona: persona.to_string(),
            logo,
            persist_history,
            clear_error_on_input: true,
            admin_password: swarmboard_config::AdminConfig::default().password,
        }
    }

    /// Variant defaults with the `[widget]` and `[admin]` overrides applied.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let mut options = Self::for_variant(config.widget.variant.parse()?);
        if let Some(persona) = &config.widget.persona {
            options.persona = persona.clone();
        }
        if let Some(logo) = &config.widget.logo {
            options.logo = Some(logo.clone());
        }
        if let Some(persist) = config.widget.persist_history {
            options.persist_history = persist;
        }
        options.clear_error_on_input = config.widget.clear_error_on_input;
        options.admin_password = config.admin.password.clone();
        Ok(options)
    }

    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = password.into();
        self
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::for_variant(Variant::Standard)
    }
}

impl std::fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("variant", &self.variant)
            .field("persona_chars", &self.persona.chars().count())
            .field("logo", &self.logo)
            .field("persist_history", &self.persist_history)
            .field("clear_error_on_input", &self.clear_error_on_input)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

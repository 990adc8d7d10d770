//! Gemini `generateContent` client.
//!
//! Sends a single user turn:
//!
//! ```json
//! {"contents": [{"role": "user", "parts": [{"text": "<prompt>"}]}]}
//! ```
//!
//! with the API key as the `key` query parameter. The response either carries
//! `error.message` (surfaced verbatim) or
//! `candidates[0].content.parts[0].text`. A response without that text is
//! not an error: the reply comes back with `text: None`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swarmboard_config::CompletionConfig;
use swarmboard_core::completion::{CompletionClient, CompletionReply, CompletionRequest};
use swarmboard_core::error::CompletionError;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini completion client.
pub struct GeminiClient {
    name: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client for the given model against the public endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: model.into(),
            client: build_http_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build from the `[completion]` config section.
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            name: "gemini".into(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client: build_http_client(config.timeout_secs),
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }

    /// Interpret an HTTP status and body as a reply or an error.
    fn parse_response(&self, status: u16, body: &str) -> Result<CompletionReply, CompletionError> {
        let success = (200..300).contains(&status);

        let parsed: GenerateContentResponse = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) if success => {
                return Err(CompletionError::Decode(e.to_string()));
            }
            Err(_) => {
                return Err(CompletionError::Api {
                    status_code: Some(status),
                    message: format!("HTTP {status}: {body}"),
                });
            }
        };

        if let Some(error) = parsed.error {
            let message = error
                .message
                .unwrap_or_else(|| format!("HTTP {status}: unknown error"));
            return Err(CompletionError::Api {
                status_code: Some(status),
                message,
            });
        }

        if !success {
            return Err(CompletionError::Api {
                status_code: Some(status),
                message: format!("HTTP {status}: {body}"),
            });
        }

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        if text.is_none() {
            debug!(model = %self.model, "Gemini response had no candidate text");
        }

        Ok(CompletionReply {
            text,
            model: parsed.model_version.unwrap_or_else(|| self.model.clone()),
        })
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, CompletionError> {
        if request.api_key.trim().is_empty() {
            return Err(CompletionError::NotConfigured);
        }

        let body = Self::request_body(&request.prompt);

        debug!(provider = "gemini", model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", request.api_key.trim())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;

        let result = self.parse_response(status, &text);
        if let Err(ref e) = result {
            warn!(status, error = %e, "Gemini completion failed");
        }
        result
    }
}

/// Map a reqwest failure, dropping the URL so the key never reaches logs or UI.
fn transport_error(e: reqwest::Error) -> CompletionError {
    let e = e.without_url();
    if e.is_timeout() {
        CompletionError::Timeout(e.to_string())
    } else {
        CompletionError::Network(e.to_string())
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

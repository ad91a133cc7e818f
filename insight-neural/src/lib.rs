use anyhow::Context;
use async_trait::async_trait;
use insight_core::session::{HistoryEntry, Role};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

pub mod config;
pub mod error;

pub use config::{ConfigError, RelayConfig};
pub use error::RelayError;

const ERROR_BODY_LIMIT: usize = 200;

/// The interface for any agent backend.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Send one user message with the conversation so far; returns the
    /// agent's reply text.
    async fn send_message(
        &self,
        user_message: &str,
        history: &[HistoryEntry],
        session_id: Option<&str>,
    ) -> Result<String, RelayError>;
}

/// Request body the webhook expects.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest<'a> {
    pub chat_input: &'a str,
    /// Prior history plus the new user message as the final entry.
    pub messages: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

impl<'a> RelayRequest<'a> {
    pub fn new(user_message: &'a str, history: &[HistoryEntry], session_id: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend_from_slice(history);
        messages.push(HistoryEntry {
            role: Role::User,
            content: user_message.to_string(),
        });

        Self {
            chat_input: user_message,
            messages,
            session_id: session_id.filter(|id| !id.is_empty()),
        }
    }
}

/// Response body from the webhook. Only `output` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

/// Direct HTTP client for the automation webhook.
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl WebhookClient {
    pub fn new(config: &RelayConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let endpoint = config.endpoint();

        info!("Relay connected to: {} (timeout {:?})", endpoint, config.timeout);

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, payload: &RelayRequest<'_>) -> Result<String, RelayError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
                body: truncate_at_char_boundary(&text, ERROR_BODY_LIMIT).to_string(),
            });
        }

        let parsed: RelayResponse =
            serde_json::from_str(&text).map_err(|e| RelayError::Decode(e.to_string()))?;

        match parsed.output {
            Some(output) if !output.is_empty() => Ok(output),
            _ => Err(RelayError::EmptyOutput),
        }
    }
}

#[async_trait]
impl AgentBackend for WebhookClient {
    async fn send_message(
        &self,
        user_message: &str,
        history: &[HistoryEntry],
        session_id: Option<&str>,
    ) -> Result<String, RelayError> {
        let payload = RelayRequest::new(user_message, history, session_id);
        debug!(
            "Relaying message: chars={} history={} session={:?}",
            user_message.chars().count(),
            history.len(),
            payload.session_id
        );

        let result = self.post(&payload).await;
        if let Err(e) = &result {
            warn!("Relay failed: {}", e);
        }
        result
    }
}

fn truncate_at_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const WEBHOOK_URL_VAR: &str = "N8N_WEBHOOK_URL";
const BASE_URL_VAR: &str = "N8N_BASE_URL";
const TIMEOUT_VAR: &str = "N8N_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("N8N_WEBHOOK_URL environment variable is not set")]
    MissingWebhookUrl,
    #[error("N8N_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Where and how long to talk to the webhook agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub webhook_url: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl RelayConfig {
    pub fn new(webhook_url: &str) -> Self {
        Self {
            webhook_url: webhook_url.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the `N8N_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let webhook_url = get(WEBHOOK_URL_VAR).ok_or(ConfigError::MissingWebhookUrl)?;
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            webhook_url: webhook_url.trim().to_string(),
            base_url: base_url.trim().to_string(),
            timeout,
        })
    }

    /// The URL requests are posted to. Bare paths hang off `base_url`.
    pub fn endpoint(&self) -> String {
        if self.webhook_url.starts_with("http://") || self.webhook_url.starts_with("https://") {
            return self.webhook_url.clone();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.webhook_url.trim_start_matches('/')
        )
    }
}

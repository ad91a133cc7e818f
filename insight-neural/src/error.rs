use thiserror::Error;

/// Failures of one relay round trip. The display text is what the user
/// ends up reading in the substitute assistant message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Request timeout: n8n agent took too long to respond")]
    Timeout,
    #[error("No response received from n8n agent")]
    EmptyOutput,
    #[error("Failed to communicate with n8n agent: {0}")]
    Transport(String),
    #[error("n8n agent returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("n8n agent returned an unreadable response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Transport(err.to_string())
        }
    }
}

//! Error types for the ImageBridge client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the ImageBridge client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The bridge node carries no payload; nothing was sent
    #[error("no image payload to send; execute the bridge node first")]
    EmptyPayload,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Submission was accepted but the response carried no job handle
    #[error("server response carried no prompt_id")]
    MissingPromptId,

    /// The job resolved but no output record carried an image payload
    #[error("job completed but no image payload found in outputs")]
    NoImage,

    /// The poll budget ran out before the job resolved
    #[error("timed out waiting for result after {0} poll attempt(s)")]
    Timeout(u32),

    /// The caller cancelled the poll
    #[error("polling was cancelled")]
    Cancelled,
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error means the server could not be reached at all
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect() || e.is_timeout())
    }

    /// Whether this error is the poll-budget timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Whether the failure happened before anything reached the server
    pub fn is_local(&self) -> bool {
        matches!(self, Self::EmptyPayload)
    }
}

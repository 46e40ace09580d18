//! Send lifecycle types
//!
//! A send moves through `Idle → Submitted → Polling` and ends in exactly one
//! terminal state: the result was found, the job finished without an image,
//! the poll budget ran out, submission failed, or the caller cancelled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-issued job handle, used as the polling key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptId(String);

impl PromptId {
    /// Wraps a server-issued identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PromptId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PromptId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// State of a send operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendStatus {
    Idle,
    Submitted,
    Polling,
    Found,
    NoImage,
    TimedOut,
    SubmitFailed,
    Cancelled,
}

impl SendStatus {
    /// Whether the send can make no further progress from this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Found | Self::NoImage | Self::TimedOut | Self::SubmitFailed | Self::Cancelled
        )
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitted => "submitted",
            Self::Polling => "polling",
            Self::Found => "found",
            Self::NoImage => "no-image",
            Self::TimedOut => "timed-out",
            Self::SubmitFailed => "submit-failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a polling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The job resolved and an encoded image payload was found
    Found(String),
    /// The job resolved but no output record carried an image payload
    NoImage,
    /// The poll budget was exhausted before the job resolved
    TimedOut,
    /// The caller cancelled the poll
    Cancelled,
}

impl From<&PollOutcome> for SendStatus {
    fn from(outcome: &PollOutcome) -> Self {
        match outcome {
            PollOutcome::Found(_) => SendStatus::Found,
            PollOutcome::NoImage => SendStatus::NoImage,
            PollOutcome::TimedOut => SendStatus::TimedOut,
            PollOutcome::Cancelled => SendStatus::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!SendStatus::Idle.is_terminal());
        assert!(!SendStatus::Submitted.is_terminal());
        assert!(!SendStatus::Polling.is_terminal());
        assert!(SendStatus::Found.is_terminal());
        assert!(SendStatus::NoImage.is_terminal());
        assert!(SendStatus::TimedOut.is_terminal());
        assert!(SendStatus::SubmitFailed.is_terminal());
        assert!(SendStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_from_outcome() {
        assert_eq!(
            SendStatus::from(&PollOutcome::Found("img".to_string())),
            SendStatus::Found
        );
        assert_eq!(SendStatus::from(&PollOutcome::NoImage), SendStatus::NoImage);
        assert_eq!(
            SendStatus::from(&PollOutcome::TimedOut),
            SendStatus::TimedOut
        );
        assert_eq!(
            SendStatus::from(&PollOutcome::Cancelled),
            SendStatus::Cancelled
        );
    }

    #[test]
    fn test_prompt_id_display() {
        let id = PromptId::new("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_prompt_id_serializes_as_plain_string() {
        let id = PromptId::new("abc-123");
        assert_eq!(serde_json::to_value(&id).unwrap(), "abc-123");
    }
}

//! Error types for Compass.

use thiserror::Error;

/// Input validation failures.
///
/// These never leave the controller: a failed validation surfaces as a
/// rendered assistant-role entry, not as an error to the caller. The
/// display strings are the user-facing text of that entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a message.")]
    Empty,

    #[error("Your message is too long. Please keep it under {max} characters.")]
    TooLong { max: usize },
}

/// Primary error type for all Compass operations.
#[derive(Error, Debug)]
pub enum CompassError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Broad error category for routing recovery behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected input; recovered by rendering the validation message.
    Validation,
    /// Network failure, non-success status, undecodable payload, or a
    /// missing session token; recovered by rendering a generic apology.
    Transport,
    Configuration,
    Unknown,
}

impl CompassError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Api { .. }
            | Self::Network(_)
            | Self::Serialization(_)
            | Self::Authentication(_) => ErrorCategory::Transport,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::InvalidState(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this is a transport-class failure.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    /// Detail string suitable for appending to a user-facing apology.
    ///
    /// Only service-delivered text qualifies; raw transport internals are
    /// withheld.
    pub fn user_detail(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CompassError>;

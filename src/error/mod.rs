//! Error types for Memoh.

pub mod unified;

pub use unified::{ErrorBody, ErrorCategory, RecoverySuggestion};

use thiserror::Error;

use crate::capability::ActionKind;

/// Message used when a failed response carries no usable error body.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Chat failed";

/// Primary error type for all Memoh operations.
#[derive(Error, Debug)]
pub enum MemohError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    /// Application error reported by the producer inside the event stream.
    #[error("{0}")]
    Remote(String),

    #[error("Action not allowed: {0}")]
    ActionNotAllowed(ActionKind),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Dispatch to {platform} failed: {message}")]
    Dispatch { platform: String, message: String },

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Subagent error: {0}")]
    Subagent(String),
}

impl MemohError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::Stream(_) | Self::Remote(_) => ErrorCategory::Stream,
            Self::ActionNotAllowed(_) => ErrorCategory::Permission,
            Self::Storage(_) | Self::Dispatch { .. } => ErrorCategory::Collaborator,
            Self::ToolExecution { .. } | Self::Subagent(_) => ErrorCategory::ToolExecution,
            Self::Io(_) | Self::InvalidArgument(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::Login,
            ErrorCategory::RateLimit
            | ErrorCategory::Network
            | ErrorCategory::Server => RecoverySuggestion::RetryWithBackoff,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Permission => RecoverySuggestion::RequestCapability,
            ErrorCategory::ToolExecution => RecoverySuggestion::CheckToolImplementation,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MemohError>;

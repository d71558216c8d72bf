//! Unified error classification and the typed transport error body.

use serde::Deserialize;

use super::{MemohError, DEFAULT_FAILURE_MESSAGE};

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Configuration,
    Serialization,
    Stream,
    Permission,
    Collaborator,
    ToolExecution,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryWithBackoff,
    Login,
    CheckConfiguration,
    RequestCapability,
    CheckToolImplementation,
    ContactSupport,
}

/// Error body returned by the agent API for a failed request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parse a raw response body. Anything that is not the expected shape
    /// yields an empty body.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// The message to surface, falling back to a generic failure.
    pub fn message(&self) -> String {
        match self.error.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Map a non-success HTTP response to an error.
pub fn status_to_error(status: u16, body: &str) -> MemohError {
    let message = ErrorBody::parse(body).message();
    match status {
        401 | 403 => MemohError::Authentication(message),
        _ => MemohError::api(status, message),
    }
}

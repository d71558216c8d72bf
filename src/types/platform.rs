//! Output channels and external tool connections.

use serde::{Deserialize, Serialize};

/// Message handed to a platform's dispatch primitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMessage {
    pub message: String,
    /// The user on whose behalf the message is sent.
    pub user_id: String,
}

/// Message content as supplied by the agent, before identity is bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub message: String,
}

impl OutgoingMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An external tool or resource (e.g. an MCP server) registered by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolConnection {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub config: serde_json::Value,
}

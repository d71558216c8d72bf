//! Long-term memory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// One completed conversational turn, as persisted by the memory store.
///
/// Units are append-only: the store never mutates one after it is added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryUnit {
    pub messages: Vec<ChatMessage>,
    pub timestamp: DateTime<Utc>,
    /// Owning user id.
    pub user: String,
}

impl MemoryUnit {
    /// A unit stamped with the current time.
    pub fn new(user: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            timestamp: Utc::now(),
            user: user.into(),
        }
    }
}

/// A ranked memory search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemorySearchHit {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub similarity: f64,
}

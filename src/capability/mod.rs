//! Capability composition: identity-bound access to memory, scheduling,
//! platform delivery and tool connections for one agent turn.

pub mod composer;
pub mod in_memory;
pub mod providers;
pub mod tools;

pub use composer::{CapabilityComposer, CapabilitySet, ComposeRequest, FinishHook};
pub use providers::{ConnectionRegistry, MemoryStore, PlatformRegistry, ScheduleStore};
pub use tools::capability_tools;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::Result;
use crate::types::{ChatMessage, MemorySearchHit, NewSchedule, OutgoingMessage, ScheduleView};

/// An action the agent may be allowed to take.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    WebSearch,
    SendMessage,
    ReadMemory,
    SearchMemory,
    /// Persist the finished turn to long-term memory.
    SaveMemory,
    GetSchedules,
    Schedule,
    RemoveSchedule,
    Subagent,
    UseConnections,
}

impl ActionKind {
    /// Every action; the allowlist of a top-level agent.
    pub fn all() -> HashSet<Self> {
        Self::iter().collect()
    }
}

/// The capability surface an agent loop invokes during a turn.
///
/// Every call is already bound to one user; callers never pass an identity.
/// Calls outside the allowlist fail with
/// [`MemohError::ActionNotAllowed`](crate::error::MemohError::ActionNotAllowed)
/// without touching any collaborator.
#[async_trait]
pub trait Capabilities: Send + Sync {
    fn user_id(&self) -> &str;

    fn allowed_actions(&self) -> &HashSet<ActionKind>;

    fn allows(&self, action: ActionKind) -> bool {
        self.allowed_actions().contains(&action)
    }

    async fn send_message(&self, platform: &str, message: OutgoingMessage) -> Result<()>;

    async fn read_memory(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> Result<Vec<ChatMessage>>;

    async fn search_memory(&self, query: &str) -> Result<Vec<MemorySearchHit>>;

    /// Close the turn: persist it, then run the caller's hook.
    async fn finish(&self, messages: Vec<ChatMessage>) -> Result<()>;

    async fn get_schedules(&self) -> Result<Vec<ScheduleView>>;

    async fn remove_schedule(&self, id: &str) -> Result<()>;

    async fn schedule(&self, schedule: NewSchedule) -> Result<()>;
}

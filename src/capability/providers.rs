//! Collaborator interfaces consumed by the composer.
//!
//! Implementations live with the storage engines, scheduler and platform
//! bindings; the composer only binds a user identity into their calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{
    ChatMessage, MemorySearchHit, MemoryUnit, NewSchedule, PlatformMessage, Schedule,
    ToolConnection,
};

/// Long-term conversational memory.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Append one unit to the user's log.
    async fn add_memory(&self, unit: MemoryUnit) -> Result<()>;

    /// Rank stored memory against `query`, most similar first.
    async fn search_memory(&self, query: &str, user_id: &str) -> Result<Vec<MemorySearchHit>>;

    /// Messages stored between `from` and `to` (inclusive).
    async fn filter_by_timestamp(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        user_id: &str,
    ) -> Result<Vec<ChatMessage>>;
}

/// Scheduled task storage.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn get_active_schedules(&self, user_id: &str) -> Result<Vec<Schedule>>;

    async fn create_schedule(&self, user_id: &str, schedule: NewSchedule) -> Result<Schedule>;

    async fn delete_schedule(&self, id: &str, user_id: &str) -> Result<()>;
}

/// Registry of output channels the agent can deliver messages to.
#[async_trait]
pub trait PlatformRegistry: Send + Sync {
    async fn active_platforms(&self) -> Result<Vec<String>>;

    async fn send_message(&self, platform: &str, message: PlatformMessage) -> Result<()>;
}

/// Registry of a user's external tool connections.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    async fn active_connections(&self, user_id: &str) -> Result<Vec<ToolConnection>>;
}

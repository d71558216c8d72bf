//! Builds per-turn [`CapabilitySet`]s from the four collaborators.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use bon::Builder;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::providers::{ConnectionRegistry, MemoryStore, PlatformRegistry, ScheduleStore};
use super::{ActionKind, Capabilities};
use crate::error::{MemohError, Result};
use crate::types::{
    ChatMessage, MemorySearchHit, MemoryUnit, NewSchedule, OutgoingMessage, PlatformMessage,
    ScheduleView, ToolConnection,
};

/// Caller-supplied hook run after a finished turn has been persisted.
pub type FinishHook = Arc<
    dyn Fn(Vec<ChatMessage>) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync,
>;

/// Parameters for one [`CapabilityComposer::compose`] call.
///
/// ```
/// use memoh::capability::{ActionKind, ComposeRequest};
///
/// let request = ComposeRequest::builder()
///     .user_id("user-1")
///     .platform("telegram")
///     .allowed([ActionKind::WebSearch].into_iter().collect())
///     .build();
/// assert_eq!(request.user_id, "user-1");
/// ```
#[derive(Builder)]
pub struct ComposeRequest {
    #[builder(into)]
    pub user_id: String,
    /// Channel the turn was invoked from.
    #[builder(into)]
    pub platform: Option<String>,
    #[builder(default = ActionKind::all())]
    pub allowed: HashSet<ActionKind>,
    pub on_finish: Option<FinishHook>,
}

/// Factory for identity-bound capability sets. Holds no per-user state.
#[derive(Clone)]
pub struct CapabilityComposer {
    memory: Arc<dyn MemoryStore>,
    schedules: Arc<dyn ScheduleStore>,
    platforms: Arc<dyn PlatformRegistry>,
    connections: Arc<dyn ConnectionRegistry>,
}

impl CapabilityComposer {
    pub fn new(
        memory: Arc<dyn MemoryStore>,
        schedules: Arc<dyn ScheduleStore>,
        platforms: Arc<dyn PlatformRegistry>,
        connections: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            memory,
            schedules,
            platforms,
            connections,
        }
    }

    /// Bind `request.user_id` into a fresh capability set.
    ///
    /// Active platforms and the user's active tool connections are loaded up
    /// front, but only when the allowlist grants their use.
    pub async fn compose(&self, request: ComposeRequest) -> Result<CapabilitySet> {
        if request.user_id.trim().is_empty() {
            return Err(MemohError::Authentication("missing user identity".into()));
        }

        let platforms = if request.allowed.contains(&ActionKind::SendMessage) {
            self.platforms.active_platforms().await?
        } else {
            Vec::new()
        };

        let connections = if request.allowed.contains(&ActionKind::UseConnections) {
            self.connections
                .active_connections(&request.user_id)
                .await?
                .into_iter()
                .filter(|c| c.active)
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            user_id = %request.user_id,
            platform = ?request.platform,
            allowed = request.allowed.len(),
            platforms = platforms.len(),
            connections = connections.len(),
            "composed capability set"
        );

        Ok(CapabilitySet {
            user_id: request.user_id,
            allowed: request.allowed,
            current_platform: request.platform,
            platforms,
            connections,
            on_finish: request.on_finish,
            memory: self.memory.clone(),
            schedules: self.schedules.clone(),
            platform_registry: self.platforms.clone(),
        })
    }
}

/// Capabilities bound to exactly one user for one turn.
///
/// Not `Clone`: the set belongs to the agent loop running the turn and is
/// dropped with it.
pub struct CapabilitySet {
    user_id: String,
    allowed: HashSet<ActionKind>,
    current_platform: Option<String>,
    platforms: Vec<String>,
    connections: Vec<ToolConnection>,
    on_finish: Option<FinishHook>,
    memory: Arc<dyn MemoryStore>,
    schedules: Arc<dyn ScheduleStore>,
    platform_registry: Arc<dyn PlatformRegistry>,
}

impl std::fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilitySet")
            .field("user_id", &self.user_id)
            .field("allowed", &self.allowed)
            .field("current_platform", &self.current_platform)
            .field("platforms", &self.platforms)
            .field("connections", &self.connections.len())
            .field("on_finish", &self.on_finish.as_ref().map(|_| ".."))
            .finish()
    }
}

impl CapabilitySet {
    /// Channel the turn was invoked from, if any.
    pub fn current_platform(&self) -> Option<&str> {
        self.current_platform.as_deref()
    }

    /// Platforms that were active when the set was composed.
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    /// The user's active tool connections.
    pub fn connections(&self) -> &[ToolConnection] {
        &self.connections
    }

    fn ensure(&self, action: ActionKind) -> Result<()> {
        if self.allowed.contains(&action) {
            Ok(())
        } else {
            warn!(user_id = %self.user_id, %action, "capability not in allowlist");
            Err(MemohError::ActionNotAllowed(action))
        }
    }
}

#[async_trait]
impl Capabilities for CapabilitySet {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn allowed_actions(&self) -> &HashSet<ActionKind> {
        &self.allowed
    }

    async fn send_message(&self, platform: &str, message: OutgoingMessage) -> Result<()> {
        self.ensure(ActionKind::SendMessage)?;
        debug!(user_id = %self.user_id, platform, "dispatching message");
        self.platform_registry
            .send_message(
                platform,
                PlatformMessage {
                    message: message.message,
                    user_id: self.user_id.clone(),
                },
            )
            .await
    }

    async fn read_memory(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ChatMessage>> {
        self.ensure(ActionKind::ReadMemory)?;
        self.memory.filter_by_timestamp(from, to, &self.user_id).await
    }

    async fn search_memory(&self, query: &str) -> Result<Vec<MemorySearchHit>> {
        self.ensure(ActionKind::SearchMemory)?;
        self.memory.search_memory(query, &self.user_id).await
    }

    async fn finish(&self, messages: Vec<ChatMessage>) -> Result<()> {
        if self.allows(ActionKind::SaveMemory) {
            let count = messages.len();
            self.memory
                .add_memory(MemoryUnit::new(self.user_id.clone(), messages.clone()))
                .await?;
            debug!(user_id = %self.user_id, messages = count, "persisted turn to memory");
        } else {
            debug!(user_id = %self.user_id, "memory persistence not allowed, skipping");
        }

        if let Some(hook) = &self.on_finish {
            hook(messages).await?;
        }
        Ok(())
    }

    async fn get_schedules(&self) -> Result<Vec<ScheduleView>> {
        self.ensure(ActionKind::GetSchedules)?;
        let stored = self.schedules.get_active_schedules(&self.user_id).await?;
        Ok(stored
            .into_iter()
            .filter_map(|schedule| {
                let view = ScheduleView::from_stored(schedule);
                if view.is_none() {
                    warn!(user_id = %self.user_id, "skipping stored schedule without id");
                }
                view
            })
            .collect())
    }

    async fn remove_schedule(&self, id: &str) -> Result<()> {
        self.ensure(ActionKind::RemoveSchedule)?;
        self.schedules.delete_schedule(id, &self.user_id).await
    }

    async fn schedule(&self, schedule: NewSchedule) -> Result<()> {
        self.ensure(ActionKind::Schedule)?;
        let created = self
            .schedules
            .create_schedule(&self.user_id, schedule.normalized())
            .await?;
        debug!(user_id = %self.user_id, schedule_id = ?created.id, "created schedule");
        Ok(())
    }
}

//! Scheduled task records and the view exposed to the agent.

use serde::{Deserialize, Serialize};

/// A schedule as stored by the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Cron-like pattern.
    pub pattern: String,
    pub command: String,
    #[serde(default)]
    pub max_calls: Option<u32>,
}

/// Fields the agent supplies when creating a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pattern: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calls: Option<u32>,
}

impl NewSchedule {
    /// Drop a zero `max_calls`; zero means "no limit" to the agent.
    pub fn normalized(mut self) -> Self {
        self.max_calls = self.max_calls.filter(|n| *n > 0);
        self
    }
}

/// Sanitized schedule as seen by the agent: `id` is always present and
/// unset optional fields are omitted rather than serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pattern: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calls: Option<u32>,
}

impl ScheduleView {
    /// Build the view for a stored schedule. Records without an id are not
    /// addressable by the agent and yield `None`.
    pub fn from_stored(schedule: Schedule) -> Option<Self> {
        let id = schedule.id.filter(|id| !id.is_empty())?;
        Some(Self {
            id,
            name: schedule.name,
            description: schedule.description,
            pattern: schedule.pattern,
            command: schedule.command,
            max_calls: schedule.max_calls.filter(|n| *n > 0),
        })
    }
}

//! Process-local collaborator implementations.
//!
//! Useful for embedding the composer without external services and as
//! fakes in tests. Nothing here is durable.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::providers::{ConnectionRegistry, MemoryStore, PlatformRegistry, ScheduleStore};
use crate::error::{MemohError, Result};
use crate::types::{
    ChatMessage, MemorySearchHit, MemoryUnit, NewSchedule, PlatformMessage, Schedule,
    ToolConnection,
};

/// Append-only memory log with keyword-overlap search.
#[derive(Debug, Default)]
pub struct InMemoryMemoryStore {
    units: Mutex<Vec<MemoryUnit>>,
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored unit, oldest first.
    pub async fn units(&self) -> Vec<MemoryUnit> {
        self.units.lock().await.clone()
    }
}

fn unit_text(unit: &MemoryUnit) -> String {
    unit.messages
        .iter()
        .map(ChatMessage::text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fraction of query terms that appear in `text`.
fn overlap_score(query_terms: &[String], text: &str) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let hits = query_terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .count();
    hits as f64 / query_terms.len() as f64
}

#[async_trait]
impl MemoryStore for InMemoryMemoryStore {
    async fn add_memory(&self, unit: MemoryUnit) -> Result<()> {
        self.units.lock().await.push(unit);
        Ok(())
    }

    async fn search_memory(&self, query: &str, user_id: &str) -> Result<Vec<MemorySearchHit>> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let units = self.units.lock().await;
        let mut hits: Vec<MemorySearchHit> = units
            .iter()
            .filter(|unit| unit.user == user_id)
            .filter_map(|unit| {
                let content = unit_text(unit);
                let similarity = overlap_score(&terms, &content);
                (similarity > 0.0).then(|| MemorySearchHit {
                    content,
                    timestamp: unit.timestamp,
                    similarity,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then(b.timestamp.cmp(&a.timestamp))
        });
        Ok(hits)
    }

    async fn filter_by_timestamp(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        user_id: &str,
    ) -> Result<Vec<ChatMessage>> {
        if from > to {
            return Err(MemohError::InvalidArgument(format!(
                "time range is inverted: {from} > {to}"
            )));
        }
        let units = self.units.lock().await;
        Ok(units
            .iter()
            .filter(|unit| unit.user == user_id && unit.timestamp >= from && unit.timestamp <= to)
            .flat_map(|unit| unit.messages.iter().cloned())
            .collect())
    }
}

/// Per-user schedule table keyed by generated ids.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    schedules: Mutex<HashMap<String, Vec<Schedule>>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stored record as-is, bypassing id generation.
    pub async fn insert(&self, user_id: &str, schedule: Schedule) {
        self.schedules
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(schedule);
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn get_active_schedules(&self, user_id: &str) -> Result<Vec<Schedule>> {
        Ok(self
            .schedules
            .lock()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_schedule(&self, user_id: &str, schedule: NewSchedule) -> Result<Schedule> {
        let stored = Schedule {
            id: Some(uuid::Uuid::new_v4().to_string()),
            name: schedule.name,
            description: schedule.description,
            pattern: schedule.pattern,
            command: schedule.command,
            max_calls: schedule.max_calls,
        };
        self.insert(user_id, stored.clone()).await;
        Ok(stored)
    }

    async fn delete_schedule(&self, id: &str, user_id: &str) -> Result<()> {
        let mut schedules = self.schedules.lock().await;
        let owned = schedules.get_mut(user_id);
        let position = owned
            .as_ref()
            .and_then(|list| list.iter().position(|s| s.id.as_deref() == Some(id)));
        match (owned, position) {
            (Some(list), Some(index)) => {
                list.remove(index);
                Ok(())
            }
            _ => Err(MemohError::Storage(format!("schedule {id} not found"))),
        }
    }
}

/// Fixed set of platforms that records every dispatched message.
#[derive(Debug, Default)]
pub struct RecordingPlatformRegistry {
    platforms: Vec<String>,
    sent: Mutex<Vec<(String, PlatformMessage)>>,
}

impl RecordingPlatformRegistry {
    pub fn new<I, S>(platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages dispatched so far, with their target platform.
    pub async fn sent(&self) -> Vec<(String, PlatformMessage)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl PlatformRegistry for RecordingPlatformRegistry {
    async fn active_platforms(&self) -> Result<Vec<String>> {
        Ok(self.platforms.clone())
    }

    async fn send_message(&self, platform: &str, message: PlatformMessage) -> Result<()> {
        if !self.platforms.iter().any(|p| p == platform) {
            return Err(MemohError::Dispatch {
                platform: platform.to_string(),
                message: "platform is not active".into(),
            });
        }
        self.sent.lock().await.push((platform.to_string(), message));
        Ok(())
    }
}

/// Per-user tool connection table.
#[derive(Debug, Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<String, Vec<ToolConnection>>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, user_id: &str, connection: ToolConnection) {
        self.connections
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(connection);
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn active_connections(&self, user_id: &str) -> Result<Vec<ToolConnection>> {
        Ok(self
            .connections
            .lock()
            .await
            .get(user_id)
            .map(|list| list.iter().filter(|c| c.active).cloned().collect())
            .unwrap_or_default())
    }
}

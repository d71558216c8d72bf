//! Expose a capability set to an agent loop as callable tools.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{ActionKind, Capabilities};
use crate::tools::{AgentTool, AgentToolParameters, Tool};
use crate::types::{NewSchedule, OutgoingMessage};

#[derive(Debug, Deserialize)]
struct TimeRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

/// One tool per allowed capability. Disallowed capabilities get no tool, so
/// the model never sees them.
pub fn capability_tools(capabilities: Arc<dyn Capabilities>) -> Vec<Arc<dyn Tool>> {
    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();

    if capabilities.allows(ActionKind::SendMessage) {
        let caps = capabilities.clone();
        tools.push(Arc::new(AgentTool::new(
            "send_message",
            "Send a message to the user on one of the active platforms",
            AgentToolParameters::object()
                .string("platform", "Name of the platform to deliver to", true)
                .string("message", "Message text", true)
                .build(),
            move |args| {
                let caps = caps.clone();
                async move {
                    let platform = args.get_str("platform")?;
                    let message = args.get_str("message")?;
                    caps.send_message(platform, OutgoingMessage::new(message))
                        .await?;
                    Ok(json!({ "success": true }))
                }
            },
        )));
    }

    if capabilities.allows(ActionKind::ReadMemory) {
        let caps = capabilities.clone();
        tools.push(Arc::new(AgentTool::new(
            "read_memory",
            "Read conversation history between two RFC 3339 timestamps",
            AgentToolParameters::object()
                .string("from", "Start of the range (RFC 3339)", true)
                .string("to", "End of the range (RFC 3339)", true)
                .build(),
            move |args| {
                let caps = caps.clone();
                async move {
                    let range: TimeRange = args.deserialize()?;
                    let messages = caps.read_memory(range.from, range.to).await?;
                    Ok(serde_json::to_value(messages)?)
                }
            },
        )));
    }

    if capabilities.allows(ActionKind::SearchMemory) {
        let caps = capabilities.clone();
        tools.push(Arc::new(AgentTool::new(
            "search_memory",
            "Search long-term memory for related past conversations",
            AgentToolParameters::object()
                .string("query", "What to look for", true)
                .build(),
            move |args| {
                let caps = caps.clone();
                async move {
                    let hits = caps.search_memory(args.get_str("query")?).await?;
                    Ok(serde_json::to_value(hits)?)
                }
            },
        )));
    }

    if capabilities.allows(ActionKind::GetSchedules) {
        let caps = capabilities.clone();
        tools.push(Arc::new(AgentTool::new(
            "get_schedules",
            "List the user's active scheduled tasks",
            AgentToolParameters::empty(),
            move |_args| {
                let caps = caps.clone();
                async move { Ok(serde_json::to_value(caps.get_schedules().await?)?) }
            },
        )));
    }

    if capabilities.allows(ActionKind::RemoveSchedule) {
        let caps = capabilities.clone();
        tools.push(Arc::new(AgentTool::new(
            "remove_schedule",
            "Delete a scheduled task by id",
            AgentToolParameters::object()
                .string("id", "Schedule id", true)
                .build(),
            move |args| {
                let caps = caps.clone();
                async move {
                    caps.remove_schedule(args.get_str("id")?).await?;
                    Ok(json!({ "success": true }))
                }
            },
        )));
    }

    if capabilities.allows(ActionKind::Schedule) {
        let caps = capabilities.clone();
        tools.push(Arc::new(AgentTool::new(
            "schedule",
            "Create a recurring task that runs a command on a cron pattern",
            AgentToolParameters::object()
                .string("name", "Short name", true)
                .string("description", "What the task is for", false)
                .string("pattern", "Cron pattern, e.g. '0 9 * * *'", true)
                .string("command", "Instruction to run on each trigger", true)
                .integer("maxCalls", "Stop after this many runs", false)
                .build(),
            move |args| {
                let caps = caps.clone();
                async move {
                    let schedule: NewSchedule = args.deserialize()?;
                    caps.schedule(schedule).await?;
                    Ok(json!({ "success": true }))
                }
            },
        )));
    }

    tools
}

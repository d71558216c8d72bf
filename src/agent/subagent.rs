//! Capability-restricted sub-conversations.
//!
//! A subagent runs one synchronous turn with an empty history and only the
//! actions in [`SUBAGENT_ACTIONS`]. Its capability set is composed from
//! scratch, so nothing granted to the parent carries over.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::agent::{AgentFactory, AgentSpec, AskRequest};
use crate::capability::{ActionKind, CapabilityComposer, ComposeRequest};
use crate::error::{MemohError, Result};

/// Everything a subagent may do. Web search is served by the agent loop
/// itself, so a subagent gets no capability tools.
pub const SUBAGENT_ACTIONS: [ActionKind; 1] = [ActionKind::WebSearch];

/// Result handed back to the tool-call layer. Failures are values, never
/// errors, because the caller is itself in the middle of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubagentOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubagentOutcome {
    pub fn completed(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(message.into()),
        }
    }

    fn created() -> Self {
        Self {
            success: true,
            result: None,
            message: Some("Subagent created successfully".into()),
        }
    }
}

/// Spawns isolated subagents on behalf of one user's agent.
pub struct SubagentDelegator {
    composer: CapabilityComposer,
    factory: Arc<dyn AgentFactory>,
    user_id: String,
    allowed: HashSet<ActionKind>,
    /// Registered subagent descriptions by name.
    profiles: RwLock<HashMap<String, String>>,
}

impl SubagentDelegator {
    pub fn new(
        composer: CapabilityComposer,
        factory: Arc<dyn AgentFactory>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            composer,
            factory,
            user_id: user_id.into(),
            allowed: SUBAGENT_ACTIONS.into_iter().collect(),
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Record a named subagent. Its description becomes the subagent's
    /// instructions on later queries.
    pub async fn register(&self, name: &str, description: &str) -> SubagentOutcome {
        let name = name.trim();
        if name.is_empty() {
            return SubagentOutcome::failed("subagent name is required");
        }
        self.profiles
            .write()
            .await
            .insert(name.to_string(), description.to_string());
        debug!(subagent = name, "registered subagent");
        SubagentOutcome::created()
    }

    /// Run `query` in a fresh subagent and return its final message.
    ///
    /// Unregistered names are accepted as free-form labels.
    pub async fn query(&self, name: &str, query: &str) -> SubagentOutcome {
        match self.run(name, query).await {
            Ok(result) => SubagentOutcome::completed(result),
            Err(e) => {
                warn!(subagent = name, error = %e, "subagent query failed");
                SubagentOutcome::failed(e.to_string())
            }
        }
    }

    async fn run(&self, name: &str, query: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MemohError::InvalidArgument("subagent name is required".into()));
        }

        let instructions = self.profiles.read().await.get(name).cloned();
        if instructions.is_none() {
            debug!(subagent = name, "unregistered subagent, using name as a label");
        }

        let capabilities = self
            .composer
            .compose(
                ComposeRequest::builder()
                    .user_id(self.user_id.clone())
                    .allowed(self.allowed.clone())
                    .build(),
            )
            .await?;

        let spec = AgentSpec {
            name: name.to_string(),
            instructions,
        };
        let agent = self.factory.create(spec, capabilities).await?;

        debug!(subagent = name, user_id = %self.user_id, "running subagent turn");
        let result = agent
            .ask(AskRequest {
                messages: Vec::new(),
                query: query.to_string(),
            })
            .await?;

        let last = result.messages.last().ok_or_else(|| {
            MemohError::Subagent(format!("subagent '{name}' produced no messages"))
        })?;
        Ok(last.text())
    }
}

//! Seams to the agent loop, which runs outside this crate.

use async_trait::async_trait;

use crate::capability::CapabilitySet;
use crate::error::Result;
use crate::types::ChatMessage;

/// Identity and instructions for constructing an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    pub name: String,
    /// Extra system instructions, e.g. a registered subagent's description.
    pub instructions: Option<String>,
}

/// Input for one synchronous turn.
#[derive(Debug, Clone)]
pub struct AskRequest {
    /// Prior conversation, oldest first.
    pub messages: Vec<ChatMessage>,
    pub query: String,
}

/// Messages produced by a turn, oldest first.
#[derive(Debug, Clone, Default)]
pub struct AskResult {
    pub messages: Vec<ChatMessage>,
}

/// A constructed agent able to run a turn to completion.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn ask(&self, request: AskRequest) -> Result<AskResult>;
}

/// Builds agents around a capability set.
#[async_trait]
pub trait AgentFactory: Send + Sync {
    async fn create(&self, spec: AgentSpec, capabilities: CapabilitySet) -> Result<Box<dyn Agent>>;
}

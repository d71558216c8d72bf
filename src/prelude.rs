//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AgentFactory, SubagentDelegator, SubagentOutcome};
pub use crate::capability::{
    ActionKind, Capabilities, CapabilityComposer, CapabilitySet, ComposeRequest,
};
pub use crate::chat::{ChatClient, ChatRequest};
pub use crate::config::MemohConfig;
pub use crate::error::{MemohError, Result};
pub use crate::stream::StreamDecoder;
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments};
pub use crate::types::{ChatMessage, ContentPart, Role, StreamEvent, StreamEventType};

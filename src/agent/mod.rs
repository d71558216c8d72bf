//! Agent seams and subagent delegation.

pub mod agent;
pub mod subagent;
pub mod tools;

pub use agent::{Agent, AgentFactory, AgentSpec, AskRequest, AskResult};
pub use subagent::{SubagentDelegator, SubagentOutcome, SUBAGENT_ACTIONS};
pub use tools::subagent_tools;

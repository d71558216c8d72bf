//! Tool system for exposing capabilities to an agent loop.

pub mod arguments;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;

//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::MemohError;

/// Core tool trait, implemented by everything an agent loop can call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &AgentToolParameters;

    /// Execute the tool with parsed arguments.
    async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, MemohError>;
}

type ToolHandler = dyn Fn(ToolArguments) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, MemohError>> + Send>>
    + Send
    + Sync;

/// Closure-based tool for quick tool creation.
pub struct AgentTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    handler: Arc<ToolHandler>,
}

impl AgentTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, MemohError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    /// Handler failures are reported as [`MemohError::ToolExecution`] under
    /// this tool's name.
    async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, MemohError> {
        (self.handler)(args.clone()).await.map_err(|e| match e {
            MemohError::ToolExecution { .. } => e,
            other => MemohError::ToolExecution {
                tool_name: self.name.clone(),
                message: other.to_string(),
            },
        })
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_errors_are_tagged_with_the_tool_name() {
        let tool = AgentTool::new(
            "lookup",
            "Look something up",
            AgentToolParameters::object()
                .string("key", "What to look up", true)
                .build(),
            |args| async move {
                let key = args.get_str("key")?;
                Ok(serde_json::json!({ "key": key }))
            },
        );

        let ok = tool
            .execute(&ToolArguments::new(serde_json::json!({ "key": "a" })))
            .await
            .unwrap();
        assert_eq!(ok, serde_json::json!({ "key": "a" }));

        match tool.execute(&ToolArguments::new(serde_json::json!({}))).await {
            Err(MemohError::ToolExecution { tool_name, message }) => {
                assert_eq!(tool_name, "lookup");
                assert!(message.contains("Missing string argument: key"));
            }
            other => panic!("expected tool execution error, got {other:?}"),
        }
    }
}

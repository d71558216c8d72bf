//! `create_subagent` / `query_subagent` tools.

use std::sync::Arc;

use super::subagent::{SubagentDelegator, SubagentOutcome};
use crate::capability::{ActionKind, Capabilities};
use crate::tools::{AgentTool, AgentToolParameters, Tool};

/// Tools through which an agent delegates work to subagents.
///
/// Empty unless `parent` allows [`ActionKind::Subagent`].
pub fn subagent_tools(
    parent: &dyn Capabilities,
    delegator: Arc<SubagentDelegator>,
) -> Vec<Arc<dyn Tool>> {
    if !parent.allows(ActionKind::Subagent) {
        return Vec::new();
    }

    let create = {
        let delegator = delegator.clone();
        AgentTool::new(
            "create_subagent",
            "Create a new subagent",
            AgentToolParameters::object()
                .string("name", "Name to address the subagent by", true)
                .string("description", "What the subagent is for", true)
                .build(),
            move |args| {
                let delegator = delegator.clone();
                async move {
                    let outcome = match (args.get_str("name"), args.get_str("description")) {
                        (Ok(name), Ok(description)) => delegator.register(name, description).await,
                        (Err(e), _) | (_, Err(e)) => SubagentOutcome::failed(e.to_string()),
                    };
                    Ok(serde_json::to_value(outcome)?)
                }
            },
        )
    };

    let query = AgentTool::new(
        "query_subagent",
        "Query a subagent",
        AgentToolParameters::object()
            .string("name", "Subagent name", true)
            .string("query", "The prompt to ask the subagent to do.", true)
            .build(),
        move |args| {
            let delegator = delegator.clone();
            async move {
                let outcome = match (args.get_str("name"), args.get_str("query")) {
                    (Ok(name), Ok(query)) => delegator.query(name, query).await,
                    (Err(e), _) | (_, Err(e)) => SubagentOutcome::failed(e.to_string()),
                };
                Ok(serde_json::to_value(outcome)?)
            }
        },
    );

    vec![Arc::new(create), Arc::new(query)]
}

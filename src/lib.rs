//! Memoh: capability composition and streaming delivery for a personal
//! assistant agent.
//!
//! The crate binds a user's memory, schedules and messaging platforms into an
//! identity-scoped [`CapabilitySet`](capability::CapabilitySet), runs isolated
//! subagents with a reduced action set, and decodes the agent API's
//! `data: <json>` event stream.
//!
//! # Quick Start
//!
//! ```no_run
//! use memoh::prelude::*;
//!
//! # async fn example() -> memoh::error::Result<()> {
//! let config = MemohConfig::from_env();
//! let client = ChatClient::new(config)?;
//! let reply = client.turn(&ChatRequest::new("Hello!")).await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod capability;
pub mod chat;
pub mod config;
pub mod error;
pub mod prelude;
pub mod stream;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

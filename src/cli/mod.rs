//! CLI entry point for Memoh.

pub mod commands;

use clap::{Parser, Subcommand};

/// Memoh agent CLI
#[derive(Parser, Debug)]
#[command(name = "memoh", version, about = "Talk to a Memoh agent from the terminal")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message to the agent
    Chat(ChatArgs),
    /// Inspect or change the stored configuration
    Config(ConfigArgs),
    /// Check that the API is reachable
    Ping,
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Message to send
    pub prompt: String,

    /// Wait for the full reply instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// Reply language (defaults to the configured language)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Minutes of history to load as context
    #[arg(long)]
    pub max_context_load_time: Option<u32>,
}

/// Arguments for the `config` subcommand group.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Update stored values
    Set(SetArgs),
    /// Forget the stored token
    Logout,
}

/// Arguments for `memoh config set`.
#[derive(Parser, Debug)]
pub struct SetArgs {
    #[arg(long)]
    pub api_url: Option<String>,

    #[arg(long)]
    pub token: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub max_context_load_time: Option<u32>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

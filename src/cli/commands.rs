//! CLI command handlers.

use std::io::Write;
use std::path::Path;

use crate::chat::{ping, ChatClient, ChatRequest};
use crate::config::MemohConfig;
use crate::error::Result;
use crate::types::StreamEvent;

use super::{ChatArgs, SetArgs};

/// Handle `memoh chat`.
pub async fn handle_chat(config: MemohConfig, args: ChatArgs) -> Result<()> {
    let client = ChatClient::new(config)?;
    let request = ChatRequest {
        message: args.prompt,
        max_context_load_time: args.max_context_load_time,
        language: args.language,
    };

    if args.no_stream {
        let reply = client.turn(&request).await?;
        println!("{reply}");
        return Ok(());
    }

    client
        .stream_turn(&request, |event| {
            match event {
                StreamEvent::TextDelta(text) => {
                    print!("{text}");
                    let _ = std::io::stdout().flush();
                }
                StreamEvent::ToolCall(Some(name)) => eprintln!("\n[tool] {name}"),
                StreamEvent::ToolCall(None) => eprintln!("\n[tool]"),
                StreamEvent::Error(message) => eprintln!("\nError: {message}"),
                StreamEvent::Done => {}
            }
            futures::future::ready(Ok(()))
        })
        .await?;

    println!();
    Ok(())
}

/// Handle `memoh config show`.
pub fn handle_show(config: &MemohConfig, path: &Path) {
    println!("Config file: {}", path.display());
    println!("API URL:     {}", config.api_url);
    println!("Language:    {}", config.language);
    println!("Context:     {} min", config.max_context_load_time);
    println!(
        "Logged in:   {}",
        if config.is_logged_in() { "yes" } else { "no" }
    );
}

/// Handle `memoh config set`. Only the stored file is changed, so values
/// from the environment are not written back.
pub fn handle_set(path: &Path, args: SetArgs) -> Result<()> {
    let mut stored = MemohConfig::load(path)?;
    if let Some(url) = args.api_url {
        stored.api_url = url;
    }
    if let Some(token) = args.token {
        stored.token = Some(token);
    }
    if let Some(language) = args.language {
        stored.language = language;
    }
    if let Some(minutes) = args.max_context_load_time {
        stored.max_context_load_time = minutes;
    }
    stored.validate()?;
    stored.save(path)?;
    println!("Saved {}", path.display());
    Ok(())
}

/// Handle `memoh config logout`.
pub fn handle_logout(path: &Path) -> Result<()> {
    let mut stored = MemohConfig::load(path)?;
    stored.clear_token();
    stored.save(path)?;
    println!("Logged out");
    Ok(())
}

/// Handle `memoh ping`.
pub async fn handle_ping(config: &MemohConfig) -> Result<()> {
    let result = ping(config).await;
    if result.success {
        println!(
            "OK ({}) {}",
            result.status.unwrap_or_default(),
            result.message.unwrap_or_default()
        );
    } else {
        println!(
            "Unreachable: {}",
            result.error.unwrap_or_else(|| "unknown error".into())
        );
    }
    Ok(())
}

//! Memoh CLI binary entry point.

use memoh::cli::{commands, Cli, Commands, ConfigCommands};
use memoh::config::{default_config_path, MemohConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> memoh::error::Result<()> {
    let path = default_config_path();
    let config = MemohConfig::layered(&path)?;

    match cli.command {
        Commands::Chat(args) => commands::handle_chat(config, args).await,
        Commands::Config(config_args) => match config_args.command {
            ConfigCommands::Show => {
                commands::handle_show(&config, &path);
                Ok(())
            }
            ConfigCommands::Set(args) => commands::handle_set(&path, args),
            ConfigCommands::Logout => commands::handle_logout(&path),
        },
        Commands::Ping => commands::handle_ping(&config).await,
    }
}

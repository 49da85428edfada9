//! Orgnet CLI
//!
//! Shortest acquaintance paths between people, companies and government
//! bodies held in Neo4j.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

const DEFAULT_SERVE_LOG: &str = "logs/orgnet-serve.log";

/// Initialize tracing with optional file logging.
///
/// Console output goes to stderr so stdout stays clean for `--json` and
/// export output.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "orgnet=info,orgnet_graph=info,orgnet_web=debug".into());

    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Connection settings may live in a local .env file.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVE_LOG)),
        ),
        _ => None,
    };
    init_tracing(log_file.as_deref())?;

    cli.execute().await
}

//! Web server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::ConnectionArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (used with --log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = connection.connect().await?;

    println!();
    println!("  {} {}", "Orgnet".cyan().bold(), "Web API".bold());
    println!();
    println!(
        "  {}       http://{}:{}/api",
        "API".green(),
        args.host,
        args.port
    );
    println!(
        "  {}     http://{}:{}/schema-data",
        "Graph".green(),
        args.host,
        args.port
    );
    println!("  {}     {}", "Neo4j".green(), connection.neo4j_uri);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    orgnet_web::run_server(Arc::new(client), &args.host, args.port).await?;

    Ok(())
}

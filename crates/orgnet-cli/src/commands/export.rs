//! Export command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use orgnet_graph::queries::export::export_graph;

use super::ConnectionArgs;

#[derive(Args)]
pub struct ExportArgs {
    /// Write the export to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: ExportArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = connection.connect().await?;
    let export = export_graph(&client).await?;
    let json = serde_json::to_string_pretty(&export)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let entities = export.entities.people.len()
                + export.entities.companies.len()
                + export.entities.government_bodies.len();
            println!(
                "{} {} entities to {}",
                "Exported".green().bold(),
                entities,
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

//! Whole-graph commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use orgnet_graph::queries::overview::{full_graph, graph_counts};
use orgnet_graph::schema::schema_graph;

use super::ConnectionArgs;

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Print the schema graph (entity kinds and relationship types) as JSON
    Schema,

    /// Print every entity and relationship as a visualization payload
    Full,

    /// Show graph status
    Status,
}

pub async fn execute(cmd: GraphCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        GraphCommands::Schema => {
            println!("{}", schema_graph().to_json_pretty()?);
            Ok(())
        }
        GraphCommands::Full => {
            let client = connection.connect().await?;
            let payload = full_graph(&client).await?;
            println!("{}", payload.to_json_pretty()?);
            Ok(())
        }
        GraphCommands::Status => cmd_status(connection).await,
    }
}

/// Show graph status (node and relationship counts).
async fn cmd_status(connection: &ConnectionArgs) -> Result<()> {
    println!("{}", "Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  URI:           {}", connection.neo4j_uri.dimmed());
    println!("  Database:      {}", connection.neo4j_database.dimmed());

    let client = connection.connect().await?;
    let counts = graph_counts(&client).await?;
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));

    Ok(())
}

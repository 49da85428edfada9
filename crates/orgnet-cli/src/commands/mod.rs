//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use orgnet_graph::{GraphClient, GraphConfig};

pub mod analyze;
pub mod directory;
pub mod export;
pub mod graph;
pub mod lookup;
pub mod node;
pub mod serve;

/// Orgnet - who knows whom between government and industry
#[derive(Parser)]
#[command(name = "orgnet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Neo4j connection settings.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Neo4j bolt URI
    #[arg(long, global = true, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j user
    #[arg(long, global = true, env = "NEO4J_USER", default_value = "neo4j")]
    pub neo4j_user: String,

    /// Neo4j password
    #[arg(
        long,
        global = true,
        env = "NEO4J_PASSWORD",
        default_value = "neo4j",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub neo4j_password: String,

    /// Neo4j database name
    #[arg(long, global = true, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,
}

impl ConnectionArgs {
    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.neo4j_uri.clone(),
            user: self.neo4j_user.clone(),
            password: self.neo4j_password.clone(),
            database: self.neo4j_database.clone(),
            ..GraphConfig::default()
        }
    }

    pub async fn connect(&self) -> Result<GraphClient> {
        let config = self.config();
        tracing::debug!(uri = %config.uri, database = %config.database, "Connecting to Neo4j");
        GraphClient::connect(&config).await
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the shortest acquaintance path between two anchors
    #[command(subcommand)]
    Analyze(analyze::AnalyzeCommands),

    /// List the people, companies or government bodies anchors come from
    Directory(directory::DirectoryArgs),

    /// Canned single-hop lookups
    #[command(subcommand)]
    Lookup(lookup::LookupCommands),

    /// Inspect single nodes and their relationships
    #[command(subcommand)]
    Node(node::NodeCommands),

    /// Whole-graph views
    #[command(subcommand)]
    Graph(graph::GraphCommands),

    /// Export every entity and relationship as JSON
    Export(export::ExportArgs),

    /// Start the JSON web API
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let connection = self.connection;

        match self.command {
            Commands::Analyze(cmd) => analyze::execute(cmd, &connection).await,
            Commands::Directory(args) => directory::execute(args, &connection).await,
            Commands::Lookup(cmd) => lookup::execute(cmd, &connection).await,
            Commands::Node(cmd) => node::execute(cmd, &connection).await,
            Commands::Graph(cmd) => graph::execute(cmd, &connection).await,
            Commands::Export(args) => export::execute(args, &connection).await,
            Commands::Serve(args) => serve::execute(args, &connection).await,
        }
    }
}

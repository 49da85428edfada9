//! Node inspection commands.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use orgnet_core::EntityKind;
use orgnet_graph::queries::nodes::{node_detail, node_ids, node_relations};
use orgnet_graph::GraphStore;

use super::ConnectionArgs;
use crate::output;

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Show one node's id, name and title
    Show {
        /// Node id
        id: String,
        /// Restrict the match to one kind (person, company, government)
        #[arg(long = "type")]
        kind: Option<EntityKind>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every node's id, name and label
    Ids {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the relationships touching a node
    Relations {
        /// Node id
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn execute(cmd: NodeCommands, connection: &ConnectionArgs) -> Result<()> {
    let client = connection.connect().await?;
    run(cmd, &client).await
}

async fn run(cmd: NodeCommands, store: &dyn GraphStore) -> Result<()> {
    match cmd {
        NodeCommands::Show { id, kind, json } => {
            let node = node_detail(store, &id, kind)
                .await?
                .ok_or_else(|| anyhow!("Node not found: {}", id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&node)?);
            } else {
                output::print_node_detail(&node);
            }
        }
        NodeCommands::Ids { json } => {
            let nodes = node_ids(store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            } else {
                output::print_node_ids(&nodes);
            }
        }
        NodeCommands::Relations { id, json } => {
            let relations = node_relations(store, &id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&relations)?);
            } else {
                output::print_node_relations(&id, &relations);
            }
        }
    }
    Ok(())
}

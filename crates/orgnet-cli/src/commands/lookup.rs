//! Canned lookup commands.

use anyhow::Result;
use clap::Subcommand;
use orgnet_graph::queries::lookup::{run_lookup, LOOKUPS};

use super::ConnectionArgs;
use crate::output;

#[derive(Subcommand)]
pub enum LookupCommands {
    /// List the available lookups
    List,

    /// Run a lookup for one entity
    Run {
        /// Lookup id (see `orgnet lookup list`)
        id: String,
        /// Id or exact name of the entity to look up
        identifier: String,
        /// Print the result table as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn execute(cmd: LookupCommands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        LookupCommands::List => {
            output::print_lookup_menu(LOOKUPS);
            Ok(())
        }
        LookupCommands::Run {
            id,
            identifier,
            json,
        } => {
            let client = connection.connect().await?;
            let table = run_lookup(&client, &id, &identifier).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                output::print_table(&table);
            }
            Ok(())
        }
    }
}

//! Directory command: list the entities anchors can be picked from.

use anyhow::Result;
use clap::Args;
use orgnet_core::EntityKind;
use orgnet_graph::queries::directory::list_entities;

use super::ConnectionArgs;
use crate::output;

#[derive(Args)]
pub struct DirectoryArgs {
    /// Entity kind: people, companies or governments
    pub kind: EntityKind,

    /// Print "Name [id]" choices for person analysis instead of a table
    #[arg(long)]
    pub choices: bool,

    /// Print entries as JSON
    #[arg(long, conflicts_with = "choices")]
    pub json: bool,
}

pub async fn execute(args: DirectoryArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = connection.connect().await?;
    let entries = list_entities(&client, args.kind).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if args.choices {
        for entry in &entries {
            println!("{}", entry.person_choice());
        }
    } else {
        output::print_directory(args.kind, &entries);
    }

    Ok(())
}

//! Network analysis commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use orgnet_graph::{AnalysisMode, PathAnalyzer, PathResult};

use super::ConnectionArgs;
use crate::output;

#[derive(Args, Debug, Clone, Copy)]
pub struct AnalyzeOutput {
    /// Print the visualization payload as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum AnalyzeCommands {
    /// Path from a government body to a company
    GovCompany {
        /// Government body id
        government_id: String,
        /// Company id
        company_id: String,
        #[command(flatten)]
        output: AnalyzeOutput,
    },

    /// Path between two companies
    CompanyCompany {
        /// First company id
        first: String,
        /// Second company id
        second: String,
        #[command(flatten)]
        output: AnalyzeOutput,
    },

    /// Path between two government bodies
    GovGov {
        /// First government body id
        first: String,
        /// Second government body id
        second: String,
        #[command(flatten)]
        output: AnalyzeOutput,
    },

    /// Path between two people, given by id, name, or "Name [id]"
    PersonPerson {
        first: String,
        second: String,
        #[command(flatten)]
        output: AnalyzeOutput,
    },
}

impl AnalyzeCommands {
    fn into_mode(self) -> (AnalysisMode, AnalyzeOutput) {
        match self {
            AnalyzeCommands::GovCompany {
                government_id,
                company_id,
                output,
            } => (
                AnalysisMode::GovernmentCompany {
                    government_id,
                    company_id,
                },
                output,
            ),
            AnalyzeCommands::CompanyCompany {
                first,
                second,
                output,
            } => (
                AnalysisMode::CompanyCompany {
                    first_company_id: first,
                    second_company_id: second,
                },
                output,
            ),
            AnalyzeCommands::GovGov {
                first,
                second,
                output,
            } => (
                AnalysisMode::GovernmentGovernment {
                    first_government_id: first,
                    second_government_id: second,
                },
                output,
            ),
            AnalyzeCommands::PersonPerson {
                first,
                second,
                output,
            } => (
                AnalysisMode::PersonPerson {
                    first_person: first,
                    second_person: second,
                },
                output,
            ),
        }
    }
}

pub async fn execute(cmd: AnalyzeCommands, connection: &ConnectionArgs) -> Result<()> {
    let (mode, out) = cmd.into_mode();
    let client = connection.connect().await?;
    let result = PathAnalyzer::new(&client).analyze(&mode).await;

    if out.json {
        println!("{}", serde_json::to_string_pretty(&PathResult::from(result))?);
        return Ok(());
    }

    match result {
        Ok(payload) => {
            output::print_path(mode.name(), &payload);
            Ok(())
        }
        Err(e) => {
            if e.is_not_found() {
                eprintln!(
                    "{} {}",
                    "Hint:".yellow(),
                    "list candidates with 'orgnet directory <people|companies|governments>'".dimmed()
                );
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> AnalyzeCommands {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Analyze(cmd) => cmd,
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_gov_company_args() {
        let (mode, out) = parse(&["orgnet", "analyze", "gov-company", "g1", "c1"]).into_mode();
        assert_eq!(
            mode,
            AnalysisMode::GovernmentCompany {
                government_id: "g1".to_string(),
                company_id: "c1".to_string(),
            }
        );
        assert!(!out.json);
    }

    #[test]
    fn test_person_person_keeps_raw_input() {
        let (mode, out) = parse(&[
            "orgnet",
            "analyze",
            "person-person",
            "Alice Smith [p42]",
            "Bob",
            "--json",
        ])
        .into_mode();
        assert_eq!(
            mode,
            AnalysisMode::PersonPerson {
                first_person: "Alice Smith [p42]".to_string(),
                second_person: "Bob".to_string(),
            }
        );
        assert!(out.json);
    }
}

//! Canned single-hop lookups.
//!
//! A fixed menu of questions, each anchored on one entity matched by id or
//! name. Results come back as a plain table.

use orgnet_core::{EntityKind, RelationType};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::store::{GraphStore, QueryKind, Statement, StoreError};

/// A predefined lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CannedLookup {
    pub id: &'static str,
    pub description: &'static str,
    /// Kind of the entity the identifier names.
    pub anchor: EntityKind,
    /// Kind of the entities listed.
    pub target: EntityKind,
    #[serde(skip)]
    pub relations: &'static [RelationType],
    pub columns: &'static [&'static str],
    #[serde(skip)]
    cypher: &'static str,
}

pub const LOOKUPS: &[CannedLookup] = &[
    CannedLookup {
        id: "former_employees",
        description: "Find former employees of a company",
        anchor: EntityKind::Company,
        target: EntityKind::Person,
        relations: &[RelationType::FormerlyEmployed],
        columns: &["Name", "Title", "Notes"],
        cypher: "MATCH (p:Person)-[r:formerly_employed]-(c:Company)
                 WHERE c.id = $identifier OR c.name = $identifier
                 RETURN p.name AS Name, p.title AS Title, r.notes AS Notes",
    },
    CannedLookup {
        id: "former_gov_employees",
        description: "Find former employees of a government body",
        anchor: EntityKind::GovernmentBody,
        target: EntityKind::Person,
        relations: &[RelationType::FormerlyEmployed],
        columns: &["Name", "Title", "Notes"],
        cypher: "MATCH (p:Person)-[r:formerly_employed]-(g:`Government Body`)
                 WHERE g.id = $identifier OR g.name = $identifier
                 RETURN p.name AS Name, p.title AS Title, r.notes AS Notes",
    },
    CannedLookup {
        id: "people_who_know",
        description: "Return all people who know a person",
        anchor: EntityKind::Person,
        target: EntityKind::Person,
        relations: &RelationType::ACQUAINTANCE,
        columns: &["Name", "Title", "Notes"],
        cypher: "MATCH (p:Person)
                 WHERE p.id = $identifier OR p.name = $identifier
                 MATCH (p)-[r:knows|works_with]-(other:Person)
                 RETURN other.name AS Name, other.title AS Title, r.notes AS Notes",
    },
    CannedLookup {
        id: "gov_contracts",
        description: "Return all companies that work with a government body",
        anchor: EntityKind::GovernmentBody,
        target: EntityKind::Company,
        relations: &[RelationType::Contracts],
        columns: &["Company", "Notes"],
        cypher: "MATCH (g:`Government Body`)
                 WHERE g.id = $identifier OR g.name = $identifier
                 MATCH (g)-[r:contracts]-(c:Company)
                 RETURN c.name AS Company, r.notes AS Notes",
    },
];

/// Find a lookup by id.
pub fn find_lookup(id: &str) -> Option<&'static CannedLookup> {
    LOOKUPS.iter().find(|lookup| lookup.id == id)
}

/// Errors from running a canned lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid query selected: {0}")]
    UnknownLookup(String),

    #[error("Missing identifier parameter")]
    MissingIdentifier,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Tabular lookup result; each row lines up with `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl CannedLookup {
    fn statement(&self, identifier: &str) -> Statement {
        Statement::new(QueryKind::CannedLookup(self.id), self.cypher)
            .param("identifier", identifier)
            .columns(self.columns)
    }
}

/// Run the lookup `id` for the entity named by `identifier`.
pub async fn run_lookup(
    store: &dyn GraphStore,
    id: &str,
    identifier: &str,
) -> Result<LookupTable, LookupError> {
    let lookup = find_lookup(id).ok_or_else(|| LookupError::UnknownLookup(id.to_string()))?;
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(LookupError::MissingIdentifier);
    }

    let rows = store.run(lookup.statement(identifier)).await?;
    Ok(LookupTable {
        title: lookup.description.to_string(),
        columns: lookup.columns.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| {
                lookup
                    .columns
                    .iter()
                    .map(|column| row.value(column).clone())
                    .collect()
            })
            .collect(),
    })
}

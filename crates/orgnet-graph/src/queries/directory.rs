//! Entity directory: the people, companies and government bodies a caller
//! can pick anchors from.

use orgnet_core::anchor::person_choice;
use orgnet_core::{EntityKind, GraphNode};
use serde::{Deserialize, Serialize};

use crate::store::{GraphStore, QueryKind, Row, Statement, StoreError};

/// One selectable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DirectoryEntry {
    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }

    /// Person picker text in the `Name [id]` form the analyzer reads back.
    pub fn person_choice(&self) -> String {
        person_choice(self.name.as_deref().unwrap_or_default(), &self.id)
    }

    /// As a graph node of `kind`, for payload shaping.
    pub fn to_graph_node(&self, kind: EntityKind) -> GraphNode {
        GraphNode {
            id: self.id.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            labels: vec![kind.store_label().to_string()],
        }
    }

    fn from_row(row: &Row) -> Result<Option<Self>, StoreError> {
        let id: String = row.get_opt("id")?.unwrap_or_default();
        if id.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            id,
            name: row.get_opt("name")?,
            title: row.get_opt("title")?,
        }))
    }
}

fn list_statement(kind: EntityKind) -> Statement {
    Statement::new(
        QueryKind::ListEntities(kind),
        format!(
            "MATCH (n:{})
             RETURN n.id AS id, n.name AS name, n.title AS title
             ORDER BY n.name, n.id",
            kind.cypher_label()
        ),
    )
    .columns(&["id", "name", "title"])
}

/// List every entity of `kind`, ordered by name then id.
///
/// Nodes without an id cannot be anchors and are skipped.
pub async fn list_entities(
    store: &dyn GraphStore,
    kind: EntityKind,
) -> Result<Vec<DirectoryEntry>, StoreError> {
    let rows = store.run(list_statement(kind)).await?;
    let mut entries = Vec::with_capacity(rows.len());
    for row in &rows {
        if let Some(entry) = DirectoryEntry::from_row(row)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

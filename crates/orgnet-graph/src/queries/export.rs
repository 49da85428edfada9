//! Whole-graph JSON export, grouped by entity kind and by the kinds at
//! either end of each relationship.

use orgnet_core::EntityKind;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::queries::directory::{list_entities, DirectoryEntry};
use crate::store::{GraphStore, QueryKind, Row, Statement, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportEntities {
    pub people: Vec<DirectoryEntry>,
    pub companies: Vec<DirectoryEntry>,
    pub government_bodies: Vec<DirectoryEntry>,
}

/// A directed relationship in the export.
///
/// Endpoint ids serialize under keys named after the endpoint kinds, such as
/// `person_id`/`company_id`, or `person_id_1`/`person_id_2` when both ends
/// are of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRelation {
    pub from_kind: EntityKind,
    pub to_kind: EntityKind,
    pub from_id: String,
    pub to_id: String,
    pub rel_type: String,
    pub notes: Option<String>,
}

fn key_stem(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "person_id",
        EntityKind::Company => "company_id",
        EntityKind::GovernmentBody => "government_id",
    }
}

impl ExportRelation {
    /// Keys the two endpoint ids are written under.
    pub fn endpoint_keys(&self) -> (String, String) {
        let (from, to) = (key_stem(self.from_kind), key_stem(self.to_kind));
        if from == to {
            (format!("{}_1", from), format!("{}_2", to))
        } else {
            (from.to_string(), to.to_string())
        }
    }
}

impl Serialize for ExportRelation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (from_key, to_key) = self.endpoint_keys();
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&from_key, &self.from_id)?;
        map.serialize_entry(&to_key, &self.to_id)?;
        map.serialize_entry("type", &self.rel_type)?;
        map.serialize_entry("notes", &self.notes)?;
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportRelationships {
    pub person_company: Vec<ExportRelation>,
    pub person_government: Vec<ExportRelation>,
    pub person_person: Vec<ExportRelation>,
    pub company_company: Vec<ExportRelation>,
    pub company_government: Vec<ExportRelation>,
    pub government_government: Vec<ExportRelation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    pub entities: ExportEntities,
    pub relationships: ExportRelationships,
}

impl ExportRelation {
    fn from_row(row: &Row, from_kind: EntityKind, to_kind: EntityKind) -> Result<Self, StoreError> {
        Ok(Self {
            from_kind,
            to_kind,
            from_id: row.get_opt("from_id")?.unwrap_or_default(),
            to_id: row.get_opt("to_id")?.unwrap_or_default(),
            rel_type: row.get_opt("type")?.unwrap_or_default(),
            notes: row.get_opt("notes")?,
        })
    }
}

fn relations_statement(from: EntityKind, to: EntityKind) -> Statement {
    Statement::new(
        QueryKind::Relations { from, to },
        format!(
            "MATCH (a:{})-[r]->(b:{})
             RETURN a.id AS from_id, b.id AS to_id, type(r) AS type, r.notes AS notes
             ORDER BY from_id, type, to_id",
            from.cypher_label(),
            to.cypher_label()
        ),
    )
    .columns(&["from_id", "to_id", "type", "notes"])
}

async fn relations(
    store: &dyn GraphStore,
    from: EntityKind,
    to: EntityKind,
) -> Result<Vec<ExportRelation>, StoreError> {
    store
        .run(relations_statement(from, to))
        .await?
        .iter()
        .map(|row| ExportRelation::from_row(row, from, to))
        .collect()
}

/// Export every entity and every relationship between entity kinds.
pub async fn export_graph(store: &dyn GraphStore) -> Result<GraphExport, StoreError> {
    use EntityKind::{Company, GovernmentBody, Person};

    Ok(GraphExport {
        entities: ExportEntities {
            people: list_entities(store, Person).await?,
            companies: list_entities(store, Company).await?,
            government_bodies: list_entities(store, GovernmentBody).await?,
        },
        relationships: ExportRelationships {
            person_company: relations(store, Person, Company).await?,
            person_government: relations(store, Person, GovernmentBody).await?,
            person_person: relations(store, Person, Person).await?,
            company_company: relations(store, Company, Company).await?,
            company_government: relations(store, Company, GovernmentBody).await?,
            government_government: relations(store, GovernmentBody, GovernmentBody).await?,
        },
    })
}

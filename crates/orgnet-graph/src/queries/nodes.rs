//! Single-node inspection: one node's details, the id index of every node,
//! and the relationships touching a node.

use orgnet_core::EntityKind;
use serde::{Deserialize, Serialize};

use crate::store::{GraphStore, QueryKind, Row, Statement, StoreError};

/// A node's id, name and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub id: String,
    pub name: Option<String>,
    pub title: Option<String>,
}

/// One entry of the node id index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    /// First label of the node.
    #[serde(rename = "type")]
    pub node_type: Option<String>,
}

/// A relationship incident to a node, seen from that node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRelation {
    pub rel_type: String,
    pub notes: Option<String>,
    pub other_id: Option<String>,
    pub other_name: Option<String>,
    pub other_type: Option<String>,
    pub from_id: Option<String>,
    pub to_id: Option<String>,
}

impl NodeRelation {
    /// Whether the relationship starts at `node_id`.
    pub fn is_outgoing_from(&self, node_id: &str) -> bool {
        self.from_id.as_deref() == Some(node_id)
    }
}

fn detail_statement(id: &str, kind: Option<EntityKind>) -> Statement {
    let pattern = match kind {
        Some(kind) => format!("(n:{} {{id: $id}})", kind.cypher_label()),
        None => "(n {id: $id})".to_string(),
    };
    Statement::new(
        QueryKind::NodeDetail(kind),
        format!(
            "MATCH {}
             RETURN n.id AS id, n.name AS name, n.title AS title
             LIMIT 1",
            pattern
        ),
    )
    .param("id", id)
    .columns(&["id", "name", "title"])
}

/// Look up one node by id, optionally restricted to `kind`.
pub async fn node_detail(
    store: &dyn GraphStore,
    id: &str,
    kind: Option<EntityKind>,
) -> Result<Option<NodeDetail>, StoreError> {
    if id.trim().is_empty() {
        return Ok(None);
    }
    let rows = store.run(detail_statement(id, kind)).await?;
    match rows.first() {
        Some(row) => Ok(Some(NodeDetail {
            id: row.get_opt("id")?.unwrap_or_else(|| id.to_string()),
            name: row.get_opt("name")?,
            title: row.get_opt("title")?,
        })),
        None => Ok(None),
    }
}

/// Every node's id, name and first label, ordered by id.
pub async fn node_ids(store: &dyn GraphStore) -> Result<Vec<NodeSummary>, StoreError> {
    let rows = store
        .run(
            Statement::new(
                QueryKind::NodeIds,
                "MATCH (n)
                 RETURN n.id AS id, n.name AS name, labels(n)[0] AS type
                 ORDER BY id",
            )
            .columns(&["id", "name", "type"]),
        )
        .await?;

    rows.iter()
        .map(|row| {
            Ok(NodeSummary {
                id: row.get_opt("id")?,
                name: row.get_opt("name")?,
                node_type: row.get_opt("type")?,
            })
        })
        .collect()
}

fn relation_from_row(row: &Row) -> Result<NodeRelation, StoreError> {
    Ok(NodeRelation {
        rel_type: row.get("rel_type")?,
        notes: row.get_opt("notes")?,
        other_id: row.get_opt("other_id")?,
        other_name: row.get_opt("other_name")?,
        other_type: row.get_opt("other_type")?,
        from_id: row.get_opt("from_id")?,
        to_id: row.get_opt("to_id")?,
    })
}

/// Relationships touching node `id`, in either direction.
pub async fn node_relations(
    store: &dyn GraphStore,
    id: &str,
) -> Result<Vec<NodeRelation>, StoreError> {
    let statement = Statement::new(
        QueryKind::NodeRelations,
        "MATCH (n {id: $id})-[r]-(m)
         RETURN type(r) AS rel_type, r.notes AS notes,
                m.id AS other_id, m.name AS other_name, labels(m)[0] AS other_type,
                startNode(r).id AS from_id, endNode(r).id AS to_id
         ORDER BY rel_type, other_id",
    )
    .param("id", id)
    .columns(&[
        "rel_type",
        "notes",
        "other_id",
        "other_name",
        "other_type",
        "from_id",
        "to_id",
    ]);

    store
        .run(statement)
        .await?
        .iter()
        .map(relation_from_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryGraph;
    use orgnet_core::RelationType;

    fn store() -> MemoryGraph {
        MemoryGraph::new()
            .person("p1", "Alice", Some("Engineer"))
            .person("p2", "Bob", None)
            .company("c1", "Acme")
            .government("g1", "Ministry X")
            .relate("p1", RelationType::Employed, "c1")
            .relate_with_notes("p2", RelationType::Knows, "p1", Some("college"))
    }

    #[tokio::test]
    async fn test_node_detail() {
        let store = store();
        let alice = node_detail(&store, "p1", Some(EntityKind::Person))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alice.name.as_deref(), Some("Alice"));
        assert_eq!(alice.title.as_deref(), Some("Engineer"));

        let any = node_detail(&store, "g1", None).await.unwrap().unwrap();
        assert_eq!(any.name.as_deref(), Some("Ministry X"));
        assert_eq!(any.title, None);
    }

    #[tokio::test]
    async fn test_node_detail_respects_kind() {
        let store = store();
        assert_eq!(
            node_detail(&store, "c1", Some(EntityKind::Person)).await.unwrap(),
            None
        );
        assert_eq!(node_detail(&store, "nope", None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_id_issues_nothing() {
        let store = store();
        assert_eq!(node_detail(&store, "  ", None).await.unwrap(), None);
        assert!(store.issued().is_empty());
    }

    #[tokio::test]
    async fn test_node_ids() {
        let nodes = node_ids(&store()).await.unwrap();
        let ids: Vec<_> = nodes.iter().filter_map(|n| n.id.as_deref()).collect();
        assert_eq!(ids, vec!["c1", "g1", "p1", "p2"]);
        assert_eq!(nodes[1].node_type.as_deref(), Some("Government Body"));

        let json = serde_json::to_value(&nodes[0]).unwrap();
        assert_eq!(json["type"], "Company");
        assert_eq!(json["name"], "Acme");
    }

    #[tokio::test]
    async fn test_node_relations_both_directions() {
        let relations = node_relations(&store(), "p1").await.unwrap();
        assert_eq!(relations.len(), 2);

        let employed = &relations[0];
        assert_eq!(employed.rel_type, "employed");
        assert_eq!(employed.other_id.as_deref(), Some("c1"));
        assert_eq!(employed.other_type.as_deref(), Some("Company"));
        assert!(employed.is_outgoing_from("p1"));

        let knows = &relations[1];
        assert_eq!(knows.rel_type, "knows");
        assert_eq!(knows.notes.as_deref(), Some("college"));
        assert_eq!(knows.other_name.as_deref(), Some("Bob"));
        assert!(!knows.is_outgoing_from("p1"));
        assert_eq!(knows.from_id.as_deref(), Some("p2"));
    }

    #[tokio::test]
    async fn test_node_relations_of_unknown_node() {
        assert!(node_relations(&store(), "zz").await.unwrap().is_empty());
    }
}

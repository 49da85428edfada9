//! Whole-graph views: the full visualization payload and node/relationship
//! counts.

use orgnet_core::{EntityKind, GraphEdge, VisualizationPayload};
use serde::Serialize;
use tracing::debug;

use crate::queries::directory::list_entities;
use crate::store::{GraphStore, QueryKind, Statement, StoreError};

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}

fn all_relations_statement() -> Statement {
    Statement::new(
        QueryKind::AllRelations,
        "MATCH (a)-[r]->(b)
         RETURN a.id AS from_id, b.id AS to_id, type(r) AS type, r.notes AS notes
         ORDER BY from_id, type, to_id",
    )
    .columns(&["from_id", "to_id", "type", "notes"])
}

/// Every person, company and government body with every relationship
/// between them, shaped like a path payload.
pub async fn full_graph(store: &dyn GraphStore) -> Result<VisualizationPayload, StoreError> {
    let mut payload = VisualizationPayload::new();

    for kind in EntityKind::ALL {
        for entry in list_entities(store, kind).await? {
            payload.push_node(entry.to_graph_node(kind).to_vis());
        }
    }

    for row in store.run(all_relations_statement()).await? {
        let edge = GraphEdge {
            from: row.get_opt("from_id")?.unwrap_or_default(),
            to: row.get_opt("to_id")?.unwrap_or_default(),
            rel_type: row.get_opt("type")?,
            notes: row.get_opt("notes")?,
        };
        payload.push_edge(edge.to_vis());
    }

    let dropped = payload.retain_connected_edges();
    if dropped > 0 {
        debug!(dropped, "Skipped relationships touching unlisted nodes");
    }
    Ok(payload)
}

async fn count(store: &dyn GraphStore, kind: QueryKind, text: &str) -> Result<usize, StoreError> {
    let rows = store
        .run(Statement::new(kind, text).columns(&["count"]))
        .await?;
    match rows.first() {
        Some(row) => Ok(row.get_opt::<i64>("count")?.unwrap_or(0).max(0) as usize),
        None => Ok(0),
    }
}

/// Get node and relationship counts for status display.
pub async fn graph_counts(store: &dyn GraphStore) -> Result<GraphCounts, StoreError> {
    Ok(GraphCounts {
        nodes: count(store, QueryKind::CountNodes, "MATCH (n) RETURN count(n) AS count").await?,
        relationships: count(
            store,
            QueryKind::CountRelations,
            "MATCH ()-[r]->() RETURN count(r) AS count",
        )
        .await?,
    })
}

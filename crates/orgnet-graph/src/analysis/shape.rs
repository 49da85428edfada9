//! Turning a traversal row into a visualization payload.

use orgnet_core::{GraphEdge, GraphNode, RelationType, VisEdge, VisualizationPayload};
use tracing::{debug, warn};

use crate::store::{Row, StoreError};

use super::cypher::{
    COL_FIRST_ANCHOR, COL_FIRST_BRIDGE, COL_FIRST_PERSON, COL_PATH_EDGES, COL_PATH_NODES,
    COL_SECOND_ANCHOR, COL_SECOND_BRIDGE, COL_SECOND_PERSON,
};

/// An organization at one end of a path and the person bridging into it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Boundary {
    pub organization: GraphNode,
    pub person_id: String,
    pub relation: Option<String>,
}

impl Boundary {
    fn edge(&self) -> VisEdge {
        GraphEdge {
            from: self.person_id.clone(),
            to: self.organization.id.clone(),
            rel_type: Some(
                self.relation
                    .clone()
                    .unwrap_or_else(|| RelationType::Employed.to_string()),
            ),
            notes: None,
        }
        .to_vis()
    }
}

/// Decoded traversal result.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TraversalRow {
    pub first: Option<Boundary>,
    pub second: Option<Boundary>,
    pub path_nodes: Vec<GraphNode>,
    pub path_edges: Vec<GraphEdge>,
}

impl TraversalRow {
    /// Decode a person-to-person row (no boundaries).
    pub fn from_person_row(row: &Row) -> Result<Self, StoreError> {
        let path_nodes: Vec<GraphNode> = row.get_opt(COL_PATH_NODES)?.unwrap_or_default();
        // A node without an id cannot be placed in the payload, and the chain would break there.
        if let Some(position) = path_nodes.iter().position(|n| n.id.is_empty()) {
            warn!(position, "Path node has no id");
            return Err(StoreError::Decode {
                column: COL_PATH_NODES.to_string(),
                message: format!("path node {} has no id", position),
            });
        }
        Ok(Self {
            first: None,
            second: None,
            path_nodes,
            path_edges: row.get_opt(COL_PATH_EDGES)?.unwrap_or_default(),
        })
    }

    /// Decode an organization-to-organization row.
    pub fn from_organization_row(row: &Row) -> Result<Self, StoreError> {
        let mut traversal = Self::from_person_row(row)?;
        traversal.first = boundary(row, COL_FIRST_ANCHOR, COL_FIRST_PERSON, COL_FIRST_BRIDGE)?;
        traversal.second = boundary(row, COL_SECOND_ANCHOR, COL_SECOND_PERSON, COL_SECOND_BRIDGE)?;
        Ok(traversal)
    }

    /// Build the payload: first boundary, path nodes, second boundary, with
    /// the bridge edges wrapped around the path edges in the same order.
    pub fn into_payload(self) -> VisualizationPayload {
        let mut payload = VisualizationPayload::new();

        if let Some(first) = &self.first {
            payload.push_node(first.organization.to_vis());
        }
        for node in &self.path_nodes {
            payload.push_node(node.to_vis());
        }
        if let Some(second) = &self.second {
            payload.push_node(second.organization.to_vis());
        }

        if let Some(first) = &self.first {
            payload.push_edge(first.edge());
        }
        for edge in &self.path_edges {
            payload.push_edge(edge.to_vis());
        }
        if let Some(second) = &self.second {
            payload.push_edge(second.edge());
        }

        let dropped = payload.retain_connected_edges();
        if dropped > 0 {
            debug!(dropped, "Dropped edges pointing outside the path");
        }
        debug_assert!(payload.validate().is_ok(), "path payload has dangling edges");
        payload
    }
}

fn boundary(
    row: &Row,
    anchor_col: &str,
    person_col: &str,
    bridge_col: &str,
) -> Result<Option<Boundary>, StoreError> {
    let organization: Option<GraphNode> = row.get_opt(anchor_col)?;
    let person_id: Option<String> = row.get_opt(person_col)?;
    Ok(match (organization, person_id) {
        (Some(organization), Some(person_id)) => Some(Boundary {
            organization,
            person_id,
            relation: row.get_opt(bridge_col)?,
        }),
        _ => None,
    })
}

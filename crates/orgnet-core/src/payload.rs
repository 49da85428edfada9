//! Node/edge payload consumed by graph visualization widgets.
//!
//! Nodes are kept in an insertion-ordered map keyed by id so repeated ids
//! collapse onto their first occurrence. On the wire the payload is the
//! familiar `{"nodes": [...], "edges": [...]}` shape.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OrgnetError, OrgnetResult};

/// A node in a visualization payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    pub group: String,
    pub title: String,
}

/// A directed edge in a visualization payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub title: String,
}

/// Ordered, id-deduplicated nodes plus ordered edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationPayload {
    #[serde(serialize_with = "serialize_nodes", deserialize_with = "deserialize_nodes")]
    nodes: IndexMap<String, VisNode>,
    edges: Vec<VisEdge>,
}

impl VisualizationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id is already present.
    ///
    /// Returns `true` when the node was inserted.
    pub fn push_node(&mut self, node: VisNode) -> bool {
        if node.id.is_empty() || self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub fn push_edge(&mut self, edge: VisEdge) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &VisNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn node(&self, id: &str) -> Option<&VisNode> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[VisEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Drop edges whose endpoints are not in the node set.
    ///
    /// Returns the number of edges removed.
    pub fn retain_connected_edges(&mut self) -> usize {
        let before = self.edges.len();
        let nodes = &self.nodes;
        self.edges
            .retain(|e| nodes.contains_key(&e.from) && nodes.contains_key(&e.to));
        before - self.edges.len()
    }

    /// Check that every edge endpoint names a node in the payload.
    pub fn validate(&self) -> OrgnetResult<()> {
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(OrgnetError::validation(format!(
                        "edge {} -[{}]-> {} references unknown node '{}'",
                        edge.from, edge.label, edge.to, endpoint
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> OrgnetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_nodes<S: Serializer>(
    nodes: &IndexMap<String, VisNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(nodes.values())
}

fn deserialize_nodes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexMap<String, VisNode>, D::Error> {
    let list = Vec::<VisNode>::deserialize(deserializer)?;
    let mut nodes = IndexMap::with_capacity(list.len());
    for node in list {
        nodes.entry(node.id.clone()).or_insert(node);
    }
    Ok(nodes)
}

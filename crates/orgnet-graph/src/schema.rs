//! Static schema graph: which relationship types connect which entity kinds.

use orgnet_core::{EntityKind, RelationType, VisEdge, VisNode, VisualizationPayload};

/// (from, relation, to) triples allowed by the console's data model.
pub const SCHEMA_EDGES: &[(EntityKind, RelationType, EntityKind)] = &[
    (EntityKind::Person, RelationType::Knows, EntityKind::Person),
    (EntityKind::Person, RelationType::WorksWith, EntityKind::Person),
    (EntityKind::Person, RelationType::FormerlyEmployed, EntityKind::Company),
    (EntityKind::Person, RelationType::Employed, EntityKind::Company),
    (EntityKind::Company, RelationType::Contracts, EntityKind::Company),
    (EntityKind::Company, RelationType::KnownCollaborator, EntityKind::Company),
    (EntityKind::Person, RelationType::FormerlyEmployed, EntityKind::GovernmentBody),
    (EntityKind::Person, RelationType::Employed, EntityKind::GovernmentBody),
    (EntityKind::GovernmentBody, RelationType::Contracts, EntityKind::Company),
    (EntityKind::GovernmentBody, RelationType::KnownCollaborator, EntityKind::GovernmentBody),
];

/// Schema as a visualization payload: one node per kind, one edge per triple.
pub fn schema_graph() -> VisualizationPayload {
    let mut payload = VisualizationPayload::new();
    for kind in EntityKind::ALL {
        payload.push_node(VisNode {
            id: kind.group().to_string(),
            label: kind.store_label().to_string(),
            group: kind.group().to_string(),
            title: kind.store_label().to_string(),
        });
    }
    for (from, relation, to) in SCHEMA_EDGES {
        payload.push_edge(VisEdge {
            from: from.group().to_string(),
            to: to.group().to_string(),
            label: relation.to_string(),
            title: String::new(),
        });
    }
    payload
}

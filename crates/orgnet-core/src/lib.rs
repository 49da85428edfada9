//! Orgnet Core Library
//!
//! Domain model shared by the graph layer and the surfaces: entity kinds,
//! relation types, person anchor parsing and the node/edge payload handed
//! to graph visualizations.

pub mod anchor;
pub mod error;
pub mod model;
pub mod payload;

pub use error::{OrgnetError, OrgnetResult};
pub use model::{EntityKind, GraphEdge, GraphNode, RelationType};
pub use payload::{VisEdge, VisNode, VisualizationPayload};

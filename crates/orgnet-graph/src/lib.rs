//! # Orgnet Graph
//!
//! Neo4j access for the orgnet console.
//!
//! Provides the `GraphStore` seam and its neo4rs-backed client, the
//! network-analysis path engine, and the read-only catalog queries
//! (directory, canned lookups, node inspection, full graph, export).

pub mod analysis;
pub mod client;
pub mod queries;
pub mod schema;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use analysis::{AnalysisError, AnalysisMode, PathAnalyzer, PathResult, MAX_HOPS};
pub use client::{GraphClient, GraphConfig};
pub use store::{GraphStore, QueryKind, Row, Statement, StoreError};

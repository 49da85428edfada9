//! Route handlers.

pub mod analysis;
pub mod directory;
pub mod graph;
pub mod lookups;
pub mod nodes;

use axum::http::StatusCode;
use orgnet_graph::StoreError;

/// Handler error: a status and a plain-text message.
pub type ApiError = (StatusCode, String);

/// The graph store sits behind this server, so its failures are reported
/// as a bad gateway.
pub(crate) fn store_error(err: StoreError) -> ApiError {
    tracing::warn!(error = %err, "Graph store request failed");
    (StatusCode::BAD_GATEWAY, err.to_string())
}

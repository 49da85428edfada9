//! Node inspection route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use orgnet_core::EntityKind;
use orgnet_graph::queries::nodes::{self, NodeDetail, NodeRelation, NodeSummary};
use serde::Deserialize;

use super::{store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NodeQuery {
    pub id: Option<String>,
    pub node_type: Option<String>,
}

pub async fn node_detail(
    State(state): State<AppState>,
    Query(query): Query<NodeQuery>,
) -> Result<Json<NodeDetail>, ApiError> {
    let kind = match query.node_type.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(label) => Some(
            label
                .parse::<EntityKind>()
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        ),
        None => None,
    };
    let id = query.id.unwrap_or_default();

    nodes::node_detail(state.store.as_ref(), &id, kind)
        .await
        .map_err(store_error)?
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Node not found".to_string()))
}

pub async fn node_ids(State(state): State<AppState>) -> Result<Json<Vec<NodeSummary>>, ApiError> {
    let nodes = nodes::node_ids(state.store.as_ref())
        .await
        .map_err(store_error)?;
    Ok(Json(nodes))
}

pub async fn node_relations(
    State(state): State<AppState>,
    Query(query): Query<NodeQuery>,
) -> Result<Json<Vec<NodeRelation>>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing id".to_string()))?;

    let relations = nodes::node_relations(state.store.as_ref(), &id)
        .await
        .map_err(store_error)?;
    Ok(Json(relations))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::routes::test_support::{app, fixture, get};

    #[tokio::test]
    async fn test_node_detail() {
        let (status, _, body) = get(app(fixture()), "/api/node?id=p1&node_type=Person").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({"id": "p1", "name": "Pat", "title": "Deputy Minister"})
        );
    }

    #[tokio::test]
    async fn test_node_detail_accepts_store_label() {
        let (status, _, body) =
            get(app(fixture()), "/api/node?id=g1&node_type=Government%20Body").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["name"], "Ministry X");
        assert_eq!(body["title"], Value::Null);
    }

    #[tokio::test]
    async fn test_node_detail_not_found() {
        let (status, _, body) = get(app(fixture()), "/api/node?id=c1&node_type=Person").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Node not found");

        let (status, _, _) = get(app(fixture()), "/api/node").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_node_detail_unknown_type() {
        let (status, _, _) = get(app(fixture()), "/api/node?id=p1&node_type=Planet").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_node_ids() {
        let (status, _, body) = get(app(fixture()), "/api/node-ids").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        let nodes = body.as_array().unwrap();
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[0], json!({"id": "c1", "name": "Acme", "type": "Company"}));
    }

    #[tokio::test]
    async fn test_node_relations() {
        let (status, _, body) = get(app(fixture()), "/api/node-relations?id=c1").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        let relations = body.as_array().unwrap();
        assert_eq!(relations.len(), 3);
        assert_eq!(relations[0]["rel_type"], "contracts");
        assert_eq!(relations[0]["other_type"], "Government Body");
        assert_eq!(relations[0]["from_id"], "g1");
        assert_eq!(relations[0]["to_id"], "c1");
        assert_eq!(relations[2]["rel_type"], "formerly_employed");
        assert_eq!(relations[2]["notes"], "left in 2020");
    }

    #[tokio::test]
    async fn test_node_relations_requires_id() {
        let (status, _, body) = get(app(fixture()), "/api/node-relations").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"Missing id");

        let (status, _, _) = get(app(fixture()), "/api/node-relations?id=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_node_store_failure() {
        let (status, _, _) = get(app(fixture().failing("timeout")), "/api/node-ids").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}

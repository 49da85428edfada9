//! Canned lookup route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use orgnet_graph::queries::lookup::{self, CannedLookup, LookupError, LookupTable, LOOKUPS};
use serde::Deserialize;

use super::{store_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub identifier: String,
}

pub async fn list_lookups() -> Json<&'static [CannedLookup]> {
    Json(LOOKUPS)
}

pub async fn run_lookup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<LookupTable>, ApiError> {
    let table = lookup::run_lookup(state.store.as_ref(), &id, &req.identifier)
        .await
        .map_err(|e| match e {
            LookupError::UnknownLookup(_) => (StatusCode::NOT_FOUND, e.to_string()),
            LookupError::MissingIdentifier => (StatusCode::BAD_REQUEST, e.to_string()),
            LookupError::Store(e) => store_error(e),
        })?;
    Ok(Json(table))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::routes::test_support::{app, fixture, get, post_json};

    #[tokio::test]
    async fn test_menu() {
        let (status, _, body) = get(app(fixture()), "/api/queries").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body[0]["id"], "former_employees");
        assert_eq!(body[0]["anchor"], "Company");
        assert!(body[0].get("cypher").is_none());
    }

    #[tokio::test]
    async fn test_run_lookup() {
        let (status, _, body) = post_json(
            app(fixture()),
            "/api/queries/former_employees",
            json!({"identifier": "c1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["title"], "Find former employees of a company");
        assert_eq!(body["rows"], json!([["Bob", null, "left in 2020"]]));
    }

    #[tokio::test]
    async fn test_lookup_errors() {
        let (status, _, _) =
            post_json(app(fixture()), "/api/queries/nope", json!({"identifier": "c1"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) =
            post_json(app(fixture()), "/api/queries/gov_contracts", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"Missing identifier parameter");
    }
}

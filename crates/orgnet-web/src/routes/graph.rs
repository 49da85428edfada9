//! Whole-graph views and export.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use orgnet_core::VisualizationPayload;
use orgnet_graph::queries::{export, overview};
use orgnet_graph::schema::schema_graph;

use super::{store_error, ApiError};
use crate::state::AppState;

pub async fn schema_data() -> Json<VisualizationPayload> {
    Json(schema_graph())
}

pub async fn full_graph(State(state): State<AppState>) -> Result<Json<VisualizationPayload>, ApiError> {
    let payload = overview::full_graph(state.store.as_ref())
        .await
        .map_err(store_error)?;
    Ok(Json(payload))
}

/// Download the whole graph as `export.json`.
pub async fn export_json(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let export = export::export_graph(state.store.as_ref())
        .await
        .map_err(store_error)?;
    Ok((
        [(header::CONTENT_DISPOSITION, "attachment;filename=export.json")],
        Json(export),
    ))
}

//! Network analysis route.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use orgnet_graph::{AnalysisError, AnalysisMode, PathAnalyzer, PathResult};

use crate::state::AppState;

fn status_for(result: &Result<orgnet_core::VisualizationPayload, AnalysisError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) if e.is_not_found() => StatusCode::NOT_FOUND,
        Err(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Run one analysis. The body is an `AnalysisMode` tagged by `analysis_type`.
pub async fn network_analysis(
    State(state): State<AppState>,
    body: Result<Json<AnalysisMode>, JsonRejection>,
) -> (StatusCode, Json<PathResult>) {
    let mode = match body {
        Ok(Json(mode)) => mode,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(PathResult::Error {
                    error: format!("Invalid analysis request: {}", rejection.body_text()),
                }),
            )
        }
    };

    let result = PathAnalyzer::new(state.store.as_ref()).analyze(&mode).await;
    (status_for(&result), Json(result.into()))
}

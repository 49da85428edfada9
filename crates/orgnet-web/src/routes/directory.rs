//! Directory route handlers: the entities analysis anchors are picked from.

use axum::{extract::State, Json};
use orgnet_core::{EntityKind, RelationType};
use orgnet_graph::queries::directory::{list_entities, DirectoryEntry};
use serde::Serialize;

use super::{store_error, ApiError};
use crate::state::AppState;

/// A person with the `Name [id]` text the analysis endpoint accepts.
#[derive(Debug, Serialize)]
pub struct PersonOption {
    #[serde(flatten)]
    pub entry: DirectoryEntry,
    pub choice: String,
}

async fn list(state: &AppState, kind: EntityKind) -> Result<Vec<DirectoryEntry>, ApiError> {
    list_entities(state.store.as_ref(), kind)
        .await
        .map_err(store_error)
}

pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<PersonOption>>, ApiError> {
    let people = list(&state, EntityKind::Person)
        .await?
        .into_iter()
        .map(|entry| PersonOption {
            choice: entry.person_choice(),
            entry,
        })
        .collect();
    Ok(Json(people))
}

pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectoryEntry>>, ApiError> {
    Ok(Json(list(&state, EntityKind::Company).await?))
}

pub async fn list_governments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectoryEntry>>, ApiError> {
    Ok(Json(list(&state, EntityKind::GovernmentBody).await?))
}

pub async fn relationship_types() -> Json<Vec<&'static str>> {
    Json(RelationType::ALL.iter().map(|t| t.as_str()).collect())
}

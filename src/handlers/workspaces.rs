//! Workspace CRUD. Workspaces are the partition key, so the list is never
//! scoped and the routes bypass the generic entity handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store::models::Workspace;
use crate::store::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).patch(update).delete(remove))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<Workspace>> {
    Json(state.workspaces.list())
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Workspace>, ApiError> {
    state
        .workspaces
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("workspace {} not found", id)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(mut payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let obj = payload
        .as_object_mut()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;
    obj.remove("id");
    obj.remove("createdAt");

    let workspace: Workspace = serde_json::from_value(payload)
        .map_err(|e| ApiError::validation_error(format!("Invalid workspace payload: {}", e)))?;

    let created = state.workspaces.insert(workspace);
    tracing::info!(id = created.id, name = %created.name, "workspace created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<Workspace>, ApiError> {
    let patch = payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    let existing = state
        .workspaces
        .get(id)
        .ok_or_else(|| ApiError::not_found(format!("workspace {} not found", id)))?;

    let mut merged = serde_json::to_value(&existing)
        .map_err(|e| ApiError::internal_server_error(format!("serialization failed: {}", e)))?;
    let merged_obj = merged
        .as_object_mut()
        .ok_or_else(|| ApiError::internal_server_error("stored row is not a JSON object"))?;
    for (key, value) in patch {
        if key == "id" || key == "createdAt" {
            continue;
        }
        merged_obj.insert(key.clone(), value.clone());
    }

    let workspace: Workspace = serde_json::from_value(merged)
        .map_err(|e| ApiError::validation_error(format!("Invalid workspace payload: {}", e)))?;

    state
        .workspaces
        .replace(id, workspace)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("workspace {} not found", id)))
}

/// Deleting a workspace does not cascade; rows scoped to it simply become
/// unreachable through normal listing.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.workspaces.remove(id) {
        Some(ws) => {
            tracing::info!(id, name = %ws.name, "workspace deleted");
            Ok(Json(json!({
                "message": format!("workspace {} deleted", id)
            })))
        }
        None => Err(ApiError::not_found(format!("workspace {} not found", id))),
    }
}

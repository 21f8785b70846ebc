//! Generic CRUD handlers shared by every workspace-scoped entity.
//!
//! The original system carried one hand-written controller per entity, all
//! structurally identical. Here a single handler set is parameterized by the
//! `Entity` trait and mounted once per entity type.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::WorkspaceScope;
use crate::store::repository::Entity;
use crate::store::AppState;

/// Routes for one entity type: list/create on the collection, get/update/
/// delete on the item. PUT and PATCH share merge semantics.
pub fn entity_routes<T: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route(
            "/:id",
            get(get_one::<T>)
                .put(update::<T>)
                .patch(update::<T>)
                .delete(remove::<T>),
        )
}

/// GET / - all rows in the resolved workspace.
pub async fn list<T: Entity>(
    State(state): State<AppState>,
    scope: WorkspaceScope,
) -> Json<Vec<T>> {
    Json(T::repo(&state).list_scoped(scope.0))
}

/// GET /:id - one row by id, workspace-agnostic like the original.
pub async fn get_one<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<T>, ApiError> {
    T::repo(&state)
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("{} {} not found", T::NAME, id)))
}

/// POST / - create a row. The server assigns id and createdAt; workspace_id
/// comes from the body or falls back to the resolved scope.
pub async fn create<T: Entity>(
    State(state): State<AppState>,
    scope: WorkspaceScope,
    Json(mut payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let obj = payload
        .as_object_mut()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    if !obj.contains_key("workspace_id") || obj["workspace_id"].is_null() {
        obj.insert("workspace_id".to_string(), json!(scope.0));
    }
    // id and createdAt are server-assigned, whatever the client sent
    obj.remove("id");
    obj.remove("createdAt");

    let row: T = serde_json::from_value(payload)
        .map_err(|e| ApiError::validation_error(format!("Invalid {} payload: {}", T::NAME, e)))?;

    let created = T::repo(&state).insert(row);
    tracing::debug!(entity = T::NAME, id = created.id(), "created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT/PATCH /:id - merge the payload over the stored row. id and createdAt
/// are immutable.
pub async fn update<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<T>, ApiError> {
    let patch = payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    let existing = T::repo(&state)
        .get(id)
        .ok_or_else(|| ApiError::not_found(format!("{} {} not found", T::NAME, id)))?;

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

    let row: T = serde_json::from_value(merged)
        .map_err(|e| ApiError::validation_error(format!("Invalid {} payload: {}", T::NAME, e)))?;

    T::repo(&state)
        .replace(id, row)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("{} {} not found", T::NAME, id)))
}

/// DELETE /:id - remove the row. A second delete of the same id is a 404,
/// never a silent success.
pub async fn remove<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match T::repo(&state).remove(id) {
        Some(_) => {
            tracing::debug!(entity = T::NAME, id, "deleted");
            Ok(Json(json!({
                "message": format!("{} {} deleted", T::NAME, id)
            })))
        }
        None => Err(ApiError::not_found(format!("{} {} not found", T::NAME, id))),
    }
}

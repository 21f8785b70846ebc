//! Document routes: the generic CRUD set plus multipart upload and binary
//! download, both wired to the in-memory blob store.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use chrono::Utc;

use crate::error::ApiError;
use crate::handlers::entities;
use crate::middleware::{AuthUser, WorkspaceScope};
use crate::store::files::StoredFile;
use crate::store::models::Document;
use crate::store::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(entities::list::<Document>).post(entities::create::<Document>),
        )
        .route("/upload", post(upload))
        .route(
            "/:id",
            get(entities::get_one::<Document>)
                .put(entities::update::<Document>)
                .patch(entities::update::<Document>)
                .delete(remove),
        )
        .route("/:id/download", get(download))
}

/// POST /upload - multipart form with a `file` part and optional `name` and
/// `project_id` fields. Creates the document row and stores the blob under
/// its id.
pub async fn upload(
    State(state): State<AppState>,
    scope: WorkspaceScope,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<StoredFile> = None;
    let mut name: Option<String> = None;
    let mut project_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("upload.bin")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read file part: {}", e)))?;
                file = Some(StoredFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "name" => {
                name = Some(field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("failed to read name field: {}", e))
                })?);
            }
            "project_id" => {
                let raw = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("failed to read project_id field: {}", e))
                })?;
                project_id = raw.trim().parse::<i64>().ok();
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("missing `file` part"))?;

    let document = state.documents.insert(Document {
        id: 0,
        workspace_id: scope.0,
        name: name.unwrap_or_else(|| file.file_name.clone()),
        file_name: file.file_name.clone(),
        content_type: file.content_type.clone(),
        size: file.bytes.len() as i64,
        project_id,
        uploaded_by: Some(auth.user_id),
        status: "active".to_string(),
        created_at: Utc::now(),
    });
    state.files.put(document.id, file);

    tracing::info!(
        id = document.id,
        size = document.size,
        "document uploaded"
    );
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /:id/download - the stored bytes, filename carried in
/// Content-Disposition.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .documents
        .get(id)
        .ok_or_else(|| ApiError::not_found(format!("document {} not found", id)))?;

    let file = state
        .files
        .get(id)
        .ok_or_else(|| ApiError::not_found(format!("document {} has no stored content", id)))?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ),
    ];
    Ok((headers, file.bytes))
}

/// DELETE /:id - remove the row AND its blob, then report like the generic
/// delete does.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.documents.remove(id) {
        Some(_) => {
            state.files.remove(id);
            Ok(Json(serde_json::json!({
                "message": format!("document {} deleted", id)
            })))
        }
        None => Err(ApiError::not_found(format!("document {} not found", id))),
    }
}

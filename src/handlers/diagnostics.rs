use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::store::AppState;

/// GET / - service banner.
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Opsdesk API",
        "version": version,
        "description": "Workspace-scoped CRUD administration backend",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/login (public), /auth/profile, /auth/logout (bearer)",
            "entities": "/api/v2/<plural>[/:id] (bearer, workspace-scoped)",
            "workspaces": "/api/v2/workspaces[/:id] (bearer)",
            "documents": "/api/v2/documents/upload, /api/v2/documents/:id/download (bearer)",
            "diagnostics": "/api/v2/data-viewer/all (bearer)",
        }
    }))
}

/// GET /health - liveness plus store row counts. The store is in-memory, so
/// there is no dependency that could degrade; the counts confirm seeding ran.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "entities": state.counts(),
    }))
}

/// GET /api/v2/data-viewer/all - administrative introspection: row counts per
/// entity across all workspaces.
pub async fn data_viewer(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "counts": state.counts(),
        "workspaces": state.workspaces.list(),
    }))
}

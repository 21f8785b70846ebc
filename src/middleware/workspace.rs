use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::error::ApiError;

pub const WORKSPACE_HEADER: &str = "x-workspace-id";
pub const DEFAULT_WORKSPACE_ID: i64 = 1;

/// Resolved workspace scope for a request.
///
/// The `X-Workspace-Id` header takes precedence over the `workspace_id` query
/// parameter; with neither present the scope falls back to workspace 1. The
/// id is deliberately not checked against the workspace store: an unknown
/// workspace simply scopes to zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceScope(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for WorkspaceScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(value) = parts.headers.get(WORKSPACE_HEADER) {
            let raw = value
                .to_str()
                .map_err(|_| ApiError::bad_request("Invalid X-Workspace-Id header"))?;
            let id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ApiError::bad_request("X-Workspace-Id must be an integer"))?;
            return Ok(WorkspaceScope(id));
        }

        if let Some(query) = parts.uri.query() {
            for pair in query.split('&') {
                if let Some(raw) = pair.strip_prefix("workspace_id=") {
                    let id = raw
                        .parse::<i64>()
                        .map_err(|_| ApiError::bad_request("workspace_id must be an integer"))?;
                    return Ok(WorkspaceScope(id));
                }
            }
        }

        Ok(WorkspaceScope(DEFAULT_WORKSPACE_ID))
    }
}

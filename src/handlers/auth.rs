use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::store::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(profile))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - verify credentials and issue a JWT.
///
/// The password is checked against the stored argon2 hash; there is no
/// fixed-credential shortcut.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let user = state
        .users
        .all()
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(body.email.trim()));

    let user = match user {
        Some(u) if verify_password(&body.password, &u.password_hash) => u,
        _ => {
            // Same message for unknown email and bad password
            tracing::info!(email = %body.email, "failed login attempt");
            return Err(ApiError::unauthorized("Invalid email or password"));
        }
    };

    let claims = Claims::new(user.id, user.email.clone(), user.name.clone(), user.role.clone());
    let token = generate_jwt(&claims)
        .map_err(|e| ApiError::internal_server_error(format!("token generation failed: {}", e)))?;

    tracing::info!(user_id = user.id, "login succeeded");
    Ok(Json(json!({
        "token": token,
        "access_token": token,
        "user": user,
    })))
}

/// GET /auth/profile - the authenticated user's current record.
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .get(auth.user_id)
        .ok_or_else(|| ApiError::not_found("user no longer exists"))?;

    Ok(Json(json!({ "user": user })))
}

/// POST /auth/logout - tokens are stateless, so this is a client-side
/// operation; the server only acknowledges it.
pub async fn logout(Extension(auth): Extension<AuthUser>) -> Json<Value> {
    tracing::debug!(user_id = auth.user_id, "logout");
    Json(json!({ "message": "Logged out" }))
}

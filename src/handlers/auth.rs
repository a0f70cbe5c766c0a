//! Login and profile handlers.
//!
//! `/api/auth/*` sits outside the gate's matcher, so these handlers verify
//! the token themselves via `auth::authenticate`.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::database::{ProfileUpdate, UserRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Value> {
    let (email, password) = match (body.email.as_deref(), body.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::bad_request("Email and password are required")),
    };

    let users = UserRepository::new(state.db.pool().await?);
    let user = users
        .find_by_email(email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !auth::verify_password(password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    if !user.is_active {
        return Err(ApiError::forbidden("Account is deactivated"));
    }

    let claims = Claims::new(user.id, user.role.clone());
    let token = auth::generate_jwt(&claims)?;

    tracing::info!("login: {} ({})", user.email, user.role);

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user.to_api_value(),
    })))
}

fn invalid_credentials() -> ApiError {
    // One message for unknown email and wrong password
    ApiError::unauthorized("Invalid email or password")
}

/// GET /api/auth/profile
pub async fn profile_get(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Value> {
    let claims = auth::authenticate(&headers)?;

    let users = UserRepository::new(state.db.pool().await?);
    let user = users
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user.to_api_value()))
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// PUT /api/auth/profile
pub async fn profile_put(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ProfileRequest>,
) -> ApiResult<Value> {
    let claims = auth::authenticate(&headers)?;

    let changes = ProfileUpdate {
        name: body.name.filter(|s| !s.is_empty()),
        email: body.email.filter(|s| !s.is_empty()),
        password_hash: match body.password.filter(|s| !s.is_empty()) {
            Some(password) => Some(auth::hash_password(&password)?),
            None => None,
        },
    };

    if changes.is_empty() {
        return Err(ApiError::bad_request("No changes provided"));
    }

    let users = UserRepository::new(state.db.pool().await?);
    let user = users
        .update_profile(claims.user_id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user.to_api_value()))
}

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::config;
use crate::error::ApiError;

/// Role allowed to mutate content through the gate.
pub const ROLE_ADMIN: &str = "admin";
/// Role with read-only access to the admin surface.
pub const ROLE_EDITOR: &str = "editor";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user_id,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("password hashing error: {0}")]
    Hashing(String),
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config().security.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate a JWT and extract its claims
pub fn verify_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid token: {}", e))?;

    Ok(token_data.claims)
}

pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plain, hash).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Extract a bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Extract the admin token from the Cookie header
pub fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let token = pair.trim().strip_prefix("admin_token=")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    })
}

/// Authenticate a request from its headers, bearer first then cookie.
/// Used by routes outside the gate's matcher (`/api/auth/*`, `/api/audit-logs`)
/// which verify the token themselves.
pub fn authenticate(headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = bearer_token(headers)
        .or_else(|| cookie_token(headers))
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    verify_jwt(&token).map_err(ApiError::unauthorized)
}

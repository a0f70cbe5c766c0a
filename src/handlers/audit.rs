//! Admin read of the audit trail.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::{self, ROLE_ADMIN};
use crate::database::{AuditQuery, AuditRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 100;

/// GET /api/audit-logs?userId=&action=&limit=
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Value> {
    let claims = auth::authenticate(&headers)?;
    if claims.role != ROLE_ADMIN {
        return Err(ApiError::forbidden("Admin role required"));
    }

    let user_id = match params.get("userId") {
        Some(raw) => Some(
            Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid userId format"))?,
        ),
        None => None,
    };

    let query = AuditQuery {
        user_id,
        action: params.get("action").cloned(),
        limit: params
            .get("limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LIMIT),
    };

    let repository = AuditRepository::new(state.db.pool().await?);
    let rows = repository.list(&query).await?;
    let data: Vec<Value> = rows.iter().map(|r| r.to_api_value()).collect();

    Ok(ApiResponse::success(json!(data)))
}

//! Generic CRUD handlers over `/api/content/:content_type`.
//!
//! One route family serves every registered content type; the registry
//! entry decides validation, filtering, and which public pages get
//! revalidated. Writes only reach these handlers after the gate verified
//! an admin token, so the handlers read identity from the injected
//! headers instead of re-checking the token.

use axum::extract::{Path, Query, State};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::content::registry::{lookup, ContentKind, ContentTypeDef};
use crate::content::validate::{validate_create, validate_update};
use crate::database::{AuditEntry, ContentRepository, ListOptions};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, GateUser, MaybeGateUser};
use crate::state::AppState;

/// GET /api/content/:content_type
pub async fn list(
    Path(content_type): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    MaybeGateUser(user): MaybeGateUser,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    let def = lookup_def(&content_type)?;
    let repository = ContentRepository::new(state.db.pool().await?);

    if def.kind == ContentKind::Config {
        let row = repository.get_config(def).await?;
        return Ok(ApiResponse::success(
            row.map(|r| r.to_api_value()).unwrap_or(Value::Null),
        ));
    }

    let wants_all = params
        .get("all")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_admin = user.map(|u| u.is_admin()).unwrap_or(false);

    let options = ListOptions {
        include_inactive: wants_all && is_admin,
        filters: def
            .filters
            .iter()
            .filter_map(|field| params.get(*field).map(|value| (*field, value.clone())))
            .collect(),
        limit: params.get("limit").and_then(|v| v.parse().ok()),
    };

    let rows = repository.list(def, &options).await?;
    let data: Vec<Value> = rows.iter().map(|r| r.to_api_value()).collect();

    Ok(ApiResponse::success(json!(data)))
}

/// POST /api/content/:content_type
pub async fn create(
    Path(content_type): Path<String>,
    State(state): State<AppState>,
    user: GateUser,
    axum::Json(payload): axum::Json<Value>,
) -> ApiResult<Value> {
    let def = lookup_def(&content_type)?;

    if def.kind == ContentKind::Config {
        let doc = validate_update(def, &payload)?;
        let repository = ContentRepository::new(state.db.pool().await?);
        let row = repository.upsert_config(def, doc).await?;
        finish_mutation(&state, &user, "update", def, Some(row.id), &payload).await;
        return Ok(ApiResponse::success(row.to_api_value()));
    }

    let doc = validate_create(def, &payload)?;
    let repository = ContentRepository::new(state.db.pool().await?);
    let row = repository.insert(def, doc).await?;
    finish_mutation(&state, &user, "create", def, Some(row.id), &payload).await;

    Ok(ApiResponse::created(row.to_api_value()))
}

/// PUT /api/content/:content_type
pub async fn update(
    Path(content_type): Path<String>,
    State(state): State<AppState>,
    user: GateUser,
    axum::Json(payload): axum::Json<Value>,
) -> ApiResult<Value> {
    let def = lookup_def(&content_type)?;

    if def.kind == ContentKind::Config {
        let doc = validate_update(def, &payload)?;
        let repository = ContentRepository::new(state.db.pool().await?);
        let row = repository.upsert_config(def, doc).await?;
        finish_mutation(&state, &user, "update", def, Some(row.id), &payload).await;
        return Ok(ApiResponse::success(row.to_api_value()));
    }

    let id = payload
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("Missing _id in request body"))?;
    let id = Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Invalid id format"))?;

    let doc = validate_update(def, &payload)?;
    let repository = ContentRepository::new(state.db.pool().await?);
    let row = repository
        .update(def, id, doc)
        .await?
        .ok_or_else(|| not_found(def))?;

    finish_mutation(&state, &user, "update", def, Some(id), &payload).await;

    Ok(ApiResponse::success(row.to_api_value()))
}

/// DELETE /api/content/:content_type?id=...
pub async fn remove(
    Path(content_type): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
    user: GateUser,
) -> ApiResult<Value> {
    let def = lookup_def(&content_type)?;

    let id = params
        .get("id")
        .ok_or_else(|| ApiError::bad_request("Missing id parameter"))?;
    let id = Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Invalid id format"))?;

    let repository = ContentRepository::new(state.db.pool().await?);
    if !repository.delete(def, id).await? {
        return Err(not_found(def));
    }

    finish_mutation(&state, &user, "delete", def, Some(id), &Value::Null).await;

    Ok(ApiResponse::success(json!({ "deleted": true })))
}

fn lookup_def(slug: &str) -> Result<&'static ContentTypeDef, ApiError> {
    lookup(slug).ok_or_else(|| ApiError::not_found(format!("Unknown content type '{}'", slug)))
}

fn not_found(def: &ContentTypeDef) -> ApiError {
    ApiError::not_found(format!("{} record not found", def.slug))
}

/// Shared mutation epilogue: audit trail (fire-and-forget) and cache
/// revalidation for the type's public pages.
async fn finish_mutation(
    state: &AppState,
    user: &GateUser,
    action: &str,
    def: &ContentTypeDef,
    resource_id: Option<Uuid>,
    payload: &Value,
) {
    let details = payload.as_object().map(|map| {
        let fields: Vec<&String> = map.keys().collect();
        json!({ "fields": fields })
    });

    state.audit.record(AuditEntry {
        user_id: user.id,
        action: action.to_string(),
        resource: def.slug.to_string(),
        resource_id,
        details,
    });

    state.revalidator.notify_all(def.revalidate).await;
}

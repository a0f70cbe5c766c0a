use axum::extract::{Path, RawQuery, State};
use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/cms/*path - passthrough read from the headless CMS
pub async fn proxy(
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    let body = state.cms.fetch(&path, query.as_deref()).await?;
    Ok(ApiResponse::success(body))
}

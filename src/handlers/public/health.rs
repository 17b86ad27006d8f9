use axum::extract::State;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

/// GET /health - store reachability
pub async fn get(State(state): State<AppState>) -> ApiResult<Value> {
    if let Err(e) = state.store.ping().await {
        tracing::error!("Store health check failed: {}", e);
        return Err(ApiError::service_unavailable("store unavailable"));
    }

    Ok(ApiResponse::success(json!({
        "store": "ok",
        "timestamp": Utc::now(),
    })))
}

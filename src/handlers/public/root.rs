use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};

/// GET / - service identity
pub async fn get() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "app": "kolejka" })))
}

use axum::extract::State;
use serde_json::{Map, Value};

use crate::api::format::{tracking_point_to_api_value, tracking_points_to_api_values};
use crate::database::manager::DatabaseError;
use crate::database::models::NewTrackingPoint;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonPayload};
use crate::server::AppState;
use crate::validation::{bulk_tracking_schema, tracking_schema};

/// POST /v1/tracking - ingest one tracking point
pub async fn post(State(state): State<AppState>, JsonPayload(body): JsonPayload) -> ApiResult<Value> {
    let fields = tracking_schema().validate(&body)?;
    let new = NewTrackingPoint::from_validated(fields).map_err(DatabaseError::from)?;

    let point = state.tracking.create(new).await?;
    let names = state.zones.zone_names([point.zone_id.as_str()]).await?;

    let zone_name = names.get(&point.zone_id).map(String::as_str);
    Ok(ApiResponse::success(tracking_point_to_api_value(&point, zone_name)))
}

/// POST /v1/bulk_tracking - ingest `{data: [point, ...]}`
///
/// The whole batch is validated before anything is stored, so a malformed
/// element means nothing is written.
pub async fn bulk_post(State(state): State<AppState>, JsonPayload(body): JsonPayload) -> ApiResult<Value> {
    let mut fields = bulk_tracking_schema().validate(&body)?;
    let batch = batch_from_validated(fields.remove("data"))?;

    let points = state.tracking.create_many(batch).await?;
    let names = state.zones.zone_names(points.iter().map(|p| p.zone_id.as_str())).await?;

    Ok(ApiResponse::success(tracking_points_to_api_values(&points, &names)))
}

fn batch_from_validated(data: Option<Value>) -> Result<Vec<NewTrackingPoint>, ApiError> {
    let Some(Value::Array(items)) = data else {
        return Err(ApiError::bad_request("data should be a list"));
    };

    items
        .into_iter()
        .map(|item| {
            let fields: Map<String, Value> = match item {
                Value::Object(map) => map,
                _ => return Err(ApiError::bad_request("data should be a list of objects")),
            };
            NewTrackingPoint::from_validated(fields)
                .map_err(|e| ApiError::from(DatabaseError::from(e)))
        })
        .collect()
}

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::api::format::tracking_points_to_api_values;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::TrackingSubject;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub data_type: Option<String>,
}

/// GET /v1/tracking-data/:tracking_id - history, oldest first ("ALL" for every subject)
pub async fn get(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Value> {
    let subject = TrackingSubject::parse(&tracking_id);
    let data_type = query.data_type.as_deref().filter(|s| !s.is_empty());

    let points = state.tracking.list(&subject, data_type).await?;
    let names = state.zones.zone_names(points.iter().map(|p| p.zone_id.as_str())).await?;

    Ok(ApiResponse::success(tracking_points_to_api_values(&points, &names)))
}

/// DELETE /v1/tracking-data/:tracking_id - hard delete ("ALL" for every subject)
pub async fn delete(State(state): State<AppState>, Path(tracking_id): Path<String>) -> ApiResult<Value> {
    state.tracking.delete(&TrackingSubject::parse(&tracking_id)).await?;
    Ok(ApiResponse::empty())
}

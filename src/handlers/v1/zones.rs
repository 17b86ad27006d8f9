use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::api::format::{zone_to_api_value, zones_to_api_values};
use crate::database::manager::DatabaseError;
use crate::database::models::NewZone;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonPayload};
use crate::server::AppState;
use crate::validation::zone_schema;

use super::zone_id_from_path;

#[derive(Debug, Deserialize)]
pub struct ZoneListQuery {
    /// Any non-empty value includes disabled zones
    pub show_inactive: Option<String>,
}

/// GET /v1/zones
pub async fn get(State(state): State<AppState>, Query(query): Query<ZoneListQuery>) -> ApiResult<Value> {
    let show_inactive = query.show_inactive.is_some_and(|v| !v.is_empty());
    let zones = state.zones.list(show_inactive).await?;
    Ok(ApiResponse::success(zones_to_api_values(&zones)))
}

/// POST /v1/zones
pub async fn post(State(state): State<AppState>, JsonPayload(body): JsonPayload) -> ApiResult<Value> {
    let fields = zone_schema().validate(&body)?;
    let new = NewZone::from_validated(fields).map_err(DatabaseError::from)?;
    let zone = state.zones.create(new).await?;
    Ok(ApiResponse::success(zone_to_api_value(&zone)))
}

/// DELETE /v1/zones/:id - soft delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = zone_id_from_path(&id)?;
    state.zones.soft_delete(id).await?;
    Ok(ApiResponse::empty())
}

/// POST /v1/zones/:zone_id/set-pair-zone
///
/// Answers with a plain-text confirmation rather than the JSON envelope.
pub async fn set_pair_zone(
    State(state): State<AppState>,
    Path(zone_id): Path<String>,
    JsonPayload(body): JsonPayload,
) -> Result<String, ApiError> {
    let pair_zone_id = body
        .get("pair_zone_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("pair_zone_id should be non-empty string"))?;

    let zone_id = zone_id_from_path(&zone_id)?;
    let pair_zone_id = zone_id_from_path(pair_zone_id)?;

    let (zone, pair) = state.zones.pair_zones(zone_id, pair_zone_id).await?;
    Ok(format!("Pair set: {} <-> {}", zone.id, pair.id))
}

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::database::models::{TrackingPoint, Zone};

/// Wall-clock format for every timestamp in API output (UTC)
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// `tracking_timestamp` read as epoch seconds; `None` outside chrono's range
pub fn tracking_time(tracking_timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(tracking_timestamp, 0).map(|time| format_time(&time))
}

/// Convert a tracking point into its public shape. `zone_name` is resolved by
/// the caller; formatting never touches the store.
pub fn tracking_point_to_api_value(point: &TrackingPoint, zone_name: Option<&str>) -> Value {
    json!({
        "id": point.id.to_string(),
        "tracking_id": point.tracking_id,
        "zone_id": point.zone_id,
        "zone_name": zone_name,
        "data_type": point.data_type.as_str(),
        "lat": point.lat,
        "lon": point.lon,
        "tracking_timestamp": point.tracking_timestamp,
        "tracking_time": tracking_time(point.tracking_timestamp),
        "created_at": format_time(&point.created_at),
    })
}

pub fn tracking_points_to_api_values(points: &[TrackingPoint], zone_names: &HashMap<String, String>) -> Value {
    Value::Array(
        points
            .iter()
            .map(|point| tracking_point_to_api_value(point, zone_names.get(&point.zone_id).map(String::as_str)))
            .collect(),
    )
}

pub fn zone_to_api_value(zone: &Zone) -> Value {
    json!({
        "id": zone.id.to_string(),
        "name": zone.name,
        "description": zone.description,
        "zone_type": zone.zone_type.as_str(),
        "image": zone.image,
        "lat": zone.lat,
        "lon": zone.lon,
        "radius": zone.radius,
        "enabled": zone.enabled,
        "pair_zone_id": zone.pair_zone_id.map(|id| id.to_string()),
        "created_at": format_time(&zone.created_at),
    })
}

pub fn zones_to_api_values(zones: &[Zone]) -> Value {
    Value::Array(zones.iter().map(zone_to_api_value).collect())
}

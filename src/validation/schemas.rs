//! Payload schemas for the tracking and zone endpoints.

use super::rule::Rule;
use super::schema::Schema;

pub const DATA_TYPES: &[&str] = &["enter", "leave", "track"];
pub const ZONE_TYPES: &[&str] = &["control", "checkpoint"];

/// One GPS ping
pub fn tracking_schema() -> Schema {
    Schema::new()
        .field("tracking_id", Rule::NonEmptyString)
        .field("zone_id", Rule::NonEmptyString)
        .field("data_type", Rule::OneOf(DATA_TYPES))
        .field("tracking_timestamp", Rule::IntCoercible)
        .field("lat", Rule::Number)
        .field("lon", Rule::Number)
}

/// `{ "data": [<tracking payload>, ...] }`
pub fn bulk_tracking_schema() -> Schema {
    Schema::new().field("data", Rule::list_of(tracking_schema()))
}

pub fn zone_schema() -> Schema {
    Schema::new()
        .field("name", Rule::NonEmptyString)
        .optional("description", Rule::NonEmptyString)
        .field("zone_type", Rule::OneOf(ZONE_TYPES))
        .optional("image", Rule::String)
        .field("lat", Rule::Number)
        .field("lon", Rule::Number)
        .field("radius", Rule::Int)
}

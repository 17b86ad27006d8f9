use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{now, timestamp, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Enter,
    Leave,
    Track,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Enter => "enter",
            DataType::Leave => "leave",
            DataType::Track => "track",
        }
    }
}

/// Validated ingestion payload, before the server assigns identity
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrackingPoint {
    pub tracking_id: String,
    pub zone_id: String,
    pub data_type: DataType,
    pub tracking_timestamp: i64,
    pub lat: f64,
    pub lon: f64,
}

impl NewTrackingPoint {
    pub fn from_validated(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(fields))
    }
}

/// One GPS observation. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingPoint {
    pub id: Uuid,
    pub tracking_id: String,
    pub zone_id: String,
    pub data_type: DataType,
    pub lat: f64,
    pub lon: f64,
    pub tracking_timestamp: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl TrackingPoint {
    pub fn create(new: NewTrackingPoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracking_id: new.tracking_id,
            zone_id: new.zone_id,
            data_type: new.data_type,
            lat: new.lat,
            lon: new.lon,
            tracking_timestamp: new.tracking_timestamp,
            created_at: now(),
        }
    }
}

impl Entity for TrackingPoint {
    const COLLECTION: &'static str = "tracking";

    fn id(&self) -> Uuid {
        self.id
    }
}

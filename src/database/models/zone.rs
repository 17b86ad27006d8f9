use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{now, timestamp, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Control,
    Checkpoint,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Control => "control",
            ZoneType::Checkpoint => "checkpoint",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewZone {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub zone_type: ZoneType,
    #[serde(default)]
    pub image: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub radius: i64,
}

impl NewZone {
    pub fn from_validated(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(fields))
    }
}

/// A named geofence. Zones are never removed, only disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub zone_type: ZoneType,
    pub image: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub radius: i64,
    pub enabled: bool,
    pub pair_zone_id: Option<Uuid>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Zone {
    pub fn create(new: NewZone) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            zone_type: new.zone_type,
            image: new.image,
            lat: new.lat,
            lon: new.lon,
            radius: new.radius,
            enabled: true,
            pair_zone_id: None,
            created_at: now(),
        }
    }

    pub fn is_paired_with(&self, other: Uuid) -> bool {
        self.pair_zone_id == Some(other)
    }
}

impl Entity for Zone {
    const COLLECTION: &'static str = "zone";

    fn id(&self) -> Uuid {
        self.id
    }
}

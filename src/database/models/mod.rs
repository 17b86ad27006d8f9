pub mod tracking;
pub mod zone;

pub use tracking::{DataType, NewTrackingPoint, TrackingPoint};
pub use zone::{NewZone, Zone, ZoneType};

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// A record persisted as one document in a named collection
pub trait Entity {
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

/// Server-assigned creation time, truncated to what the stored form keeps
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Stored timestamps are RFC 3339 with fixed microsecond precision, so that
/// string order in the store matches chronological order.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

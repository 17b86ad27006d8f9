pub mod tracking;
pub mod tracking_data;
pub mod zones;

use uuid::Uuid;

use crate::error::ApiError;

pub use tracking::bulk_post as bulk_tracking_post;
pub use tracking::post as tracking_post;

pub use tracking_data::delete as tracking_data_delete;
pub use tracking_data::get as tracking_data_get;

pub use zones::delete as zone_delete;
pub use zones::get as zones_get;
pub use zones::post as zones_post;
pub use zones::set_pair_zone as zone_set_pair_zone;

/// Zone ids that are not UUIDs cannot exist, so they are reported as unknown
pub(crate) fn zone_id_from_path(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found(format!("zone {} not found", id)))
}

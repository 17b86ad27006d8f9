pub mod tracking_service;
pub mod zone_service;

pub use tracking_service::{TrackingService, TrackingSubject};
pub use zone_service::ZoneService;

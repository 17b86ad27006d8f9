//! Declarative payload validation.
//!
//! A [`Schema`] maps field names to [`Rule`]s; validating a document either
//! yields the normalized field map or exactly one [`ValidationError`].

pub mod error;
pub mod rule;
pub mod schema;
pub mod schemas;

pub use error::ValidationError;
pub use rule::Rule;
pub use schema::Schema;
pub use schemas::{bulk_tracking_schema, tracking_schema, zone_schema, DATA_TYPES, ZONE_TYPES};

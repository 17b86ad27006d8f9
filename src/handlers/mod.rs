// handlers/mod.rs - Request handlers grouped by route prefix
//
// public: service metadata and health, no prefix
// v1:     tracking ingestion, zones and tracking history under /v1/*
pub mod public;
pub mod v1;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::database::store::DocumentStore;
use crate::handlers::{public, v1};
use crate::services::{TrackingService, ZoneService};

/// Shared per-process handles. Cloned into every request; holds no request state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tracking: TrackingService,
    pub zones: ZoneService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            tracking: TrackingService::new(Arc::clone(&store)),
            zones: ZoneService::new(Arc::clone(&store)),
            store,
        }
    }
}

pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root_get))
        .route("/health", get(public::health_get))
        .merge(v1_routes())
        .with_state(state);

    if api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn v1_routes() -> Router<AppState> {
    Router::new()
        // Ingestion
        .route("/v1/tracking", post(v1::tracking_post))
        .route("/v1/bulk_tracking", post(v1::bulk_tracking_post))
        // Zones
        .route("/v1/zones", get(v1::zones_get).post(v1::zones_post))
        .route("/v1/zones/:id", axum::routing::delete(v1::zone_delete))
        .route("/v1/zones/:id/set-pair-zone", post(v1::zone_set_pair_zone))
        // Tracking history
        .route(
            "/v1/tracking-data/:tracking_id",
            get(v1::tracking_data_get).delete(v1::tracking_data_delete),
        )
}

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::AppState;
use crate::handlers::{self, geo, tracking};

pub fn create_router(state: AppState) -> Router {
    // Stateless geo helpers
    let geo_routes = Router::new().route("/distance", get(geo::distance));

    // Driver tracking policy; the caller owns the snapshot and the polling cadence
    let tracking_routes = Router::new()
        .route("/gps-status", post(tracking::gps_status))
        .route("/arrival", post(tracking::check_arrival))
        .route("/simulate", post(tracking::simulate))
        .route("/drivers/{driver_id}/tick", post(tracking::tick))
        .route(
            "/drivers/{driver_id}/notifications",
            delete(tracking::reset_notifications),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/geo", geo_routes)
        .nest("/api/tracking", tracking_routes)
        .with_state(state)
}

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::entities::DriverSnapshot;
use crate::error::{AppError, AppResult};
use crate::tracking::{
    Arrival, SimulationParams, detect_arrival, handle_gps_status_change,
    simulate_location_update_with,
};

#[derive(Debug, Deserialize)]
pub struct GpsStatusRequest {
    pub snapshot: DriverSnapshot,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsStatusResponse {
    pub gps_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub snapshot: DriverSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ArrivalResponse {
    pub arrival: Option<Arrival>,
}

#[derive(Debug, Serialize)]
pub struct TickResponse {
    pub snapshot: DriverSnapshot,
    pub notification: Option<Arrival>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub cleared: bool,
}

/// Evaluate a duty status change
pub async fn gps_status(Json(payload): Json<GpsStatusRequest>) -> AppResult<Json<GpsStatusResponse>> {
    let gps_enabled = handle_gps_status_change(&payload.snapshot, &payload.status);
    Ok(Json(GpsStatusResponse { gps_enabled }))
}

/// Check whether the driver is inside a pickup or dropoff geofence
pub async fn check_arrival(
    State(state): State<AppState>,
    Json(payload): Json<SnapshotRequest>,
) -> AppResult<Json<ArrivalResponse>> {
    validate_snapshot(&payload.snapshot)?;

    let arrival = detect_arrival(&payload.snapshot, state.config.geofence_radius_km);
    Ok(Json(ArrivalResponse { arrival }))
}

/// Advance the simulated driver position (demo deployments only)
pub async fn simulate(
    State(state): State<AppState>,
    Json(payload): Json<SnapshotRequest>,
) -> AppResult<Json<DriverSnapshot>> {
    require_simulation(&state)?;
    validate_snapshot(&payload.snapshot)?;

    Ok(Json(simulate_snapshot(&state, &payload.snapshot)))
}

/// One polling tick for a driver: simulate when enabled, then report each
/// geofence entry once.
pub async fn tick(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
    Json(payload): Json<SnapshotRequest>,
) -> AppResult<Json<TickResponse>> {
    validate_snapshot(&payload.snapshot)?;

    let snapshot = if state.config.simulation_enabled {
        simulate_snapshot(&state, &payload.snapshot)
    } else {
        payload.snapshot
    };

    let arrival = detect_arrival(&snapshot, state.config.geofence_radius_km);
    let notification = state.notifier.observe(driver_id, arrival.as_ref())?;

    Ok(Json(TickResponse {
        snapshot,
        notification,
    }))
}

/// Forget which arrivals were already announced for a driver
pub async fn reset_notifications(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
) -> AppResult<Json<ResetResponse>> {
    let cleared = state.notifier.reset(driver_id)?;
    tracing::debug!(driver_id = %driver_id, cleared, "Arrival notifications reset");
    Ok(Json(ResetResponse { cleared }))
}

fn simulate_snapshot(state: &AppState, snapshot: &DriverSnapshot) -> DriverSnapshot {
    let params = SimulationParams {
        arrival_threshold: state.config.simulation_arrival_threshold,
        jitter_km: state.config.simulation_jitter_km,
    };
    let mut rng = rand::thread_rng();
    simulate_location_update_with(snapshot, params, &mut rng, Utc::now())
}

fn require_simulation(state: &AppState) -> AppResult<()> {
    if !state.config.simulation_enabled {
        return Err(AppError::Forbidden(
            "Location simulation is disabled".to_string(),
        ));
    }
    Ok(())
}

fn validate_snapshot(snapshot: &DriverSnapshot) -> AppResult<()> {
    let points = [
        ("currentLocation", snapshot.current_location.as_ref().map(|l| l.coordinate)),
        ("currentPickupLocation", snapshot.current_pickup_location.as_ref().map(|d| d.coordinate)),
        ("currentDropoffLocation", snapshot.current_dropoff_location.as_ref().map(|d| d.coordinate)),
    ];

    let invalid = points
        .into_iter()
        .find(|(_, coordinate)| coordinate.is_some_and(|c| !c.is_valid()));

    if let Some((field, _)) = invalid {
        return Err(AppError::BadRequest(format!(
            "{} has invalid coordinates",
            field
        )));
    }

    Ok(())
}

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::{DriverSnapshot, NamedDestination, TimestampedCoordinate};
use crate::utils::geo::{NEARBY_DISTANCE_KM, generate_nearby_location};

/// A uniform draw above this value moves the simulated driver onto the dropoff (~30% per call).
pub const RANDOM_ARRIVAL_THRESHOLD: f64 = 0.7;

/// Jitter applied around the dropoff when a simulated arrival fires (~0.5 m).
pub const SIMULATION_JITTER_KM: f64 = 0.0005;

pub const OFF_DUTY: &str = "Off Duty";
pub const ON_DUTY: &str = "On Duty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalLeg {
    Pickup,
    Dropoff,
}

/// Geofence entry detected for one leg of the current job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrival {
    pub leg: ArrivalLeg,
    pub location_name: String,
    pub distance_km: f64,
    pub message: String,
}

impl Arrival {
    fn new(leg: ArrivalLeg, destination: &NamedDestination, distance_km: f64) -> Self {
        let message = match leg {
            ArrivalLeg::Pickup => format!(
                "You have arrived at pickup location: {}. Please scan the VINs to verify the vehicles.",
                destination.location_name
            ),
            ArrivalLeg::Dropoff => format!(
                "You have arrived at drop-off location: {}. Please confirm the vehicle drop-off.",
                destination.location_name
            ),
        };

        Self {
            leg,
            location_name: destination.location_name.clone(),
            distance_km,
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub arrival_threshold: f64,
    pub jitter_km: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            arrival_threshold: RANDOM_ARRIVAL_THRESHOLD,
            jitter_km: SIMULATION_JITTER_KM,
        }
    }
}

/// Decide whether GPS should be running after a duty status change.
///
/// Only "Off Duty" turns tracking off. Starting or stopping the device
/// location source is left to the caller.
pub fn handle_gps_status_change(snapshot: &DriverSnapshot, new_status: &str) -> bool {
    let enabled = new_status != OFF_DUTY;

    if !enabled {
        tracing::info!(role = ?snapshot.role, status = new_status, "GPS tracking disabled");
    } else if new_status == ON_DUTY && snapshot.active_loads > 0 {
        tracing::info!(
            role = ?snapshot.role,
            active_loads = snapshot.active_loads,
            "GPS tracking enabled - driver has {} active loads",
            snapshot.active_loads
        );
    }

    enabled
}

/// Single-shot geofence check against the current job legs.
///
/// The pickup leg is checked first; when both geofences overlap the dropoff
/// arrival is not reported until the driver leaves the pickup geofence.
pub fn detect_arrival(snapshot: &DriverSnapshot, geofence_radius_km: f64) -> Option<Arrival> {
    if !snapshot.is_tracking() {
        return None;
    }

    let current = &snapshot.current_location.as_ref()?.coordinate;

    let legs = [
        (ArrivalLeg::Pickup, snapshot.current_pickup_location.as_ref()),
        (ArrivalLeg::Dropoff, snapshot.current_dropoff_location.as_ref()),
    ];

    legs.into_iter().find_map(|(leg, destination)| {
        let destination = destination?;
        let distance_km = current.distance_to(&destination.coordinate);
        (distance_km <= geofence_radius_km).then(|| Arrival::new(leg, destination, distance_km))
    })
}

/// Arrival message for the default geofence radius, if any.
pub fn check_location_arrival(snapshot: &DriverSnapshot) -> Option<String> {
    detect_arrival(snapshot, NEARBY_DISTANCE_KM).map(|arrival| arrival.message)
}

/// Demo-only movement: occasionally jump the driver onto the dropoff.
pub fn simulate_location_update<R: Rng + ?Sized>(
    snapshot: &DriverSnapshot,
    rng: &mut R,
) -> DriverSnapshot {
    simulate_location_update_with(snapshot, SimulationParams::default(), rng, Utc::now())
}

/// [`simulate_location_update`] with explicit parameters and clock reading.
///
/// The random draw happens only once the snapshot qualifies, so a skipped
/// snapshot never consumes randomness.
pub fn simulate_location_update_with<R: Rng + ?Sized>(
    snapshot: &DriverSnapshot,
    params: SimulationParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> DriverSnapshot {
    let mut updated = snapshot.clone();

    if !snapshot.is_tracking() {
        return updated;
    }
    let Some(dropoff) = snapshot.current_dropoff_location.as_ref() else {
        return updated;
    };

    let draw: f64 = rng.r#gen();
    if draw <= params.arrival_threshold {
        return updated;
    }

    let coordinate = generate_nearby_location(
        dropoff.coordinate.lat,
        dropoff.coordinate.lng,
        params.jitter_km,
        rng,
    );
    tracing::debug!(
        location = %dropoff.location_name,
        lat = coordinate.lat,
        lng = coordinate.lng,
        "Simulated arrival at dropoff"
    );
    updated.current_location = Some(TimestampedCoordinate::new(coordinate, now));

    updated
}

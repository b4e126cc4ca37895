use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::geo::{calculate_distance, is_nearby};

/// A point in decimal degrees. Ranges are not validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        calculate_distance(self.lat, self.lng, other.lat, other.lng)
    }

    pub fn is_within(&self, other: &Coordinate, radius_km: f64) -> bool {
        is_nearby(self.lat, self.lng, other.lat, other.lng, radius_km)
    }

    /// True when both components are finite and inside the latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Most recently known position of a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedCoordinate {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub last_updated: DateTime<Utc>,
}

impl TimestampedCoordinate {
    pub fn new(coordinate: Coordinate, last_updated: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            last_updated,
        }
    }
}

/// Pickup or dropoff target for one leg of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedDestination {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub location_name: String,
    /// Display value supplied by the job backend, passed through untouched.
    #[serde(default)]
    pub expected_arrival: String,
    #[serde(default)]
    pub vehicle_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_destination_wire_shape() {
        let destination: NamedDestination = serde_json::from_value(json!({
            "lat": 40.7128,
            "lng": -74.0060,
            "locationName": "Manheim NY Metro Skyline",
            "expectedArrival": "2026-10-19T14:30:00Z",
            "vehicleCount": 3
        }))
        .unwrap();

        assert_eq!(destination.coordinate, Coordinate::new(40.7128, -74.0060));
        assert_eq!(destination.location_name, "Manheim NY Metro Skyline");
        assert_eq!(destination.vehicle_count, 3);

        let value = serde_json::to_value(&destination).unwrap();
        assert_eq!(value["lat"], json!(40.7128));
        assert_eq!(value["locationName"], json!("Manheim NY Metro Skyline"));
    }

    #[test]
    fn test_timestamped_coordinate_parses_iso_timestamp() {
        let location: TimestampedCoordinate = serde_json::from_value(json!({
            "lat": 1.5,
            "lng": 2.5,
            "lastUpdated": "2026-10-19T08:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(location.coordinate, Coordinate::new(1.5, 2.5));
        assert_eq!(location.last_updated.to_rfc3339(), "2026-10-19T08:00:00+00:00");
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_distance_helpers_match_free_functions() {
        let a = Coordinate::new(40.7128, -74.0060);
        let b = Coordinate::new(51.5074, -0.1278);
        assert_eq!(a.distance_to(&b), calculate_distance(a.lat, a.lng, b.lat, b.lng));
        assert!(a.is_within(&a, 0.0));
        assert!(!a.is_within(&b, 100.0));
    }
}

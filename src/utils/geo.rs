use rand::Rng;

use crate::entities::location::Coordinate;

/// Mean radius of the earth used by the spherical distance model.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default geofence radius for "arrived at stop" (100 meters).
pub const NEARBY_DISTANCE_KM: f64 = 0.1;

/// Default half-width of the jitter box used by [`generate_nearby_location`].
pub const DEFAULT_JITTER_RADIUS_KM: f64 = 0.001;

pub fn deg2rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lat = deg2rad(lat2 - lat1);
    let delta_lon = deg2rad(lon2 - lon1);

    let a = (delta_lat / 2.0).sin().powi(2)
        + deg2rad(lat1).cos() * deg2rad(lat2).cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check whether two coordinates are within `max_distance_km` of each other.
/// The boundary itself counts as nearby.
pub fn is_nearby(lat1: f64, lon1: f64, lat2: f64, lon2: f64, max_distance_km: f64) -> bool {
    calculate_distance(lat1, lon1, lat2, lon2) <= max_distance_km
}

/// [`is_nearby`] with the default geofence radius.
pub fn is_nearby_default(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> bool {
    is_nearby(lat1, lon1, lat2, lon2, NEARBY_DISTANCE_KM)
}

/// Offset a base coordinate by an independent uniform draw in
/// `[-radius_km, radius_km]` on each axis.
///
/// The offset is applied directly to the degree values, so the jitter area is
/// a square in degree space rather than a geodesic circle. Good enough for demo
/// movement, not for anything measured.
///
/// Never panics: the unit draw is scaled by the radius afterwards, so huge or
/// non-finite radii only produce huge or non-finite offsets.
pub fn generate_nearby_location<R: Rng + ?Sized>(
    base_lat: f64,
    base_lng: f64,
    radius_km: f64,
    rng: &mut R,
) -> Coordinate {
    let radius = radius_km.abs();

    Coordinate::new(
        base_lat + unit_offset(rng) * radius,
        base_lng + unit_offset(rng) * radius,
    )
}

/// Uniform draw in `[-1, 1)`.
fn unit_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>() * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    const NEW_YORK: (f64, f64) = (40.7128, -74.0060);
    const LONDON: (f64, f64) = (51.5074, -0.1278);

    #[test]
    fn test_deg2rad() {
        assert_eq!(deg2rad(0.0), 0.0);
        assert!((deg2rad(180.0) - PI).abs() < 1e-12);
        assert!((deg2rad(360.0) - 2.0 * PI).abs() < 1e-12);
        assert!((deg2rad(-90.0) + PI / 2.0).abs() < 1e-12);
        assert!((deg2rad(720.0) - 4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_distance_new_york_london() {
        let distance = calculate_distance(NEW_YORK.0, NEW_YORK.1, LONDON.0, LONDON.1);
        // Within 5% of 5570 km
        assert!((distance - 5570.0).abs() <= 5570.0 * 0.05, "got {}", distance);
    }

    #[test]
    fn test_haversine_jakarta_bandung() {
        let jakarta = (-6.2088, 106.8456);
        let bandung = (-6.9175, 107.6191);

        let distance = calculate_distance(jakarta.0, jakarta.1, bandung.0, bandung.1);
        assert!(distance > 100.0 && distance < 150.0);
    }

    #[test]
    fn test_identity_is_zero() {
        for (lat, lng) in [NEW_YORK, LONDON, (0.0, 0.0), (-89.9, 179.9), (90.0, -180.0)] {
            assert_eq!(calculate_distance(lat, lng, lat, lng), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let points = [NEW_YORK, LONDON, (-33.8688, 151.2093), (35.6762, 139.6503)];
        for a in points {
            for b in points {
                let ab = calculate_distance(a.0, a.1, b.0, b.1);
                let ba = calculate_distance(b.0, b.1, a.0, a.1);
                assert!((ab - ba).abs() < 1e-9);
                assert!(ab >= 0.0);
            }
        }
    }

    #[test]
    fn test_antipodal_distance_is_half_circumference() {
        let distance = calculate_distance(0.0, 0.0, 0.0, 180.0);
        assert!((distance - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(calculate_distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_is_nearby_default_radius() {
        let stop = (40.7580, -73.9855);
        // ~55 m north
        assert!(is_nearby_default(stop.0 + 0.0005, stop.1, stop.0, stop.1));
        // ~222 m north
        assert!(!is_nearby_default(stop.0 + 0.002, stop.1, stop.0, stop.1));
    }

    #[test]
    fn test_is_nearby_boundary_inclusive() {
        let distance = calculate_distance(NEW_YORK.0, NEW_YORK.1, LONDON.0, LONDON.1);
        assert!(is_nearby(NEW_YORK.0, NEW_YORK.1, LONDON.0, LONDON.1, distance));
        assert!(is_nearby(1.0, 1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_is_nearby_monotonic_in_radius() {
        let a = (-6.2088, 106.8456);
        let b = (-6.21, 106.85);
        let radii = [0.0, 0.05, 0.1, 0.5, 1.0, 10.0, 100.0];
        for pair in radii.windows(2) {
            if is_nearby(a.0, a.1, b.0, b.1, pair[0]) {
                assert!(is_nearby(a.0, a.1, b.0, b.1, pair[1]));
            }
        }
        assert!(is_nearby(a.0, a.1, b.0, b.1, 10.0));
    }

    #[test]
    fn test_jitter_stays_in_box() {
        let mut rng = StdRng::seed_from_u64(7);
        for radius in [DEFAULT_JITTER_RADIUS_KM, 0.0005, 0.5] {
            for _ in 0..1_000 {
                let point = generate_nearby_location(NEW_YORK.0, NEW_YORK.1, radius, &mut rng);
                assert!((point.lat - NEW_YORK.0).abs() <= radius);
                assert!((point.lng - NEW_YORK.1).abs() <= radius);
            }
        }
    }

    #[test]
    fn test_jitter_varies_between_calls() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = generate_nearby_location(0.0, 0.0, DEFAULT_JITTER_RADIUS_KM, &mut rng);
        let second = generate_nearby_location(0.0, 0.0, DEFAULT_JITTER_RADIUS_KM, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_jitter_with_huge_radius_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        for radius in [1e308, f64::MAX] {
            let point = generate_nearby_location(0.0, 0.0, radius, &mut rng);
            assert!(point.lat.is_finite() && point.lng.is_finite());
            assert!(point.lat.abs() <= radius);
            assert!(point.lng.abs() <= radius);
        }
    }

    #[test]
    fn test_jitter_with_non_finite_radius_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let point = generate_nearby_location(0.0, 0.0, f64::INFINITY, &mut rng);
        assert!(!point.lat.is_finite() || point.lat == 0.0);

        let point = generate_nearby_location(0.0, 0.0, f64::NAN, &mut rng);
        assert!(point.lat.is_nan());
    }

    #[test]
    fn test_zero_radius_returns_base() {
        let mut rng = StdRng::seed_from_u64(1);
        let point = generate_nearby_location(12.5, -3.25, 0.0, &mut rng);
        assert_eq!(point, Coordinate::new(12.5, -3.25));
    }
}

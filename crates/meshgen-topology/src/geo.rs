//! Great-circle distance between cache group locations.

use meshgen_core::Location;

/// Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Haversine distance between two locations, in meters.
///
/// Callers only ever compare distances with each other, so the unit
/// does not leak into any output.
pub fn distance_meters(a: Location, b: Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let h = hav(lat2 - lat1) + lat1.cos() * lat2.cos() * hav(lon2 - lon1);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

fn hav(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(latitude: f64, longitude: f64) -> Location {
        Location { latitude, longitude }
    }

    #[test]
    fn same_point_is_zero() {
        let denver = loc(39.7392, -104.9903);
        assert_eq!(distance_meters(denver, denver), 0.0);
    }

    #[test]
    fn nyc_to_london() {
        // ~5,576 km with a 6,378.1 km radius.
        let km = distance_meters(loc(40.7128, -74.0060), loc(51.5074, -0.1278)) / 1000.0;
        assert!((km - 5576.0).abs() < 50.0, "got {km} km");
    }

    #[test]
    fn symmetric() {
        let a = loc(35.6762, 139.6503);
        let b = loc(-33.8688, 151.2093);
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = distance_meters(loc(0.0, 0.0), loc(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half).abs() < 1.0);
    }
}

//! Great-circle geometry on a spherical Earth model.

use serde::{Deserialize, Serialize};

/// Earth's mean radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per statute mile.
const KM_PER_MILE: f64 = 1.609344;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are inside the valid geographic range
    /// (lat -90..90, lon -180..180).
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Distance unit for [`distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Miles,
    Kilometers,
}

/// Great-circle (haversine) distance between two coordinates.
///
/// Returns the raw floating-point distance; rounding is the caller's job.
/// Out-of-range coordinates are not rejected — the result is mathematically
/// defined but meaningless, and callers are expected to validate upstream.
pub fn distance(a: Coordinate, b: Coordinate, unit: Unit) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    let km = EARTH_RADIUS_KM * c;

    match unit {
        Unit::Kilometers => km,
        Unit::Miles => km / KM_PER_MILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinate::new(10.0, 20.0);
        assert_eq!(distance(p, p, Unit::Miles), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(59.3293, 18.0686);
        let b = Coordinate::new(-33.8688, 151.2093);
        assert_relative_eq!(
            distance(a, b, Unit::Miles),
            distance(b, a, Unit::Miles),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_non_negative() {
        let pairs = [
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)),
            (Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0)),
            (Coordinate::new(51.5, -0.13), Coordinate::new(40.71, -74.01)),
            (Coordinate::new(-45.0, 170.0), Coordinate::new(45.0, -170.0)),
        ];
        for (a, b) in pairs {
            assert!(distance(a, b, Unit::Miles) >= 0.0);
        }
    }

    #[test]
    fn test_quarter_circumference_km() {
        // Equator to pole along a meridian: one quarter of a great circle.
        let equator = Coordinate::new(0.0, 0.0);
        let pole = Coordinate::new(90.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 2.0;
        assert_relative_eq!(
            distance(equator, pole, Unit::Kilometers),
            expected,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_new_york_to_london_miles() {
        let nyc = Coordinate::new(40.7128, -74.0060);
        let london = Coordinate::new(51.5074, -0.1278);
        let d = distance(nyc, london, Unit::Miles);
        assert_relative_eq!(d, 3461.0, max_relative = 0.01);
    }

    #[test]
    fn test_miles_shorter_than_kilometers() {
        let a = Coordinate::new(52.52, 13.405);
        let b = Coordinate::new(48.8566, 2.3522);
        let km = distance(a, b, Unit::Kilometers);
        let mi = distance(a, b, Unit::Miles);
        assert_relative_eq!(mi * KM_PER_MILE, km, max_relative = 1e-9);
    }

    #[test]
    fn test_in_range() {
        assert!(Coordinate::new(90.0, -180.0).in_range());
        assert!(Coordinate::new(-90.0, 180.0).in_range());
        assert!(!Coordinate::new(90.1, 0.0).in_range());
        assert!(!Coordinate::new(0.0, -180.5).in_range());
    }
}

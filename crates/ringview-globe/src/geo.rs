//! Geographic coordinates on the idealized planet sphere.
//!
//! The planet's unrotated frame uses +Y as the polar axis. Latitude is measured
//! from the equator, longitude is `atan2(z, x)`.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Points closer to the origin than this carry no usable direction.
const MIN_DIRECTION_LENGTH: f64 = 1e-12;

/// A location on the sphere expressed as latitude and longitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees. Range: \[-90, 90\]. Positive = north.
    pub latitude: f64,
    /// Longitude in degrees. Range: (-180, 180\].
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate with latitude clamped to \[-90, 90\] and longitude
    /// wrapped into (-180, 180\].
    pub fn normalized(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude.clamp(-90.0, 90.0), wrap_longitude(longitude))
    }

    /// Unit vector for this coordinate in the unrotated planet frame.
    ///
    /// Polar angle `phi = 90 - latitude`, azimuth `theta = longitude`.
    pub fn to_unit_vector(&self) -> DVec3 {
        let phi = (90.0 - self.latitude).to_radians();
        let theta = self.longitude.to_radians();
        DVec3::new(
            phi.sin() * theta.cos(),
            phi.cos(),
            phi.sin() * theta.sin(),
        )
    }

    /// Recover the coordinate from a point in the unrotated planet frame.
    ///
    /// Only the direction of `point` matters. Returns `None` for the origin.
    pub fn from_direction(point: DVec3) -> Option<Self> {
        let r = point.length();
        if !r.is_finite() || r < MIN_DIRECTION_LENGTH {
            return None;
        }

        // Clamp guards acos against floating-point overshoot past +-1.
        let polar = (point.y / r).clamp(-1.0, 1.0).acos();
        let latitude = 90.0 - polar.to_degrees();

        let mut longitude = point.z.atan2(point.x).to_degrees();
        if longitude <= -180.0 {
            longitude += 360.0;
        }

        Some(Self::new(latitude, longitude))
    }

    /// Great-circle angle to another coordinate in degrees (haversine).
    pub fn angular_distance_to(&self, other: &GeoCoordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        (2.0 * a.sqrt().min(1.0).asin()).to_degrees()
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.2}\u{00B0}{}, {:.2}\u{00B0}{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir,
        )
    }
}

/// Wrap a longitude in degrees into (-180, 180\].
pub fn wrap_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// Absolute longitude separation in degrees, taking the short way around.
pub fn longitude_difference(a: f64, b: f64) -> f64 {
    wrap_longitude(a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON_DEG: f64 = 1e-9;

    #[test]
    fn test_equator_prime_meridian_is_positive_x() {
        let v = GeoCoordinate::new(0.0, 0.0).to_unit_vector();
        assert!((v - DVec3::X).length() < 1e-12, "got {v:?}");
    }

    #[test]
    fn test_north_pole_is_positive_y() {
        let v = GeoCoordinate::new(90.0, 37.0).to_unit_vector();
        assert!((v - DVec3::Y).length() < 1e-12, "got {v:?}");
    }

    #[test]
    fn test_longitude_90_is_positive_z() {
        let v = GeoCoordinate::new(0.0, 90.0).to_unit_vector();
        assert!((v - DVec3::Z).length() < 1e-12, "got {v:?}");
    }

    #[test]
    fn test_from_direction_ignores_length() {
        let geo = GeoCoordinate::from_direction(DVec3::new(0.0, 5.0, 5.0)).unwrap();
        assert!((geo.latitude - 45.0).abs() < EPSILON_DEG);
        assert!((geo.longitude - 90.0).abs() < EPSILON_DEG);
    }

    #[test]
    fn test_from_direction_rejects_origin() {
        assert_eq!(GeoCoordinate::from_direction(DVec3::ZERO), None);
    }

    #[test]
    fn test_from_direction_clamps_overshoot() {
        // y slightly larger than the length through rounding must not yield NaN.
        let geo = GeoCoordinate::from_direction(DVec3::new(1e-17, 1.0, 0.0)).unwrap();
        assert!(geo.latitude.is_finite());
        assert!((geo.latitude - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_x_axis_is_longitude_180() {
        let geo = GeoCoordinate::from_direction(DVec3::new(-1.0, 0.0, -0.0)).unwrap();
        assert!((geo.longitude - 180.0).abs() < EPSILON_DEG, "got {}", geo.longitude);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-180.0), 180.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-540.0), 180.0);
        assert!((wrap_longitude(725.5) - 5.5).abs() < EPSILON_DEG);
    }

    #[test]
    fn test_longitude_difference_crosses_antimeridian() {
        assert!((longitude_difference(179.5, -179.5) - 1.0).abs() < EPSILON_DEG);
        assert!((longitude_difference(-10.0, 10.0) - 20.0).abs() < EPSILON_DEG);
    }

    #[test]
    fn test_normalized_clamps_latitude() {
        let geo = GeoCoordinate::normalized(95.0, 200.0);
        assert_eq!(geo.latitude, 90.0);
        assert_eq!(geo.longitude, -160.0);
    }

    #[test]
    fn test_angular_distance() {
        let a = GeoCoordinate::new(0.0, 0.0);
        let b = GeoCoordinate::new(0.0, 90.0);
        assert!((a.angular_distance_to(&b) - 90.0).abs() < 1e-9);
        assert!(a.angular_distance_to(&a).abs() < 1e-9);
    }

    #[test]
    fn test_display_format() {
        let coord = GeoCoordinate::new(35.6833, -139.7667);
        assert_eq!(format!("{coord}"), "35.68\u{00B0}N, 139.77\u{00B0}W");

        let south_east = GeoCoordinate::new(-23.4, 45.7);
        assert_eq!(format!("{south_east}"), "23.40\u{00B0}S, 45.70\u{00B0}E");
    }
}

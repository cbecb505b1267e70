//! Planet body rotation: texture alignment, axial tilt, and time of day.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Hours in one diurnal cycle.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Orientation of the planet body.
///
/// The body rotation applies the texture-alignment rotation about the polar
/// axis (+Y) first, then the axial tilt about the equatorial forward axis
/// (+Z). The rendered planet mesh must be rotated the same way or the marker
/// drifts off its surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetOrientation {
    /// Axial tilt in degrees.
    pub axial_tilt_degrees: f64,
    /// Static texture-alignment rotation in radians.
    pub texture_rotation_radians: f64,
    /// Local time of day in hours, `[0, 24)`.
    pub time_of_day_hours: f64,
}

impl Default for PlanetOrientation {
    fn default() -> Self {
        Self {
            axial_tilt_degrees: 23.5,
            texture_rotation_radians: std::f64::consts::PI,
            time_of_day_hours: 12.0,
        }
    }
}

impl PlanetOrientation {
    /// Diurnal rotation angle in radians: `2 pi * time_of_day / 24`.
    pub fn hour_angle(&self) -> f64 {
        TAU * self.time_of_day_hours / HOURS_PER_DAY
    }

    /// Composed body rotation `Rz(tilt) * Ry(texture)`.
    pub fn body_rotation(&self) -> DQuat {
        self.tilt_rotation() * self.texture_rotation()
    }

    /// Rotate a point from the unrotated planet frame into world space.
    pub fn to_body(&self, point: DVec3) -> DVec3 {
        self.body_rotation() * point
    }

    /// Undo the body rotation: inverse tilt first, then inverse texture rotation.
    pub fn from_body(&self, point: DVec3) -> DVec3 {
        let untilted = self.tilt_rotation().inverse() * point;
        self.texture_rotation().inverse() * untilted
    }

    /// The rotated polar axis; also the normal of the equatorial (ring) plane.
    pub fn polar_axis(&self) -> DVec3 {
        self.body_rotation() * DVec3::Y
    }

    fn texture_rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.texture_rotation_radians)
    }

    fn tilt_rotation(&self) -> DQuat {
        DQuat::from_rotation_z(self.axial_tilt_degrees.to_radians())
    }
}

/// Wrap a time of day in hours into `[0, 24)`.
pub fn wrap_time_of_day(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round tiny negative inputs up to exactly 24.
    if wrapped >= HOURS_PER_DAY { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_identity_orientation_leaves_points_unchanged() {
        let orientation = PlanetOrientation {
            axial_tilt_degrees: 0.0,
            texture_rotation_radians: 0.0,
            time_of_day_hours: 0.0,
        };
        let p = DVec3::new(0.3, -0.4, 0.5);
        assert!((orientation.to_body(p) - p).length() < EPSILON);
    }

    #[test]
    fn test_texture_rotation_applies_before_tilt() {
        let orientation = PlanetOrientation {
            axial_tilt_degrees: 90.0,
            texture_rotation_radians: PI / 2.0,
            time_of_day_hours: 0.0,
        };
        // Ry(90) takes +X to -Z, and Rz(90) leaves -Z alone.
        let rotated = orientation.to_body(DVec3::X);
        assert!((rotated - DVec3::NEG_Z).length() < EPSILON, "got {rotated:?}");
        // +Y is untouched by Ry and sent to -X by Rz(90).
        let pole = orientation.to_body(DVec3::Y);
        assert!((pole - DVec3::NEG_X).length() < EPSILON, "got {pole:?}");
    }

    #[test]
    fn test_from_body_inverts_to_body() {
        let orientation = PlanetOrientation {
            axial_tilt_degrees: -41.0,
            texture_rotation_radians: 2.2,
            time_of_day_hours: 7.0,
        };
        let p = DVec3::new(-0.2, 0.9, 0.1);
        let back = orientation.from_body(orientation.to_body(p));
        assert!((back - p).length() < EPSILON, "got {back:?}");
    }

    #[test]
    fn test_polar_axis_follows_tilt() {
        let orientation = PlanetOrientation::default();
        let axis = orientation.polar_axis();
        let tilt = 23.5_f64.to_radians();
        assert!((axis - DVec3::new(-tilt.sin(), tilt.cos(), 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_hour_angle() {
        let mut orientation = PlanetOrientation::default();
        assert!((orientation.hour_angle() - PI).abs() < EPSILON);
        orientation.time_of_day_hours = 6.0;
        assert!((orientation.hour_angle() - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_time_of_day() {
        assert_eq!(wrap_time_of_day(24.0), 0.0);
        assert_eq!(wrap_time_of_day(25.5), 1.5);
        assert_eq!(wrap_time_of_day(-1.0), 23.0);
        assert_eq!(wrap_time_of_day(-1e-18), 0.0);
    }
}

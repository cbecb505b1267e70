//! Surface-view camera: what an observer standing at the marker would see.
//!
//! The camera's up vector is always the outward surface normal, so the horizon
//! stays level wherever the marker is placed. The view direction is built in
//! the tangent plane from the hour angle plus the user's heading offset, then
//! blended towards the normal by the user tilt.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::geo::GeoCoordinate;
use crate::marker::surface_normal;
use crate::orientation::PlanetOrientation;

/// Lowest accepted user tilt in degrees (near the horizon).
pub const MIN_USER_TILT_DEGREES: f64 = 10.0;
/// Highest accepted user tilt in degrees (near the opposite horizon).
pub const MAX_USER_TILT_DEGREES: f64 = 170.0;
/// Narrowest surface-view field of view in degrees.
pub const MIN_FIELD_OF_VIEW_DEGREES: f64 = 20.0;
/// Widest surface-view field of view in degrees.
pub const MAX_FIELD_OF_VIEW_DEGREES: f64 = 120.0;

/// Above this `|normal . world_up|` (within ~25 degrees of a pole) the tangent
/// basis is built from +Z instead of world up.
pub const POLE_ALIGNMENT_THRESHOLD: f64 = 0.9;

/// Residual normal component tolerated in the tangent view direction before
/// it is projected back into the tangent plane.
pub const ORTHOGONALITY_EPSILON: f64 = 1e-3;

/// Distance to the look target, in planet radii.
pub const LOOK_DISTANCE_RADII: f64 = 10.0;

/// User-controlled surface-view parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceViewState {
    /// Height above the surface in scene units. Negative places the camera
    /// below the literal surface.
    pub height_above_surface: f64,
    /// Vertical field of view in degrees, `[20, 120]`.
    pub field_of_view_degrees: f64,
    /// Heading offset in radians, added to the hour angle.
    pub user_rotation: f64,
    /// Look elevation in degrees, `[10, 170]`. 90 looks along the normal.
    pub user_tilt_degrees: f64,
}

impl Default for SurfaceViewState {
    fn default() -> Self {
        Self {
            height_above_surface: 0.2,
            field_of_view_degrees: 75.0,
            user_rotation: 0.0,
            user_tilt_degrees: 70.0,
        }
    }
}

impl SurfaceViewState {
    /// User tilt clamped to `[MIN_USER_TILT_DEGREES, MAX_USER_TILT_DEGREES]`.
    pub fn clamped_tilt_degrees(&self) -> f64 {
        self.user_tilt_degrees
            .clamp(MIN_USER_TILT_DEGREES, MAX_USER_TILT_DEGREES)
    }

    /// `(planar_weight, vertical_weight)` = `(cos tilt, sin tilt)`.
    pub fn tilt_weights(&self) -> (f64, f64) {
        let tilt = self.clamped_tilt_degrees().to_radians();
        (tilt.cos(), tilt.sin())
    }

    /// Field of view clamped to `[MIN_FIELD_OF_VIEW_DEGREES, MAX_FIELD_OF_VIEW_DEGREES]`.
    pub fn clamped_field_of_view_degrees(&self) -> f64 {
        self.field_of_view_degrees
            .clamp(MIN_FIELD_OF_VIEW_DEGREES, MAX_FIELD_OF_VIEW_DEGREES)
    }
}

/// Orthonormal `(east, north)` pair spanning the plane tangent to the sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentBasis {
    pub east: DVec3,
    pub north: DVec3,
    pub normal: DVec3,
}

impl TangentBasis {
    /// Build the basis at a unit surface normal.
    ///
    /// Near the poles the world-up reference is almost parallel to the normal
    /// and the cross product vanishes, so +Z is used instead.
    pub fn at(normal: DVec3) -> Self {
        let reference = if Self::uses_pole_fallback(normal) {
            tracing::trace!(?normal, "tangent basis using pole fallback axis");
            DVec3::Z
        } else {
            DVec3::Y
        };
        let east = reference.cross(normal).normalize();
        let north = normal.cross(east).normalize();
        Self {
            east,
            north,
            normal,
        }
    }

    /// Whether `normal` is close enough to world up to need the fallback axis.
    pub fn uses_pole_fallback(normal: DVec3) -> bool {
        normal.dot(DVec3::Y).abs() > POLE_ALIGNMENT_THRESHOLD
    }

    /// Unit direction in the tangent plane for `heading` radians, measured
    /// from north towards east.
    pub fn heading_direction(&self, heading: f64) -> DVec3 {
        let dir = (self.east * heading.sin() + self.north * heading.cos()).normalize();
        let drift = dir.dot(self.normal);
        if drift.abs() > ORTHOGONALITY_EPSILON {
            (dir - self.normal * drift).normalize()
        } else {
            dir
        }
    }
}

/// Derived pose of the surface-view camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCameraPose {
    pub position: DVec3,
    /// Always the outward surface normal.
    pub up: DVec3,
    pub look_target: DVec3,
    /// Unit vector from `position` towards `look_target`.
    pub look_direction: DVec3,
    /// Heading direction in the tangent plane, before the tilt blend.
    pub tangent_direction: DVec3,
    /// Clamped vertical field of view in degrees.
    pub field_of_view_degrees: f64,
}

impl SurfaceCameraPose {
    /// Right-handed view matrix for the renderer.
    ///
    /// When the camera looks (almost) straight along the normal the normal is
    /// no longer usable as an up hint; the reversed heading direction is used,
    /// which is the limit of the projected normal as tilt approaches 90.
    pub fn view_matrix(&self) -> DMat4 {
        let up_hint = if self.look_direction.dot(self.up).abs() > 1.0 - 1e-9 {
            -self.tangent_direction
        } else {
            self.up
        };
        DMat4::look_at_rh(self.position, self.look_target, up_hint)
    }
}

/// Compute the surface camera pose for the current settings.
///
/// Called every tick, since the hour angle changes the heading even when the
/// marker does not move.
pub fn compute_surface_camera_pose(
    geo: &GeoCoordinate,
    orientation: &PlanetOrientation,
    view: &SurfaceViewState,
    planet_radius: f64,
) -> SurfaceCameraPose {
    let normal = surface_normal(geo, orientation);
    let position = normal * (planet_radius + view.height_above_surface);

    let basis = TangentBasis::at(normal);
    let heading = orientation.hour_angle() + view.user_rotation;
    let tangent_direction = basis.heading_direction(heading);

    let (planar, vertical) = view.tilt_weights();
    let look_direction = (tangent_direction * planar + normal * vertical).normalize();
    let look_target = position + look_direction * planet_radius * LOOK_DISTANCE_RADII;

    SurfaceCameraPose {
        position,
        up: normal,
        look_target,
        look_direction,
        tangent_direction,
        field_of_view_degrees: view.clamped_field_of_view_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn untilted() -> PlanetOrientation {
        PlanetOrientation {
            axial_tilt_degrees: 0.0,
            texture_rotation_radians: 0.0,
            time_of_day_hours: 0.0,
        }
    }

    #[test]
    fn test_tangent_basis_is_orthonormal() {
        for normal in [
            DVec3::X,
            DVec3::new(0.3, 0.5, -0.8).normalize(),
            DVec3::new(0.1, 0.99, 0.0).normalize(),
        ] {
            let basis = TangentBasis::at(normal);
            assert!((basis.east.length() - 1.0).abs() < EPSILON);
            assert!((basis.north.length() - 1.0).abs() < EPSILON);
            assert!(basis.east.dot(basis.north).abs() < EPSILON);
            assert!(basis.east.dot(normal).abs() < EPSILON);
            assert!(basis.north.dot(normal).abs() < EPSILON);
        }
    }

    #[test]
    fn test_equator_north_is_world_up() {
        let basis = TangentBasis::at(DVec3::X);
        assert!((basis.north - DVec3::Y).length() < EPSILON, "got {:?}", basis.north);
        assert!((basis.east - DVec3::NEG_Z).length() < EPSILON, "got {:?}", basis.east);
    }

    #[test]
    fn test_pole_fallback_threshold() {
        assert!(TangentBasis::uses_pole_fallback(DVec3::Y));
        assert!(TangentBasis::uses_pole_fallback(DVec3::NEG_Y));
        assert!(!TangentBasis::uses_pole_fallback(DVec3::X));
        // 60 degrees latitude: dot = 0.866, still below the threshold.
        let sixty = GeoCoordinate::new(60.0, 0.0).to_unit_vector();
        assert!(!TangentBasis::uses_pole_fallback(sixty));
    }

    #[test]
    fn test_heading_zero_is_north_and_quarter_turn_is_east() {
        let basis = TangentBasis::at(DVec3::X);
        assert!((basis.heading_direction(0.0) - basis.north).length() < EPSILON);
        let quarter = basis.heading_direction(std::f64::consts::FRAC_PI_2);
        assert!((quarter - basis.east).length() < EPSILON);
    }

    #[test]
    fn test_heading_direction_reprojects_drift() {
        let normal = DVec3::X;
        // A deliberately skewed basis whose "north" leaks into the normal.
        let basis = TangentBasis {
            east: DVec3::NEG_Z,
            north: DVec3::new(0.1, 1.0, 0.0).normalize(),
            normal,
        };
        let dir = basis.heading_direction(0.0);
        assert!(dir.dot(normal).abs() < EPSILON, "drift left: {}", dir.dot(normal));
        assert!((dir.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_up_is_surface_normal() {
        let geo = GeoCoordinate::new(12.0, -48.0);
        let orientation = PlanetOrientation::default();
        let pose =
            compute_surface_camera_pose(&geo, &orientation, &SurfaceViewState::default(), 1.0);
        let normal = surface_normal(&geo, &orientation);
        assert!((pose.up - normal).length() < EPSILON);
    }

    #[test]
    fn test_negative_height_places_camera_below_surface() {
        let view = SurfaceViewState {
            height_above_surface: -0.1,
            ..Default::default()
        };
        let geo = GeoCoordinate::new(5.0, 5.0);
        let pose = compute_surface_camera_pose(&geo, &untilted(), &view, 1.0);
        assert!((pose.position.length() - 0.9).abs() < EPSILON);
        assert!(pose.look_direction.is_finite());
    }

    #[test]
    fn test_look_target_is_far_along_look_direction() {
        let pose = compute_surface_camera_pose(
            &GeoCoordinate::new(30.0, 60.0),
            &PlanetOrientation::default(),
            &SurfaceViewState::default(),
            2.0,
        );
        let offset = pose.look_target - pose.position;
        assert!((offset.length() - 2.0 * LOOK_DISTANCE_RADII).abs() < 1e-6);
        assert!((offset.normalize() - pose.look_direction).length() < EPSILON);
    }

    #[test]
    fn test_tilt_is_clamped() {
        let low = SurfaceViewState {
            user_tilt_degrees: -40.0,
            ..Default::default()
        };
        assert_eq!(low.clamped_tilt_degrees(), MIN_USER_TILT_DEGREES);
        let high = SurfaceViewState {
            user_tilt_degrees: 180.0,
            ..Default::default()
        };
        assert_eq!(high.clamped_tilt_degrees(), MAX_USER_TILT_DEGREES);
    }

    #[test]
    fn test_field_of_view_is_clamped() {
        let view = SurfaceViewState {
            field_of_view_degrees: 150.0,
            ..Default::default()
        };
        let pose = compute_surface_camera_pose(&GeoCoordinate::default(), &untilted(), &view, 1.0);
        assert_eq!(pose.field_of_view_degrees, MAX_FIELD_OF_VIEW_DEGREES);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let pose = compute_surface_camera_pose(
            &GeoCoordinate::new(-20.0, 100.0),
            &PlanetOrientation::default(),
            &SurfaceViewState::default(),
            1.0,
        );
        let eye = pose.view_matrix().transform_point3(pose.position);
        assert!(eye.length() < 1e-9, "got {eye:?}");
        let ahead = pose.view_matrix().transform_point3(pose.look_target);
        assert!(ahead.z < 0.0, "look target should be in front (-Z), got {ahead:?}");
    }

    #[test]
    fn test_view_matrix_straight_up_is_finite() {
        let view = SurfaceViewState {
            user_tilt_degrees: 90.0,
            ..Default::default()
        };
        let geo = GeoCoordinate::new(40.0, 0.0);
        let pose = compute_surface_camera_pose(&geo, &untilted(), &view, 1.0);
        assert!(pose.view_matrix().is_finite());
    }
}

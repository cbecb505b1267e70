//! Forward placement of the surface location marker.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::geo::GeoCoordinate;
use crate::orientation::PlanetOrientation;

/// Marker distance from the center relative to the planet radius. Keeps the
/// marker just above the rendered surface so it does not z-fight.
pub const SURFACE_OFFSET_FACTOR: f64 = 1.02;

/// Pose of the marker object in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerPose {
    /// World position, `planet_radius * SURFACE_OFFSET_FACTOR` from the center.
    pub position: DVec3,
    /// Rotation taking the marker's canonical up (+Y) onto the surface normal.
    pub orientation: DQuat,
    /// Outward surface normal at the marker.
    pub normal: DVec3,
}

impl MarkerPose {
    /// The point on the literal surface directly beneath the marker.
    pub fn surface_point(&self, planet_radius: f64) -> DVec3 {
        self.normal * planet_radius
    }
}

/// Outward surface normal at `geo` after the body rotation.
///
/// Rotations preserve the sphere's normal-equals-position-direction property,
/// so the rotated unit position is the normal.
pub fn surface_normal(geo: &GeoCoordinate, orientation: &PlanetOrientation) -> DVec3 {
    orientation.to_body(geo.to_unit_vector()).normalize()
}

/// Place the marker for `geo` on a planet of `planet_radius`.
pub fn place_marker(
    geo: &GeoCoordinate,
    orientation: &PlanetOrientation,
    planet_radius: f64,
) -> MarkerPose {
    let normal = surface_normal(geo, orientation);
    MarkerPose {
        position: normal * planet_radius * SURFACE_OFFSET_FACTOR,
        orientation: DQuat::from_rotation_arc(DVec3::Y, normal),
        normal,
    }
}

//! Surface picking: from a pointer on the overview camera to latitude/longitude.
//!
//! The ray/surface intersection belongs to the rendering collaborator and sits
//! behind [`SurfaceRaycaster`]. [`SphereRaycaster`] intersects the ideal planet
//! sphere analytically and is enough when the rendered mesh is a sphere.

use std::fmt;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::geo::GeoCoordinate;
use crate::locations::{LocationLabel, label_for};
use crate::orientation::PlanetOrientation;

/// A ray with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// The primary (non-surface) viewing camera the user clicks through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCamera {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Width / height.
    pub aspect_ratio: f64,
}

impl ViewCamera {
    /// Camera on the +Z axis at `distance`, looking at the origin.
    pub fn looking_at_origin(distance: f64, fov_y_degrees: f64, aspect_ratio: f64) -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, distance),
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov_y_degrees,
            aspect_ratio,
        }
    }

    /// Ray through a normalized pointer position (`[-1, 1]` on both axes,
    /// +Y up, as in normalized device coordinates).
    pub fn ray_through(&self, pointer_ndc: DVec2) -> Ray {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let camera_up = right.cross(forward);
        let half_height = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect_ratio;

        let direction = (forward
            + right * (pointer_ndc.x * half_width)
            + camera_up * (pointer_ndc.y * half_height))
            .normalize();
        Ray {
            origin: self.position,
            direction,
        }
    }
}

/// Ray/surface intersection supplied by the rendering side.
pub trait SurfaceRaycaster {
    /// World-space point where the pointer ray first hits the planet, or
    /// `None` when the pointer is over empty space.
    fn cast(&self, pointer_ndc: DVec2, camera: &ViewCamera) -> Option<DVec3>;
}

/// Analytic raycaster against the planet sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereRaycaster {
    pub center: DVec3,
    pub radius: f64,
}

impl SphereRaycaster {
    /// Sphere of `radius` centered on the origin.
    pub fn centered(radius: f64) -> Self {
        Self {
            center: DVec3::ZERO,
            radius,
        }
    }
}

impl SurfaceRaycaster for SphereRaycaster {
    fn cast(&self, pointer_ndc: DVec2, camera: &ViewCamera) -> Option<DVec3> {
        let ray = camera.ray_through(pointer_ndc);
        let (t_near, t_far) =
            ray_sphere_intersect(ray.origin, ray.direction, self.center, self.radius)?;
        // From inside the sphere the near root is behind the camera.
        let t = if t_near >= 0.0 { t_near } else { t_far };
        (t >= 0.0).then(|| ray.at(t))
    }
}

/// Ray/sphere intersection returning `(t_near, t_far)`, or `None` on a miss.
/// `dir` must be normalized.
pub fn ray_sphere_intersect(
    origin: DVec3,
    dir: DVec3,
    center: DVec3,
    radius: f64,
) -> Option<(f64, f64)> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    Some((-b - sqrt_disc, -b + sqrt_disc))
}

/// Convert a world-space surface point back into geographic coordinates by
/// undoing the body rotation (tilt first, then texture alignment).
///
/// Total for every point except the planet center.
pub fn pick_geo_coordinate(
    hit_point: DVec3,
    orientation: &PlanetOrientation,
) -> Option<GeoCoordinate> {
    GeoCoordinate::from_direction(orientation.from_body(hit_point))
}

/// A picked coordinate with its catalogue label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickResult {
    pub coordinate: GeoCoordinate,
    pub label: LocationLabel,
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.coordinate)
    }
}

/// [`pick_geo_coordinate`] followed by the nearest-location lookup.
pub fn pick_labelled(hit_point: DVec3, orientation: &PlanetOrientation) -> Option<PickResult> {
    let coordinate = pick_geo_coordinate(hit_point, orientation)?;
    let label = label_for(&coordinate);
    tracing::debug!(%coordinate, %label, "picked surface point");
    Some(PickResult { coordinate, label })
}

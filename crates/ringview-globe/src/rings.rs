//! Ring system: an annulus in the planet's equatorial plane.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::orientation::PlanetOrientation;

/// Rays closer to parallel with the ring plane than this never hit it.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Ring geometry and appearance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingSystem {
    /// Inner edge in planet radii, before `scale`.
    pub inner_radius_factor: f64,
    /// Outer edge in planet radii, before `scale`.
    pub outer_radius_factor: f64,
    /// Uniform scale applied to both edges.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for RingSystem {
    fn default() -> Self {
        Self {
            inner_radius_factor: 1.2,
            outer_radius_factor: 2.3,
            scale: 1.0,
            opacity: 0.8,
        }
    }
}

/// Where a ray crosses the rings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingHit {
    /// Distance along the (unit) ray.
    pub distance: f64,
    /// World-space crossing point.
    pub point: DVec3,
    /// 0 at the inner edge, 1 at the outer edge.
    pub radial_fraction: f64,
}

impl RingSystem {
    pub fn inner_radius(&self, planet_radius: f64) -> f64 {
        self.inner_radius_factor * self.scale * planet_radius
    }

    pub fn outer_radius(&self, planet_radius: f64) -> f64 {
        self.outer_radius_factor * self.scale * planet_radius
    }

    /// First crossing of the ray with the ring annulus, if any.
    ///
    /// The ring plane passes through the planet center with the rotated polar
    /// axis as its normal. `direction` must be normalized.
    pub fn intersect(
        &self,
        origin: DVec3,
        direction: DVec3,
        orientation: &PlanetOrientation,
        planet_radius: f64,
    ) -> Option<RingHit> {
        let normal = orientation.polar_axis();
        let denom = direction.dot(normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let distance = -origin.dot(normal) / denom;
        if distance <= 0.0 {
            return None;
        }

        let point = origin + direction * distance;
        let r = point.length();
        let inner = self.inner_radius(planet_radius);
        let outer = self.outer_radius(planet_radius);
        if r < inner || r > outer {
            return None;
        }

        let width = outer - inner;
        let radial_fraction = if width > 0.0 { (r - inner) / width } else { 0.0 };
        Some(RingHit {
            distance,
            point,
            radial_fraction,
        })
    }

    /// Whether `surface_point` lies in the rings' shadow for the given sun
    /// direction. Points on the night side are never ring-shadowed.
    pub fn shadows(
        &self,
        surface_point: DVec3,
        sun_direction: DVec3,
        orientation: &PlanetOrientation,
        planet_radius: f64,
    ) -> bool {
        let sun = sun_direction.normalize_or_zero();
        if sun == DVec3::ZERO || surface_point.dot(sun) <= 0.0 {
            return false;
        }
        self.opacity > 0.0
            && self
                .intersect(surface_point, sun, orientation, planet_radius)
                .is_some()
    }
}

//! Globe geometry for the ringed-planet viewer.
//!
//! Forward placement of a surface marker on a rotated, tilted sphere, the
//! surface-view camera pose derived from it, and the inverse used to turn a
//! clicked surface point back into latitude/longitude.

mod geo;
mod locations;
mod marker;
mod orientation;
mod picking;
mod rings;
mod surface_camera;

pub use geo::{GeoCoordinate, longitude_difference, wrap_longitude};
pub use locations::{
    CATALOG, LocationLabel, MATCH_TOLERANCE_DEGREES, NamedLocation, find_by_name, label_for,
    nearest_named,
};
pub use marker::{MarkerPose, SURFACE_OFFSET_FACTOR, place_marker, surface_normal};
pub use orientation::{HOURS_PER_DAY, PlanetOrientation, wrap_time_of_day};
pub use picking::{
    PickResult, Ray, SphereRaycaster, SurfaceRaycaster, ViewCamera, pick_geo_coordinate,
    pick_labelled, ray_sphere_intersect,
};
pub use rings::{RingHit, RingSystem};
pub use surface_camera::{
    LOOK_DISTANCE_RADII, MAX_FIELD_OF_VIEW_DEGREES, MAX_USER_TILT_DEGREES,
    MIN_FIELD_OF_VIEW_DEGREES, MIN_USER_TILT_DEGREES, ORTHOGONALITY_EPSILON,
    POLE_ALIGNMENT_THRESHOLD, SurfaceCameraPose, SurfaceViewState, TangentBasis,
    compute_surface_camera_pose,
};

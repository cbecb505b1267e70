//! The viewer's settings record and its setters.

use std::f64::consts::TAU;

use glam::DVec3;
use ringview_config::Config;
use ringview_globe::{
    GeoCoordinate, LocationLabel, MAX_FIELD_OF_VIEW_DEGREES, MAX_USER_TILT_DEGREES,
    MIN_FIELD_OF_VIEW_DEGREES, MIN_USER_TILT_DEGREES, PickResult, PlanetOrientation, RingSystem,
    SurfaceViewState, find_by_name, label_for, wrap_time_of_day,
};
use tracing::{info, warn};

/// Mutable state shared by the UI and the per-frame pose computation.
///
/// Every field is private; setters clamp or wrap their inputs so the record is
/// always valid. Two revision counters let consumers skip work: the placement
/// revision changes whenever the marker would move, the ring revision whenever
/// the ring geometry or appearance changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerSettings {
    planet_radius: f64,
    location: GeoCoordinate,
    label: LocationLabel,
    orientation: PlanetOrientation,
    view: SurfaceViewState,
    rings: RingSystem,
    sun_direction: DVec3,
    placement_revision: u64,
    ring_revision: u64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let location = GeoCoordinate::default();
        Self {
            planet_radius: 1.0,
            label: label_for(&location),
            location,
            orientation: PlanetOrientation::default(),
            view: SurfaceViewState::default(),
            rings: RingSystem::default(),
            sun_direction: DVec3::X,
            placement_revision: 0,
            ring_revision: 0,
        }
    }
}

impl ViewerSettings {
    /// Build the record from a loaded config, validating every value.
    pub fn from_config(config: &Config) -> Self {
        let mut settings = Self::default();
        settings.set_planet_radius(config.planet.radius);
        settings.set_axial_tilt(config.planet.axial_tilt_degrees);
        settings.set_texture_rotation(config.planet.texture_rotation_radians);
        settings.set_time_of_day(config.planet.time_of_day_hours);
        settings.set_sun_direction(DVec3::from_array(config.planet.sun_direction));

        settings.set_location(config.marker.latitude, config.marker.longitude);
        if let Some(name) = &config.marker.location_name
            && !settings.select_location(name)
        {
            warn!(%name, "unknown catalogue location in config, keeping coordinates");
        }

        settings.set_height_above_surface(config.surface_view.height_above_surface);
        settings.set_field_of_view(config.surface_view.field_of_view_degrees);
        settings.set_user_rotation(config.surface_view.user_rotation);
        settings.set_user_tilt(config.surface_view.user_tilt_degrees);

        settings.set_ring_radii(
            config.rings.inner_radius_factor,
            config.rings.outer_radius_factor,
        );
        settings.set_ring_scale(config.rings.scale);
        settings.set_ring_opacity(config.rings.opacity);
        settings
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn planet_radius(&self) -> f64 {
        self.planet_radius
    }

    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    pub fn label(&self) -> &LocationLabel {
        &self.label
    }

    pub fn orientation(&self) -> &PlanetOrientation {
        &self.orientation
    }

    pub fn view(&self) -> &SurfaceViewState {
        &self.view
    }

    pub fn rings(&self) -> &RingSystem {
        &self.rings
    }

    /// Unit direction towards the sun.
    pub fn sun_direction(&self) -> DVec3 {
        self.sun_direction
    }

    pub fn placement_revision(&self) -> u64 {
        self.placement_revision
    }

    pub fn ring_revision(&self) -> u64 {
        self.ring_revision
    }

    // ── Planet ──────────────────────────────────────────────────────

    /// Ignored unless positive and finite.
    pub fn set_planet_radius(&mut self, radius: f64) {
        if !(radius.is_finite() && radius > 0.0) {
            warn!(radius, "ignoring invalid planet radius");
            return;
        }
        self.planet_radius = radius;
        self.placement_revision += 1;
    }

    pub fn set_axial_tilt(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            warn!(degrees, "ignoring non-finite axial tilt");
            return;
        }
        self.orientation.axial_tilt_degrees = degrees;
        self.placement_revision += 1;
    }

    pub fn set_texture_rotation(&mut self, radians: f64) {
        if !radians.is_finite() {
            warn!(radians, "ignoring non-finite texture rotation");
            return;
        }
        self.orientation.texture_rotation_radians = radians;
        self.placement_revision += 1;
    }

    /// Wrapped into `[0, 24)`. Only the surface camera heading depends on it,
    /// so the marker placement is left untouched.
    pub fn set_time_of_day(&mut self, hours: f64) {
        if !hours.is_finite() {
            warn!(hours, "ignoring non-finite time of day");
            return;
        }
        self.orientation.time_of_day_hours = wrap_time_of_day(hours);
    }

    /// Advance the clock by `hours`, wrapping past midnight.
    pub fn advance_time(&mut self, hours: f64) {
        self.set_time_of_day(self.orientation.time_of_day_hours + hours);
    }

    /// Ignored when the direction has no length.
    pub fn set_sun_direction(&mut self, direction: DVec3) {
        let dir = direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            warn!(?direction, "ignoring degenerate sun direction");
            return;
        }
        self.sun_direction = dir;
    }

    // ── Marker location ─────────────────────────────────────────────

    /// Move the marker, clamping latitude and wrapping longitude.
    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        if !(latitude.is_finite() && longitude.is_finite()) {
            warn!(latitude, longitude, "ignoring non-finite location");
            return;
        }
        self.location = GeoCoordinate::normalized(latitude, longitude);
        self.label = label_for(&self.location);
        self.placement_revision += 1;
    }

    /// Move the marker to a catalogued location. Returns `false` if the name
    /// is unknown, leaving the location unchanged.
    pub fn select_location(&mut self, name: &str) -> bool {
        let Some(named) = find_by_name(name) else {
            return false;
        };
        self.location = named.coordinate;
        self.label = LocationLabel::Named(named.name.to_string());
        self.placement_revision += 1;
        info!(location = named.name, coordinate = %named.coordinate, "selected catalogue location");
        true
    }

    /// Adopt the result of a surface pick.
    pub fn apply_pick(&mut self, pick: &PickResult) {
        self.location = pick.coordinate;
        self.label = pick.label.clone();
        self.placement_revision += 1;
    }

    // ── Surface view ────────────────────────────────────────────────

    /// Signed; negative heights put the camera below the surface.
    pub fn set_height_above_surface(&mut self, height: f64) {
        if !height.is_finite() {
            warn!(height, "ignoring non-finite surface height");
            return;
        }
        self.view.height_above_surface = height;
    }

    pub fn set_field_of_view(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            warn!(degrees, "ignoring non-finite field of view");
            return;
        }
        self.view.field_of_view_degrees =
            degrees.clamp(MIN_FIELD_OF_VIEW_DEGREES, MAX_FIELD_OF_VIEW_DEGREES);
    }

    /// Wrapped into `[0, 2 pi)`.
    pub fn set_user_rotation(&mut self, radians: f64) {
        if !radians.is_finite() {
            warn!(radians, "ignoring non-finite user rotation");
            return;
        }
        self.view.user_rotation = radians.rem_euclid(TAU);
    }

    pub fn set_user_tilt(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            warn!(degrees, "ignoring non-finite user tilt");
            return;
        }
        self.view.user_tilt_degrees = degrees.clamp(MIN_USER_TILT_DEGREES, MAX_USER_TILT_DEGREES);
    }

    // ── Rings ───────────────────────────────────────────────────────

    /// Ignored unless `0 < inner <= outer`.
    pub fn set_ring_radii(&mut self, inner_factor: f64, outer_factor: f64) {
        if !(inner_factor > 0.0 && outer_factor >= inner_factor && outer_factor.is_finite()) {
            warn!(inner_factor, outer_factor, "ignoring invalid ring radii");
            return;
        }
        self.rings.inner_radius_factor = inner_factor;
        self.rings.outer_radius_factor = outer_factor;
        self.ring_revision += 1;
    }

    /// Ignored unless positive and finite.
    pub fn set_ring_scale(&mut self, scale: f64) {
        if !(scale.is_finite() && scale > 0.0) {
            warn!(scale, "ignoring invalid ring scale");
            return;
        }
        self.rings.scale = scale;
        self.ring_revision += 1;
    }

    pub fn set_ring_opacity(&mut self, opacity: f64) {
        if !opacity.is_finite() {
            warn!(opacity, "ignoring non-finite ring opacity");
            return;
        }
        self.rings.opacity = opacity.clamp(0.0, 1.0);
        self.ring_revision += 1;
    }
}

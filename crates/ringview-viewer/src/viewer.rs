//! Per-frame pose derivation and click handling.

use glam::DVec2;
use ringview_config::Config;
use ringview_globe::{
    GeoCoordinate, LocationLabel, MarkerPose, PickResult, PlanetOrientation, RingHit, RingSystem,
    SphereRaycaster, SurfaceCameraPose, SurfaceRaycaster, ViewCamera, compute_surface_camera_pose,
    pick_labelled, place_marker,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::gestures::GestureSensitivity;
use crate::settings::ViewerSettings;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FramePoses {
    /// Monotonic tick counter, starting at 1.
    pub frame: u64,
    pub location: GeoCoordinate,
    pub label: LocationLabel,
    pub orientation: PlanetOrientation,
    pub marker: MarkerPose,
    pub camera: SurfaceCameraPose,
    pub rings: RingSystem,
    /// Changes whenever the ring geometry or appearance does; the renderer
    /// rebuilds or updates ring meshes when it sees a new value.
    pub ring_revision: u64,
    /// Where the surface camera's line of sight crosses the rings, if it does.
    pub rings_in_view: Option<RingHit>,
    /// Whether the ground beneath the marker lies in the rings' shadow.
    pub marker_in_ring_shadow: bool,
}

/// Everything a marker pose depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MarkerInputs {
    location: GeoCoordinate,
    axial_tilt_degrees: f64,
    texture_rotation_radians: f64,
    planet_radius: f64,
}

impl MarkerInputs {
    fn of(settings: &ViewerSettings) -> Self {
        let orientation = settings.orientation();
        Self {
            location: settings.location(),
            axial_tilt_degrees: orientation.axial_tilt_degrees,
            texture_rotation_radians: orientation.texture_rotation_radians,
            planet_radius: settings.planet_radius(),
        }
    }
}

/// Owns the settings record and derives poses from it.
#[derive(Clone, Debug)]
pub struct Viewer {
    settings: ViewerSettings,
    sensitivity: GestureSensitivity,
    overview: ViewCamera,
    /// Marker pose with the inputs it was computed from.
    marker_cache: Option<(MarkerInputs, MarkerPose)>,
    frame: u64,
}

impl Viewer {
    pub fn new(
        settings: ViewerSettings,
        sensitivity: GestureSensitivity,
        overview: ViewCamera,
    ) -> Self {
        Self {
            settings,
            sensitivity,
            overview,
            marker_cache: None,
            frame: 0,
        }
    }

    /// Build a viewer from a loaded config.
    pub fn from_config(config: &Config) -> Self {
        let settings = ViewerSettings::from_config(config);
        let overview = overview_camera(config, settings.planet_radius());
        Self::new(settings, GestureSensitivity::from(&config.input), overview)
    }

    /// Replace settings, gesture sensitivity and overview camera with the
    /// values of a (re)loaded config. The frame counter keeps running.
    pub fn apply_config(&mut self, config: &Config) {
        self.settings = ViewerSettings::from_config(config);
        self.sensitivity = GestureSensitivity::from(&config.input);
        self.overview = overview_camera(config, self.settings.planet_radius());
        self.marker_cache = None;
        info!(frame = self.frame, "viewer reconfigured");
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Mutable access for UI setters. Changes are picked up on the next tick.
    pub fn settings_mut(&mut self) -> &mut ViewerSettings {
        &mut self.settings
    }

    pub fn overview(&self) -> &ViewCamera {
        &self.overview
    }

    /// Update the overview camera's aspect ratio after a resize.
    pub fn resize_overview(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.overview.aspect_ratio = width / height;
        }
    }

    /// Frames computed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current marker pose, recomputed only when its inputs changed.
    pub fn marker(&mut self) -> MarkerPose {
        let inputs = MarkerInputs::of(&self.settings);
        if let Some((cached, pose)) = self.marker_cache
            && cached == inputs
        {
            return pose;
        }

        let pose = place_marker(
            &inputs.location,
            self.settings.orientation(),
            inputs.planet_radius,
        );
        debug!(
            revision = self.settings.placement_revision(),
            position = ?pose.position,
            "marker placed"
        );
        self.marker_cache = Some((inputs, pose));
        pose
    }

    /// Derive the poses for one redraw.
    ///
    /// The surface camera is recomputed every tick; the hour angle turns the
    /// heading even when nothing else changed.
    pub fn tick(&mut self) -> FramePoses {
        self.frame += 1;
        let marker = self.marker();

        let settings = &self.settings;
        let radius = settings.planet_radius();
        let orientation = settings.orientation();
        let camera =
            compute_surface_camera_pose(&settings.location(), orientation, settings.view(), radius);

        let rings = settings.rings();
        let rings_in_view =
            rings.intersect(camera.position, camera.look_direction, orientation, radius);
        let marker_in_ring_shadow = rings.shadows(
            marker.surface_point(radius),
            settings.sun_direction(),
            orientation,
            radius,
        );

        FramePoses {
            frame: self.frame,
            location: settings.location(),
            label: settings.label().clone(),
            orientation: *orientation,
            marker,
            camera,
            rings: *rings,
            ring_revision: settings.ring_revision(),
            rings_in_view,
            marker_in_ring_shadow,
        }
    }

    /// Handle a click at a normalized pointer position on the overview view.
    ///
    /// On a surface hit the picked coordinate replaces the marker location.
    /// Clicking empty space returns `None` and changes nothing.
    pub fn on_click(
        &mut self,
        pointer_ndc: DVec2,
        raycaster: &dyn SurfaceRaycaster,
    ) -> Option<PickResult> {
        let hit = raycaster.cast(pointer_ndc, &self.overview)?;
        let pick = pick_labelled(hit, self.settings.orientation())?;
        info!(coordinate = %pick.coordinate, label = %pick.label, "marker moved by click");
        self.settings.apply_pick(&pick);
        Some(pick)
    }

    /// [`on_click`](Self::on_click) against the ideal planet sphere.
    pub fn on_click_sphere(&mut self, pointer_ndc: DVec2) -> Option<PickResult> {
        let raycaster = SphereRaycaster::centered(self.settings.planet_radius());
        self.on_click(pointer_ndc, &raycaster)
    }

    /// Pointer drag on the surface preview.
    pub fn on_drag(&mut self, dx: f64, dy: f64) {
        let sensitivity = self.sensitivity;
        self.settings.apply_drag(dx, dy, &sensitivity);
    }

    /// Scroll on the surface preview.
    pub fn on_scroll(&mut self, delta: f64) {
        let sensitivity = self.sensitivity;
        self.settings.apply_scroll(delta, &sensitivity);
    }
}

fn overview_camera(config: &Config, planet_radius: f64) -> ViewCamera {
    ViewCamera::looking_at_origin(
        config.overview.distance_radii * planet_radius,
        config.overview.field_of_view_degrees,
        config.overview.aspect_ratio,
    )
}

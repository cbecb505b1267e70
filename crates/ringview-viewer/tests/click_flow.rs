//! End-to-end: settings -> tick -> click -> tick, with a scripted raycaster.

use std::cell::Cell;

use glam::{DVec2, DVec3};
use ringview_config::Config;
use ringview_globe::{
    LocationLabel, PlanetOrientation, SurfaceRaycaster, ViewCamera, find_by_name, place_marker,
};
use ringview_viewer::Viewer;

/// Returns a fixed hit (or none) and counts how often it was asked.
struct ScriptedRaycaster {
    hit: Option<DVec3>,
    calls: Cell<u32>,
}

impl SurfaceRaycaster for ScriptedRaycaster {
    fn cast(&self, _pointer_ndc: DVec2, _camera: &ViewCamera) -> Option<DVec3> {
        self.calls.set(self.calls.get() + 1);
        self.hit
    }
}

#[test]
fn test_clicking_tokyo_marker_labels_it() {
    let mut viewer = Viewer::from_config(&Config::default());
    let orientation = PlanetOrientation::default();
    let tokyo = find_by_name("Tokyo").unwrap();
    let raycaster = ScriptedRaycaster {
        hit: Some(place_marker(&tokyo.coordinate, &orientation, 1.0).position),
        calls: Cell::new(0),
    };

    let pick = viewer.on_click(DVec2::new(0.1, 0.2), &raycaster).unwrap();
    assert_eq!(raycaster.calls.get(), 1);
    assert_eq!(pick.label, LocationLabel::Named("Tokyo".to_string()));

    let frame = viewer.tick();
    assert_eq!(frame.label.to_string(), "Tokyo");
    assert!((frame.location.latitude - 35.6833).abs() < 2.0);
}

#[test]
fn test_missed_click_keeps_previous_location() {
    let mut viewer = Viewer::from_config(&Config::default());
    viewer.settings_mut().select_location("Cairo");
    let raycaster = ScriptedRaycaster {
        hit: None,
        calls: Cell::new(0),
    };

    assert!(viewer.on_click(DVec2::ZERO, &raycaster).is_none());
    assert_eq!(viewer.tick().label, LocationLabel::Named("Cairo".to_string()));
}

#[test]
fn test_frame_serializes_to_json() {
    let mut viewer = Viewer::from_config(&Config::default());
    let frame = viewer.tick();
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["frame"], 1);
    assert!(json["camera"]["up"].is_array());
    assert!(json["marker_in_ring_shadow"].is_boolean());
}

#[test]
fn test_surface_camera_under_rings_sees_them() {
    // Untilted planet, observer at 20S looking up and towards the equator:
    // the line of sight crosses the ring plane inside the annulus.
    let mut config = Config::default();
    config.planet.axial_tilt_degrees = 0.0;
    config.planet.texture_rotation_radians = 0.0;
    config.planet.time_of_day_hours = 0.0;
    config.marker.latitude = -20.0;
    config.marker.longitude = 0.0;
    config.surface_view.height_above_surface = 0.0;
    config.surface_view.user_tilt_degrees = 30.0;

    let mut viewer = Viewer::from_config(&config);
    let frame = viewer.tick();
    let hit = frame.rings_in_view.expect("rings should be in view");
    assert!(hit.radial_fraction >= 0.0 && hit.radial_fraction <= 1.0);
    assert!(hit.point.y.abs() < 1e-9);
}

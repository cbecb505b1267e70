//! Pointer gestures on the surface-view preview: drag to pan/tilt, scroll to zoom.

use ringview_config::InputConfig;

use crate::settings::ViewerSettings;

/// How strongly pointer input moves the surface camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSensitivity {
    /// Heading change per horizontally dragged pixel, in radians.
    pub rotate_radians_per_pixel: f64,
    /// Tilt change per vertically dragged pixel, in degrees.
    pub tilt_degrees_per_pixel: f64,
    /// Field-of-view change per scroll unit, in degrees.
    pub zoom_degrees_per_scroll: f64,
    /// Invert vertical drag.
    pub invert_y: bool,
}

impl Default for GestureSensitivity {
    fn default() -> Self {
        Self::from(&InputConfig::default())
    }
}

impl From<&InputConfig> for GestureSensitivity {
    fn from(input: &InputConfig) -> Self {
        Self {
            rotate_radians_per_pixel: input.rotate_sensitivity,
            tilt_degrees_per_pixel: input.tilt_sensitivity,
            zoom_degrees_per_scroll: input.zoom_sensitivity,
            invert_y: input.invert_y,
        }
    }
}

impl ViewerSettings {
    /// Apply a pointer drag of `(dx, dy)` pixels.
    ///
    /// Horizontal drag turns the heading; dragging up (negative `dy`) raises
    /// the view towards the zenith. Tilt stays within `[10, 170]`.
    pub fn apply_drag(&mut self, dx: f64, dy: f64, sensitivity: &GestureSensitivity) {
        let dy = if sensitivity.invert_y { -dy } else { dy };
        self.set_user_rotation(
            self.view().user_rotation + dx * sensitivity.rotate_radians_per_pixel,
        );
        self.set_user_tilt(self.view().user_tilt_degrees - dy * sensitivity.tilt_degrees_per_pixel);
    }

    /// Apply scroll wheel input. Scrolling up (positive) zooms in.
    pub fn apply_scroll(&mut self, delta: f64, sensitivity: &GestureSensitivity) {
        if delta.abs() < 1e-9 {
            return;
        }
        self.set_field_of_view(
            self.view().field_of_view_degrees - delta * sensitivity.zoom_degrees_per_scroll,
        );
    }
}

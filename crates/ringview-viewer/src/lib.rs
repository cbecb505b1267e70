//! Viewer state for the ringed-planet visualization.
//!
//! [`ViewerSettings`] is the single mutable settings record; the UI writes it
//! through plain setters and pointer gestures. [`Viewer::tick`] derives the
//! marker and surface-camera poses from it once per redraw, and
//! [`Viewer::on_click`] feeds surface picks back into it.

mod gestures;
mod settings;
mod viewer;

pub use gestures::GestureSensitivity;
pub use settings::ViewerSettings;
pub use viewer::{FramePoses, Viewer};

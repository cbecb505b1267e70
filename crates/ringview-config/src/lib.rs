//! Configuration system for Ringview.
//!
//! Holds the startup values of the viewer settings record (planet, rings,
//! surface view, input sensitivities) and persists them to disk as RON.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, InputConfig, MarkerConfig, OverviewCameraConfig,
    PlanetConfig, RingConfig, SurfaceViewConfig,
};
pub use error::ConfigError;

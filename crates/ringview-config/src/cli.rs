//! Command-line overrides for Ringview.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Command-line overrides shared by every Ringview subcommand.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    /// Marker latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Marker longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Place the marker at a catalogued location (e.g. "Tokyo").
    #[arg(long)]
    pub location: Option<String>,

    /// Axial tilt in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub axial_tilt: Option<f64>,

    /// Time of day in hours.
    #[arg(long)]
    pub time_of_day: Option<f64>,

    /// Surface camera height above the surface.
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<f64>,

    /// Surface camera field of view in degrees.
    #[arg(long)]
    pub fov: Option<f64>,

    /// Surface camera tilt in degrees.
    #[arg(long)]
    pub tilt: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(lat) = args.latitude {
            self.marker.latitude = lat;
            self.marker.location_name = None;
        }
        if let Some(lon) = args.longitude {
            self.marker.longitude = lon;
            self.marker.location_name = None;
        }
        if let Some(ref name) = args.location {
            self.marker.location_name = Some(name.clone());
        }
        if let Some(tilt) = args.axial_tilt {
            self.planet.axial_tilt_degrees = tilt;
        }
        if let Some(hours) = args.time_of_day {
            self.planet.time_of_day_hours = hours;
        }
        if let Some(height) = args.height {
            self.surface_view.height_above_surface = height;
        }
        if let Some(fov) = args.fov {
            self.surface_view.field_of_view_degrees = fov;
        }
        if let Some(tilt) = args.tilt {
            self.surface_view.user_tilt_degrees = tilt;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

//! Ringview command-line driver.
//!
//! Loads `config.ron`, applies command-line overrides, and prints the derived
//! surface-view geometry as JSON on stdout. Logs go to stderr.
//!
//! Run with: `cargo run -p ringview-app -- --location Tokyo pose`

mod error;
mod platform;

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glam::{DVec2, DVec3};
use ringview_config::{CONFIG_FILE_NAME, CliArgs, Config};
use ringview_globe::{CATALOG, PickResult, find_by_name, pick_labelled};
use ringview_viewer::{FramePoses, Viewer};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::platform::PlatformDirs;

/// CLI arguments for the `ringview` binary.
#[derive(Parser, Debug)]
#[command(name = "ringview", about = "Surface-view geometry for a ringed planet")]
struct AppArgs {
    #[command(flatten)]
    overrides: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Compute one frame and print it.
    Pose,

    /// Convert a world-space point on the planet into a coordinate.
    Pick {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
    },

    /// Click the overview view at normalized device coordinates.
    Click {
        #[arg(long, allow_negative_numbers = true)]
        ndc_x: f64,
        #[arg(long, allow_negative_numbers = true)]
        ndc_y: f64,
    },

    /// List the location catalogue.
    Locations,

    /// Advance the clock and print one JSON line per frame.
    Simulate {
        #[arg(long, default_value_t = 24)]
        frames: u32,
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        hours_per_frame: f64,
    },

    /// Write the effective configuration to `config.ron`.
    SaveConfig,
}

#[derive(Serialize)]
struct ClickOutput {
    pick: Option<PickResult>,
    frame: FramePoses,
}

#[derive(Serialize)]
struct LocationEntry {
    name: &'static str,
    latitude: f64,
    longitude: f64,
}

fn main() -> ExitCode {
    let args = AppArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ringview: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: AppArgs) -> Result<(), AppError> {
    let dirs = match &args.overrides.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    let config = prepare(&args.overrides, &dirs)?;

    ringview_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), command = ?args.command, "ringview starting");

    let mut out = std::io::stdout().lock();
    execute(args.command, &config, &dirs, &mut out)
}

/// Validate the overrides, then load (or create) `config.ron` and apply them.
///
/// Nothing is written to disk when an override is rejected.
fn prepare(overrides: &CliArgs, dirs: &PlatformDirs) -> Result<Config, AppError> {
    if let Some(name) = &overrides.location
        && find_by_name(name).is_none()
    {
        return Err(AppError::UnknownLocation(name.clone()));
    }

    dirs.create_dirs()?;
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(overrides);
    Ok(config)
}

fn execute<W: Write>(
    command: Command,
    config: &Config,
    dirs: &PlatformDirs,
    out: &mut W,
) -> Result<(), AppError> {
    let mut viewer = Viewer::from_config(config);

    match command {
        Command::Pose => {
            serde_json::to_writer_pretty(&mut *out, &viewer.tick())?;
            writeln!(out)?;
        }
        Command::Pick { x, y, z } => {
            let pick = pick_labelled(DVec3::new(x, y, z), viewer.settings().orientation());
            if pick.is_none() {
                warn!(x, y, z, "cannot pick the planet centre");
            }
            serde_json::to_writer_pretty(&mut *out, &pick)?;
            writeln!(out)?;
        }
        Command::Click { ndc_x, ndc_y } => {
            let pick = viewer.on_click_sphere(DVec2::new(ndc_x, ndc_y));
            let output = ClickOutput {
                pick,
                frame: viewer.tick(),
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
        Command::Locations => {
            let entries: Vec<LocationEntry> = CATALOG
                .iter()
                .map(|loc| LocationEntry {
                    name: loc.name,
                    latitude: loc.coordinate.latitude,
                    longitude: loc.coordinate.longitude,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
        Command::Simulate {
            frames,
            hours_per_frame,
        } => {
            for _ in 0..frames {
                let frame = viewer.tick();
                serde_json::to_writer(&mut *out, &frame)?;
                writeln!(out)?;
                viewer.settings_mut().advance_time(hours_per_frame);
            }
            info!(frames, hours_per_frame, "simulation finished");
        }
        Command::SaveConfig => {
            config.save(&dirs.config_dir)?;
            info!(path = %dirs.config_dir.join(CONFIG_FILE_NAME).display(), "config saved");
        }
    }

    out.flush()?;
    Ok(())
}

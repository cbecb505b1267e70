//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet body and diurnal clock.
    pub planet: PlanetConfig,
    /// Starting location of the surface marker.
    pub marker: MarkerConfig,
    /// Ring system appearance.
    pub rings: RingConfig,
    /// Surface-view camera.
    pub surface_view: SurfaceViewConfig,
    /// Primary (overview) camera used for surface picking.
    pub overview: OverviewCameraConfig,
    /// Pointer gesture sensitivities.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet body configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planet radius in scene units.
    pub radius: f64,
    /// Axial tilt in degrees, applied about the equatorial forward axis.
    pub axial_tilt_degrees: f64,
    /// Texture-alignment rotation about the polar axis, in radians.
    pub texture_rotation_radians: f64,
    /// Local time of day in hours, `[0, 24)`.
    pub time_of_day_hours: f64,
    /// Direction towards the sun in world space. Need not be normalized.
    pub sun_direction: [f64; 3],
}

/// Surface marker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkerConfig {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Catalogued location name. Takes precedence over latitude/longitude
    /// when it names a known location.
    pub location_name: Option<String>,
}

/// Ring system configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    /// Inner edge of the rings in planet radii.
    pub inner_radius_factor: f64,
    /// Outer edge of the rings in planet radii.
    pub outer_radius_factor: f64,
    /// Uniform scale applied to both edges.
    pub scale: f64,
    /// Ring opacity (0.0 - 1.0).
    pub opacity: f64,
}

/// Surface-view camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceViewConfig {
    /// Camera height above the surface in scene units. May be negative.
    pub height_above_surface: f64,
    /// Vertical field of view in degrees, `[20, 120]`.
    pub field_of_view_degrees: f64,
    /// Heading offset in radians added to the hour angle.
    pub user_rotation: f64,
    /// Look elevation in degrees, `[10, 170]`. 90 looks straight up.
    pub user_tilt_degrees: f64,
}

/// Overview camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverviewCameraConfig {
    /// Distance from the planet center along +Z, in planet radii.
    pub distance_radii: f64,
    /// Vertical field of view in degrees.
    pub field_of_view_degrees: f64,
    /// Width / height of the overview viewport.
    pub aspect_ratio: f64,
}

/// Pointer gesture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Heading change per dragged pixel, in radians.
    pub rotate_sensitivity: f64,
    /// Tilt change per dragged pixel, in degrees.
    pub tilt_sensitivity: f64,
    /// Field-of-view change per scroll unit, in degrees.
    pub zoom_sensitivity: f64,
    /// Invert vertical drag.
    pub invert_y: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            axial_tilt_degrees: 23.5,
            texture_rotation_radians: std::f64::consts::PI,
            time_of_day_hours: 12.0,
            sun_direction: [1.0, 0.0, 0.0],
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            location_name: None,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            inner_radius_factor: 1.2,
            outer_radius_factor: 2.3,
            scale: 1.0,
            opacity: 0.8,
        }
    }
}

impl Default for SurfaceViewConfig {
    fn default() -> Self {
        Self {
            height_above_surface: 0.2,
            field_of_view_degrees: 75.0,
            user_rotation: 0.0,
            user_tilt_degrees: 70.0,
        }
    }
}

impl Default for OverviewCameraConfig {
    fn default() -> Self {
        Self {
            distance_radii: 4.0,
            field_of_view_degrees: 45.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            tilt_sensitivity: 0.2,
            zoom_sensitivity: 2.0,
            invert_y: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if it does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            let config = read_config(&path)?;
            log::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let config = Config::default();
        config.save(config_dir)?;
        log::info!("Created default config at {}", path.display());
        Ok(config)
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&path, serialized).map_err(write_err)
    }

    /// Re-read the file. `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(fresh))
    }
}

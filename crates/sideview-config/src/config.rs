//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration.
pub const CONFIG_FILE_NAME: &str = "sideview.ron";

/// Top-level add-on configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Secondary display selection.
    pub display: DisplayConfig,
    /// Orbit line drawing.
    pub orbits: OrbitConfig,
    /// Side-view camera behavior.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which display the side view renders to, and its mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Index of the target display (0 is the primary display).
    pub display_index: usize,
    /// Requested width in pixels, 0 for the display's native width.
    pub width: u32,
    /// Requested height in pixels, 0 for the display's native height.
    pub height: u32,
    /// Requested refresh rate in Hz.
    pub refresh_hz: u32,
}

/// Orbit line settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Draw orbit lines at all.
    pub draw_orbits: bool,
    /// Angular resolution of the orbit lines in degrees.
    pub angular_step_degrees: f64,
    /// Alpha applied to every orbit line color.
    pub line_alpha: f32,
}

/// Side-view camera settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial distance from the focus in scaled-space units.
    pub start_distance: f64,
    /// Radians of heading/pitch per unit of mouse movement.
    pub orbit_sensitivity: f64,
    /// Fraction of the distance covered per unit of scroll.
    pub zoom_sensitivity: f64,
    /// Lower bound on the zoom distance for any target.
    pub min_distance: f64,
    /// Upper bound on the zoom distance.
    pub max_distance: f64,
    /// Local-to-scaled space ratio.
    pub scaled_space_factor: f64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_index: 1,
            width: 0,
            height: 0,
            refresh_hz: 60,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            draw_orbits: true,
            angular_step_degrees: 2.0,
            line_alpha: 0.9,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_distance: 200.0,
            orbit_sensitivity: 0.5,
            zoom_sensitivity: 1.2,
            min_distance: 1.0,
            max_distance: 150_000.0,
            scaled_space_factor: 6000.0,
            fov_degrees: 60.0,
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

/// Platform config directory for the add-on (`<config>/sideview`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("sideview"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `sideview.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

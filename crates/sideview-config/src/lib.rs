//! Configuration for the SideView add-on.
//!
//! Settings persist to disk as `sideview.ron` next to the add-on, may be
//! overridden from the command line, and are saved back on shutdown.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, DisplayConfig, OrbitConfig,
    default_config_dir,
};
pub use error::ConfigError;

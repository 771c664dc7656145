//! Command-line argument parsing for the headless SideView runner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// SideView command-line arguments.
///
/// CLI values override settings loaded from `sideview.ron`.
#[derive(Parser, Debug)]
#[command(name = "sideview", about = "Secondary map view with orbit lines")]
pub struct CliArgs {
    /// Index of the display to render to.
    #[arg(long)]
    pub display: Option<usize>,

    /// Orbit line angular resolution in degrees.
    #[arg(long)]
    pub angular_step: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to run before exiting.
    #[arg(long, default_value_t = 3)]
    pub frames: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(index) = args.display {
            self.display.display_index = index;
        }
        if let Some(step) = args.angular_step {
            self.orbits.angular_step_degrees = step;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

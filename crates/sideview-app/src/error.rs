//! Add-on error types.

use sideview_config::ConfigError;
use sideview_orbit::OrbitError;

/// Errors surfaced by the add-on to its host.
#[derive(Debug, thiserror::Error)]
pub enum SideViewError {
    /// Loading or saving the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Orbit data broke a sampling precondition.
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}

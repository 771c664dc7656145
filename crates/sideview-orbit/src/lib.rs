//! Orbit line generation for the side-view map camera.
//!
//! Tessellates conic orbits into connected line segments that pass exactly
//! through the orbiting object, filters them by what the observer knows, and
//! emits them to an immediate-mode line surface once per frame.

pub mod conic;
pub mod draw;
pub mod error;
pub mod kepler;
pub mod sampler;
pub mod scaled_space;
pub mod visibility;

pub use conic::{ConicOrbit, CurveKind, FnConic, asymptote_bound};
pub use draw::{
    CameraMatrices, DEFAULT_LINE_ALPHA, LineDrawer, LineRecorder, OrbitColor, OrbitEntry, OrbitFrame,
    OrbitPass, RecordedLines,
};
pub use error::OrbitError;
pub use kepler::{KeplerOrbit, OrbitSnapshot};
pub use sampler::{DEFAULT_ANGULAR_STEP_DEGREES, MAX_POINT_COUNT, OrbitCurveSampler, OrbitPolyline};
pub use scaled_space::{DEFAULT_SCALE_FACTOR, RenderTransform, ScaledSpace};
pub use visibility::{DiscoveryLevels, OrbitDisplayMode, is_orbit_visible};

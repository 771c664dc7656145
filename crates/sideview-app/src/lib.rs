//! The SideView add-on: a second map camera on another display, with its own
//! orbit lines.
//!
//! The host owns the render loop and calls into [`SideView`] from its camera
//! hooks. [`demo`] provides a small Keplerian system for headless runs.

pub mod addon;
pub mod demo;
pub mod error;

pub use addon::{AmbientColor, CameraId, GameScene, SideView, camera_matrices};
pub use error::SideViewError;

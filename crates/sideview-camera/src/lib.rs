//! The side-view map camera: target selection, zoom, and orientation around
//! the focused object, plus the view and projection matrices it renders with.

pub mod camera;
pub mod controller;

pub use camera::{Camera, Projection};
pub use controller::{
    CameraSettings, ControlLock, FrameInput, MapTarget, MapTargetKind, SideViewCamera, TargetList,
};

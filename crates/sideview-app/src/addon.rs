//! Host-facing add-on object.
//!
//! The host calls these methods from its own lifecycle:
//!
//! | host event                     | method                               |
//! |--------------------------------|--------------------------------------|
//! | user activates the side view   | [`SideView::init`]                   |
//! | scene finished loading         | [`SideView::on_level_loaded`]        |
//! | late update                    | [`SideView::late_update`]            |
//! | camera pre-cull / pre-render   | [`SideView::on_pre_cull`], [`SideView::on_pre_render`] |
//! | camera post-render             | [`SideView::on_post_render`]         |
//! | add-on destroyed               | [`SideView::shutdown`]               |
//!
//! Camera hooks fire for every camera in the scene; only the side-view
//! camera is acted on.

use std::path::Path;

use sideview_camera::{
    Camera, CameraSettings, ControlLock, FrameInput, SideViewCamera, TargetList,
};
use sideview_config::{Config, ConfigError};
use sideview_orbit::{CameraMatrices, LineDrawer, OrbitCurveSampler, OrbitError, OrbitFrame, OrbitPass};
use tracing::{debug, info, warn};

use crate::error::SideViewError;

/// Host identifier of a camera.
pub type CameraId = u32;

/// RGBA ambient light color.
pub type AmbientColor = [f32; 4];

/// Host scenes the add-on distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    /// Title screen.
    MainMenu,
    /// Space center overview.
    SpaceCenter,
    /// Vessel editor.
    Editor,
    /// In flight; the only scene with a side view.
    Flight,
    /// Tracking station.
    TrackingStation,
}

/// The side-view add-on.
pub struct SideView {
    config: Config,
    pass: OrbitPass,
    controller: SideViewCamera,
    active: bool,
    camera: Option<CameraId>,
    saved_ambient: Option<AmbientColor>,
}

impl SideView {
    /// Build the add-on from its configuration.
    ///
    /// Fails when the configured angular step cannot tessellate an orbit.
    pub fn new(config: Config) -> Result<Self, SideViewError> {
        let sampler = OrbitCurveSampler::new(config.orbits.angular_step_degrees)?;
        let pass = OrbitPass::new(sampler, config.orbits.line_alpha);
        let controller = SideViewCamera::new(camera_settings(&config));
        Ok(Self {
            config,
            pass,
            controller,
            active: false,
            camera: None,
            saved_ambient: None,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The orbit pass used at post-render.
    pub fn orbit_pass(&self) -> &OrbitPass {
        &self.pass
    }

    /// The camera controller.
    pub fn controller(&self) -> &SideViewCamera {
        &self.controller
    }

    /// Whether a secondary display was claimed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The side-view camera, once a flight scene attached one.
    pub fn camera_id(&self) -> Option<CameraId> {
        self.camera
    }

    /// Claim the configured secondary display.
    ///
    /// Does nothing with a single display or an out-of-range index. Returns
    /// whether the add-on is active afterwards.
    pub fn init(&mut self, display_count: usize) -> bool {
        if self.active {
            return true;
        }
        if display_count <= 1 {
            debug!("single display, side view stays off");
            return false;
        }
        let display_config = &self.config.display;
        if display_config.display_index >= display_count {
            warn!(
                display = display_config.display_index,
                available = display_count,
                "requested display does not exist"
            );
            return false;
        }
        info!(
            display = display_config.display_index,
            width = display_config.width,
            height = display_config.height,
            refresh_hz = display_config.refresh_hz,
            "activating side view display"
        );
        self.active = true;
        true
    }

    /// Attach the side-view camera after a scene load.
    ///
    /// Only flight scenes get a camera. The previous target is forgotten so
    /// the view refocuses on the active vessel.
    pub fn on_level_loaded(&mut self, scene: GameScene, camera: CameraId) -> bool {
        if !self.active || scene != GameScene::Flight {
            self.camera = None;
            return false;
        }
        self.camera = Some(camera);
        self.controller.clear_target();
        debug!(camera, "side view camera attached");
        true
    }

    /// Per-frame camera control. Returns a lock change for the host's input
    /// manager when map mode was toggled.
    pub fn late_update(
        &mut self,
        input: &FrameInput,
        targets: &TargetList<'_>,
        frame_rotation_degrees: f64,
    ) -> Option<ControlLock> {
        self.camera?;
        self.controller
            .late_update(input, targets, frame_rotation_degrees)
    }

    /// Render camera for this frame, or `None` without a focus.
    pub fn render_camera(&self, targets: &TargetList<'_>, aspect_ratio: f32) -> Option<Camera> {
        self.camera?;
        self.controller.camera(
            targets,
            self.config.camera.fov_degrees.to_radians(),
            aspect_ratio,
        )
    }

    fn is_side_camera(&self, camera: CameraId) -> bool {
        self.camera == Some(camera)
    }

    /// Re-enable scaled-space renderers the stock camera culled.
    ///
    /// Returns how many were switched back on.
    pub fn on_pre_cull<'a, I>(&self, camera: CameraId, renderers: I) -> usize
    where
        I: IntoIterator<Item = &'a mut bool>,
    {
        if !self.is_side_camera(camera) {
            return 0;
        }
        let mut enabled = 0;
        for renderer in renderers {
            if !*renderer {
                *renderer = true;
                enabled += 1;
            }
        }
        enabled
    }

    /// Swap in the vacuum ambient light for the side-view render.
    pub fn on_pre_render(&mut self, camera: CameraId, ambient: &mut AmbientColor, vacuum: AmbientColor) {
        if !self.is_side_camera(camera) {
            return;
        }
        self.saved_ambient = Some(*ambient);
        *ambient = vacuum;
    }

    /// Restore the ambient light and draw the orbit lines.
    ///
    /// Returns the number of orbits drawn; other cameras draw nothing.
    pub fn on_post_render<D>(
        &mut self,
        camera: CameraId,
        ambient: &mut AmbientColor,
        frame: &OrbitFrame<'_>,
        drawer: &mut D,
    ) -> Result<usize, OrbitError>
    where
        D: LineDrawer + ?Sized,
    {
        if !self.is_side_camera(camera) {
            return Ok(0);
        }
        if let Some(saved) = self.saved_ambient.take() {
            *ambient = saved;
        }
        if !self.config.orbits.draw_orbits {
            return Ok(0);
        }
        self.pass.draw_all_orbits(frame, drawer)
    }

    /// Persist the configuration.
    pub fn shutdown(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.config.save(config_dir)?;
        info!(dir = %config_dir.display(), "side view config saved");
        Ok(())
    }
}

/// Matrices the orbit pass loads for `camera`.
pub fn camera_matrices(camera: &Camera) -> CameraMatrices {
    CameraMatrices {
        projection: camera.projection_matrix(),
        view: camera.view_matrix(),
    }
}

fn camera_settings(config: &Config) -> CameraSettings {
    let camera = &config.camera;
    CameraSettings {
        start_distance: camera.start_distance,
        orbit_sensitivity: camera.orbit_sensitivity,
        zoom_sensitivity: camera.zoom_sensitivity,
        min_distance: camera.min_distance,
        max_distance: camera.max_distance,
        scaled_space_factor: camera.scaled_space_factor,
    }
}

//! Side-view camera controller: target cycling, zoom, and mouse look.
//!
//! The camera hangs off a focus point that follows the selected map target.
//! The focus is yawed by the user's heading plus the planetarium's frame
//! rotation, then pitched; the camera sits `distance` behind it along the
//! focus' local +Z and looks back at the target.
//!
//! Input only acts while the side view is in map mode. Distance and pitch
//! limits are enforced every frame.

use std::f64::consts::FRAC_PI_2;

use glam::{DQuat, DVec2, DVec3, Quat};
use tracing::{debug, info};

use crate::camera::{Camera, Projection};

/// Tunables for [`SideViewCamera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Distance used before the first zoom.
    pub start_distance: f64,
    /// Radians of heading/pitch per unit of mouse movement.
    pub orbit_sensitivity: f64,
    /// Fraction of the distance covered per unit of scroll.
    pub zoom_sensitivity: f64,
    /// Floor on the per-target minimum distance.
    pub min_distance: f64,
    /// Maximum distance.
    pub max_distance: f64,
    /// Local-to-scaled space ratio.
    pub scaled_space_factor: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            start_distance: 200.0,
            orbit_sensitivity: 0.5,
            zoom_sensitivity: 1.2,
            min_distance: 1.0,
            max_distance: 150_000.0,
            scaled_space_factor: 6000.0,
        }
    }
}

/// What a map target is, for zoom limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapTargetKind {
    /// A vessel, limited by its orbit size.
    Vessel {
        /// Semi-major axis in local units.
        semi_major_axis: f64,
    },
    /// A celestial body, limited by its sphere of influence.
    Body {
        /// Sphere-of-influence radius in local units.
        sphere_of_influence: f64,
    },
}

/// A selectable object in the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTarget {
    /// Display name.
    pub name: String,
    /// Position in scaled space.
    pub position: DVec3,
    /// Vessel or body.
    pub kind: MapTargetKind,
}

/// Targets the camera can cycle through this frame.
#[derive(Debug, Clone, Copy)]
pub struct TargetList<'a> {
    /// All selectable targets, in cycling order.
    pub targets: &'a [MapTarget],
    /// Index of the active vessel, if it is a target.
    pub active_vessel: Option<usize>,
    /// Index of the home body, used when there is no active vessel.
    pub home_body: Option<usize>,
}

impl TargetList<'_> {
    fn default_index(&self) -> Option<usize> {
        self.active_vessel
            .or(self.home_body)
            .filter(|&index| index < self.targets.len())
    }
}

/// Input sampled by the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Map-mode toggle key went down.
    pub toggle_map: bool,
    /// Camera-reset key went down.
    pub reset_target: bool,
    /// Next-target key went down.
    pub next_target: bool,
    /// Previous-target key went down.
    pub previous_target: bool,
    /// Scroll wheel axis this frame.
    pub scroll: f64,
    /// Mouse-look button held.
    pub mouse_look: bool,
    /// Mouse movement this frame.
    pub mouse_delta: DVec2,
}

/// Request to the host's input-lock manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLock {
    /// Stop the stock camera from reacting to input.
    Acquire,
    /// Give camera input back.
    Release,
}

/// State of the side-view camera across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SideViewCamera {
    settings: CameraSettings,
    in_map: bool,
    target_index: Option<usize>,
    distance: f64,
    min_distance: f64,
    heading: f64,
    pitch: f64,
    frame_rotation_degrees: f64,
}

impl SideViewCamera {
    /// A camera with no target, outside map mode.
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            settings,
            in_map: false,
            target_index: None,
            distance: settings.start_distance,
            min_distance: settings.min_distance,
            heading: 0.0,
            pitch: 0.0,
            frame_rotation_degrees: 0.0,
        }
    }

    /// Whether input currently drives this camera.
    pub fn in_map(&self) -> bool {
        self.in_map
    }

    /// Index of the focused target.
    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    /// Current distance from the focus.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Minimum distance for the current target.
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Heading in radians.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Pitch in radians, within `[-π/2, π/2]`.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Forget the current target, e.g. after a scene change.
    pub fn clear_target(&mut self) {
        self.target_index = None;
    }

    /// Advance one frame.
    ///
    /// `frame_rotation_degrees` is the planetarium's inverse rotation angle,
    /// added to the heading so the view does not spin with the reference
    /// frame. Returns a lock change when map mode was toggled.
    pub fn late_update(
        &mut self,
        input: &FrameInput,
        targets: &TargetList<'_>,
        frame_rotation_degrees: f64,
    ) -> Option<ControlLock> {
        let mut lock = None;
        if input.toggle_map {
            self.in_map = !self.in_map;
            lock = Some(if self.in_map {
                ControlLock::Acquire
            } else {
                ControlLock::Release
            });
            debug!(in_map = self.in_map, "side view map mode toggled");
        }

        let previous = self.target_index;
        let count = targets.targets.len();

        if self.in_map && input.reset_target {
            self.target_index = targets.default_index();
        }
        if self.in_map && count > 0 {
            if input.next_target {
                self.target_index = self.target_index.map(|i| (i + 1) % count);
            }
            if input.previous_target {
                self.target_index = self.target_index.map(|i| (i + count - 1) % count);
            }
        }
        if self.target_index.is_none_or(|i| i >= count) {
            self.target_index = targets.default_index();
        }

        if previous != self.target_index
            && let Some(index) = self.target_index
        {
            self.retarget(&targets.targets[index]);
        }

        if self.in_map && input.scroll != 0.0 {
            self.distance *= 1.0 - input.scroll * self.settings.zoom_sensitivity;
        }
        self.distance = self
            .distance
            .clamp(self.min_distance, self.settings.max_distance.max(self.min_distance));

        if self.in_map && input.mouse_look {
            self.heading += input.mouse_delta.x * self.settings.orbit_sensitivity;
            self.pitch -= input.mouse_delta.y * self.settings.orbit_sensitivity;
        }
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
        self.frame_rotation_degrees = frame_rotation_degrees;

        lock
    }

    fn retarget(&mut self, target: &MapTarget) {
        let inverse_scale = 1.0 / self.settings.scaled_space_factor;
        let target_min = match target.kind {
            MapTargetKind::Vessel { semi_major_axis } => 0.5 * semi_major_axis * inverse_scale,
            MapTargetKind::Body {
                sphere_of_influence,
            } => 1.5 * sphere_of_influence * inverse_scale,
        };
        self.min_distance = target_min.max(self.settings.min_distance);
        info!(target = %target.name, min_distance = self.min_distance, "side view focus changed");
    }

    /// Orientation of the focus point: heading about +Y, then pitch about +X.
    pub fn focus_rotation(&self) -> DQuat {
        let heading = DQuat::from_rotation_y(self.heading + self.frame_rotation_degrees.to_radians());
        let pitch = DQuat::from_rotation_x(self.pitch);
        heading * pitch
    }

    /// Camera position in scaled space for a focus at `focus`.
    pub fn eye_position(&self, focus: DVec3) -> DVec3 {
        focus + self.focus_rotation() * (DVec3::Z * self.distance)
    }

    /// Build the render camera for the focused target.
    ///
    /// Returns `None` when no target is selected.
    pub fn camera(&self, targets: &TargetList<'_>, fov_y: f32, aspect_ratio: f32) -> Option<Camera> {
        let target = targets.targets.get(self.target_index?)?;
        let rotation = self.focus_rotation();
        Some(Camera {
            position: self.eye_position(target.position).as_vec3(),
            rotation: Quat::from_xyzw(
                rotation.x as f32,
                rotation.y as f32,
                rotation.z as f32,
                rotation.w as f32,
            )
            .normalize(),
            projection: Projection {
                fov_y,
                aspect_ratio,
            },
            ..Camera::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<MapTarget> {
        vec![
            MapTarget {
                name: "Kerbin".to_string(),
                position: DVec3::ZERO,
                kind: MapTargetKind::Body {
                    sphere_of_influence: 84_159_286.0,
                },
            },
            MapTarget {
                name: "Mun".to_string(),
                position: DVec3::new(2000.0, 0.0, 0.0),
                kind: MapTargetKind::Body {
                    sphere_of_influence: 2_429_559.0,
                },
            },
            MapTarget {
                name: "Probe".to_string(),
                position: DVec3::new(120.0, 0.0, 0.0),
                kind: MapTargetKind::Vessel {
                    semi_major_axis: 720_000.0,
                },
            },
        ]
    }

    fn list(targets: &[MapTarget]) -> TargetList<'_> {
        TargetList {
            targets,
            active_vessel: Some(2),
            home_body: Some(0),
        }
    }

    fn press(f: impl FnOnce(&mut FrameInput)) -> FrameInput {
        let mut input = FrameInput::default();
        f(&mut input);
        input
    }

    fn in_map_camera(targets: &TargetList<'_>) -> SideViewCamera {
        let mut camera = SideViewCamera::new(CameraSettings::default());
        camera.late_update(&press(|i| i.toggle_map = true), targets, 0.0);
        camera
    }

    #[test]
    fn test_first_frame_focuses_active_vessel() {
        let all = targets();
        let mut camera = SideViewCamera::new(CameraSettings::default());
        camera.late_update(&FrameInput::default(), &list(&all), 0.0);
        assert_eq!(camera.target_index(), Some(2));
        assert!((camera.min_distance() - 60.0).abs() < 1e-9);
        assert_eq!(camera.distance(), 200.0);
    }

    #[test]
    fn test_home_body_without_active_vessel() {
        let all = targets();
        let mut targets = list(&all);
        targets.active_vessel = None;
        let mut camera = SideViewCamera::new(CameraSettings::default());
        camera.late_update(&FrameInput::default(), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(0));
        // 1.5 * SOI / 6000 is far beyond the start distance.
        assert!((camera.distance() - camera.min_distance()).abs() < 1e-9);
        assert!((camera.min_distance() - 21_039.8215).abs() < 1e-3);
    }

    #[test]
    fn test_toggle_emits_control_locks() {
        let all = targets();
        let targets = list(&all);
        let mut camera = SideViewCamera::new(CameraSettings::default());
        let toggle = press(|i| i.toggle_map = true);

        assert_eq!(camera.late_update(&toggle, &targets, 0.0), Some(ControlLock::Acquire));
        assert!(camera.in_map());
        assert_eq!(camera.late_update(&FrameInput::default(), &targets, 0.0), None);
        assert_eq!(camera.late_update(&toggle, &targets, 0.0), Some(ControlLock::Release));
        assert!(!camera.in_map());
    }

    #[test]
    fn test_target_cycling_wraps_both_ways() {
        let all = targets();
        let targets = list(&all);
        let mut camera = in_map_camera(&targets);
        assert_eq!(camera.target_index(), Some(2));

        camera.late_update(&press(|i| i.next_target = true), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(0));
        camera.late_update(&press(|i| i.previous_target = true), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(2));
        camera.late_update(&press(|i| i.previous_target = true), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(1));
    }

    #[test]
    fn test_input_ignored_outside_map_mode() {
        let all = targets();
        let targets = list(&all);
        let mut camera = SideViewCamera::new(CameraSettings::default());
        let input = FrameInput {
            next_target: true,
            scroll: 0.5,
            mouse_look: true,
            mouse_delta: DVec2::new(1.0, 1.0),
            ..FrameInput::default()
        };
        camera.late_update(&input, &targets, 0.0);
        assert_eq!(camera.target_index(), Some(2));
        assert_eq!(camera.distance(), 200.0);
        assert_eq!(camera.heading(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn test_reset_returns_to_active_vessel() {
        let all = targets();
        let targets = list(&all);
        let mut camera = in_map_camera(&targets);
        camera.late_update(&press(|i| i.next_target = true), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(0));
        camera.late_update(&press(|i| i.reset_target = true), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(2));
    }

    #[test]
    fn test_shrinking_target_list_resets_selection() {
        let all = targets();
        let targets = list(&all);
        let mut camera = in_map_camera(&targets);
        camera.late_update(&press(|i| i.previous_target = true), &targets, 0.0);
        assert_eq!(camera.target_index(), Some(1));

        let fewer = TargetList {
            targets: &all[..1],
            active_vessel: None,
            home_body: Some(0),
        };
        camera.late_update(&FrameInput::default(), &fewer, 0.0);
        assert_eq!(camera.target_index(), Some(0));
        assert!((camera.min_distance() - 21_039.8215).abs() < 1e-3);
    }

    #[test]
    fn test_no_targets_leaves_camera_unfocused() {
        let empty = TargetList {
            targets: &[],
            active_vessel: Some(0),
            home_body: Some(0),
        };
        let mut camera = SideViewCamera::new(CameraSettings::default());
        camera.late_update(&press(|i| i.next_target = true), &empty, 0.0);
        assert_eq!(camera.target_index(), None);
        assert!(camera.camera(&empty, 1.0, 1.0).is_none());
    }

    #[test]
    fn test_zoom_scales_and_clamps() {
        let all = targets();
        let targets = list(&all);
        let mut camera = in_map_camera(&targets);

        camera.late_update(&press(|i| i.scroll = 0.25), &targets, 0.0);
        assert!((camera.distance() - 200.0 * (1.0 - 0.3)).abs() < 1e-9);

        for _ in 0..20 {
            camera.late_update(&press(|i| i.scroll = 0.5), &targets, 0.0);
        }
        assert_eq!(camera.distance(), camera.min_distance());

        for _ in 0..200 {
            camera.late_update(&press(|i| i.scroll = -1.0), &targets, 0.0);
        }
        assert_eq!(camera.distance(), 150_000.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let all = targets();
        let targets = list(&all);
        let mut camera = in_map_camera(&targets);
        let look = FrameInput {
            mouse_look: true,
            mouse_delta: DVec2::new(0.2, -10.0),
            ..FrameInput::default()
        };
        camera.late_update(&look, &targets, 0.0);
        assert!((camera.heading() - 0.1).abs() < 1e-12);
        assert_eq!(camera.pitch(), FRAC_PI_2);
    }

    #[test]
    fn test_eye_sits_behind_focus() {
        let all = targets();
        let targets = list(&all);
        let mut camera = SideViewCamera::new(CameraSettings::default());
        camera.late_update(&FrameInput::default(), &targets, 0.0);

        let focus = all[2].position;
        let eye = camera.eye_position(focus);
        assert!((eye - (focus + DVec3::new(0.0, 0.0, 200.0))).length() < 1e-9);

        let render = camera.camera(&targets, 1.0, 1.5).unwrap();
        let to_target = (focus.as_vec3() - render.position).normalize();
        assert!((render.forward() - to_target).length() < 1e-5);
    }

    #[test]
    fn test_frame_rotation_adds_to_heading() {
        let all = targets();
        let targets = list(&all);
        let mut camera = SideViewCamera::new(CameraSettings::default());
        camera.late_update(&FrameInput::default(), &targets, 90.0);

        let eye = camera.eye_position(DVec3::ZERO);
        assert!((eye - DVec3::new(200.0, 0.0, 0.0)).length() < 1e-9);
    }
}

//! End-to-end frames through the add-on hooks with the demo system.

use glam::DVec3;
use sideview_app::demo::{DemoSystem, KERBIN_MU};
use sideview_app::{CameraId, GameScene, SideView, camera_matrices};
use sideview_camera::FrameInput;
use sideview_config::Config;
use sideview_orbit::{
    CameraMatrices, ConicOrbit, DiscoveryLevels, KeplerOrbit, LineRecorder, OrbitDisplayMode,
    OrbitEntry, OrbitError, OrbitFrame, ScaledSpace,
};

const SIDE: CameraId = 3;
const STOCK: CameraId = 0;

fn attached_addon(config: Config) -> SideView {
    let mut addon = SideView::new(config).unwrap();
    assert!(addon.init(2));
    assert!(addon.on_level_loaded(GameScene::Flight, SIDE));
    addon
}

fn render(
    addon: &mut SideView,
    system: &DemoSystem,
    time: f64,
    mode: OrbitDisplayMode,
    camera: CameraId,
) -> (usize, LineRecorder) {
    let space = ScaledSpace::new(addon.config().camera.scaled_space_factor);
    let frame = system.frame_at(time, &space);
    let targets = frame.target_list();
    addon.late_update(&FrameInput::default(), &targets, 0.0);
    let view = addon.render_camera(&targets, 1.5).unwrap();

    let entries = frame.entries();
    let orbit_frame = OrbitFrame {
        orbits: &entries,
        display_mode: mode,
        camera: camera_matrices(&view),
        transform: &space,
    };
    let mut ambient = [0.2; 4];
    let mut recorder = LineRecorder::new();
    addon.on_pre_render(camera, &mut ambient, [0.0; 4]);
    let drawn = addon
        .on_post_render(camera, &mut ambient, &orbit_frame, &mut recorder)
        .unwrap();
    assert_eq!(ambient, [0.2; 4]);
    (drawn, recorder)
}

#[test]
fn test_known_orbits_are_drawn() {
    let system = DemoSystem::new().unwrap();
    let mut addon = attached_addon(Config::default());
    let (drawn, recorder) = render(&mut addon, &system, 0.0, OrbitDisplayMode::AllOrbits, SIDE);

    // Mun, Kerbal X, Escape Stage, Mun Lander; the unknown object and the
    // debris are filtered out.
    assert_eq!(drawn, 4);
    assert_eq!(recorder.primitives.len(), 4);
    assert_eq!(recorder.protocol_errors, 0);
    assert_eq!(recorder.matrix_depth, 0);
    assert_eq!(recorder.matrix_loads, 1);

    // Closed orbits carry one segment per sample point.
    for closed in [0, 1, 3] {
        assert_eq!(recorder.primitives[closed].segment_count(), 180);
    }
    // The escape trajectory is open and stops short of its asymptotes.
    let open = &recorder.primitives[2];
    assert!(open.segment_count() > 0 && open.segment_count() < 180);
    assert!(recorder.primitives.iter().all(|p| p.color[3] == 0.9));
}

#[test]
fn test_lines_pass_through_the_vessel() {
    let system = DemoSystem::new().unwrap();
    let mut addon = attached_addon(Config::default());
    let (_, recorder) = render(&mut addon, &system, 600.0, OrbitDisplayMode::AllOrbits, SIDE);

    let space = ScaledSpace::default();
    let frame = system.frame_at(600.0, &space);
    let vessel = &frame.snapshots[1];
    let seam = space.local_to_scaled(vessel.position_at(vessel.eccentric_anomaly()));

    let lines = &recorder.primitives[1];
    assert_eq!(lines.vertices[0], seam);
    assert_eq!(*lines.vertices.last().unwrap(), seam);
}

#[test]
fn test_display_mode_none_draws_nothing() {
    let system = DemoSystem::new().unwrap();
    let mut addon = attached_addon(Config::default());
    let (drawn, recorder) = render(&mut addon, &system, 0.0, OrbitDisplayMode::None, SIDE);
    assert_eq!(drawn, 0);
    assert!(recorder.primitives.is_empty());
    assert_eq!(recorder.matrix_loads, 0);
}

#[test]
fn test_other_cameras_draw_nothing() {
    let system = DemoSystem::new().unwrap();
    let mut addon = attached_addon(Config::default());
    let (drawn, recorder) = render(&mut addon, &system, 0.0, OrbitDisplayMode::AllOrbits, STOCK);
    assert_eq!(drawn, 0);
    assert!(recorder.primitives.is_empty());
}

#[test]
fn test_finer_step_doubles_segments() {
    let system = DemoSystem::new().unwrap();
    let mut config = Config::default();
    config.orbits.angular_step_degrees = 1.0;
    let mut addon = attached_addon(config);
    let (_, recorder) = render(&mut addon, &system, 0.0, OrbitDisplayMode::AllOrbits, SIDE);
    assert_eq!(recorder.primitives[0].segment_count(), 360);
}

#[test]
fn test_orbit_drawing_can_be_disabled() {
    let system = DemoSystem::new().unwrap();
    let mut config = Config::default();
    config.orbits.draw_orbits = false;
    let mut addon = attached_addon(config);
    let (drawn, recorder) = render(&mut addon, &system, 0.0, OrbitDisplayMode::PatchedConics, SIDE);
    assert_eq!(drawn, 0);
    assert!(recorder.primitives.is_empty());
}

#[test]
fn test_frames_do_not_share_geometry() {
    let system = DemoSystem::new().unwrap();
    let mut addon = attached_addon(Config::default());
    let (_, first) = render(&mut addon, &system, 0.0, OrbitDisplayMode::AllOrbits, SIDE);
    let (_, second) = render(&mut addon, &system, 900.0, OrbitDisplayMode::AllOrbits, SIDE);

    assert_eq!(first.primitives.len(), second.primitives.len());
    assert_ne!(first.primitives[1].vertices[0], second.primitives[1].vertices[0]);
}

#[test]
fn test_escape_stage_drawn_until_it_leaves_kerbin() {
    let system = DemoSystem::new().unwrap();
    let mut addon = attached_addon(Config::default());
    let (drawn, recorder) = render(&mut addon, &system, 1.0e5, OrbitDisplayMode::AllOrbits, SIDE);
    assert_eq!(drawn, 4);
    assert_eq!(recorder.protocol_errors, 0);

    let (drawn, _) = render(&mut addon, &system, 1.0e6, OrbitDisplayMode::AllOrbits, SIDE);
    assert_eq!(drawn, 3);
}

#[test]
fn test_seam_past_asymptote_aborts_the_pass() {
    let mut addon = attached_addon(Config::default());
    let parking = KeplerOrbit::circular(700_000.0, KERBIN_MU).at_time(0.0).around(DVec3::ZERO);
    let flyby = KeplerOrbit {
        semi_major_axis: -15_000_000.0,
        eccentricity: 1.2,
        ..KeplerOrbit::circular(15_000_000.0, KERBIN_MU)
    }
    .at_time(1.0e6)
    .around(DVec3::ZERO);
    let entries = [
        OrbitEntry {
            conic: &parking,
            discovery: Some(DiscoveryLevels::OWNED),
            color: [1.0; 4],
        },
        OrbitEntry {
            conic: &flyby,
            discovery: Some(DiscoveryLevels::OWNED),
            color: [1.0; 4],
        },
    ];
    let space = ScaledSpace::default();
    let frame = OrbitFrame {
        orbits: &entries,
        display_mode: OrbitDisplayMode::AllOrbits,
        camera: CameraMatrices::default(),
        transform: &space,
    };

    let scene_ambient = [0.2; 4];
    let mut ambient = scene_ambient;
    let mut recorder = LineRecorder::new();
    addon.on_pre_render(SIDE, &mut ambient, [0.0; 4]);
    let result = addon.on_post_render(SIDE, &mut ambient, &frame, &mut recorder);

    assert!(matches!(result, Err(OrbitError::SeamOutsideDomain { .. })));
    assert_eq!(ambient, scene_ambient);
    // Orbits before the failing one are already out; nothing is left open.
    assert_eq!(recorder.primitives.len(), 1);
    assert!(!recorder.is_open());
    assert_eq!(recorder.matrix_depth, 0);
    assert_eq!(recorder.protocol_errors, 0);
}

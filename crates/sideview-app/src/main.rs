//! Headless SideView runner.
//!
//! Loads the config, activates the add-on against a pretend two-display
//! setup, and renders a few frames of the demo system into a line recorder.

use clap::Parser;
use glam::DVec2;
use sideview_app::demo::DemoSystem;
use sideview_app::{AmbientColor, CameraId, GameScene, SideView, SideViewError, camera_matrices};
use sideview_camera::FrameInput;
use sideview_config::{CliArgs, Config, default_config_dir};
use sideview_orbit::{LineRecorder, OrbitDisplayMode, OrbitFrame, ScaledSpace};
use tracing::{info, warn};

const SIDE_CAMERA: CameraId = 1;
const DISPLAY_COUNT: usize = 2;
const SECONDS_PER_FRAME: f64 = 30.0;
const SCENE_AMBIENT: AmbientColor = [0.25, 0.25, 0.25, 1.0];
const VACUUM_AMBIENT: AmbientColor = [0.04, 0.04, 0.05, 1.0];

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("sideview: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), SideViewError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    sideview_log::init_logging(
        Some(config_dir.join("logs").as_path()),
        cfg!(debug_assertions),
        Some(&config),
    );

    let aspect_ratio = match (config.display.width, config.display.height) {
        (w, h) if w > 0 && h > 0 => w as f32 / h as f32,
        _ => 16.0 / 9.0,
    };
    let space = ScaledSpace::new(config.camera.scaled_space_factor);

    let mut addon = SideView::new(config)?;
    if !addon.init(DISPLAY_COUNT) {
        warn!("side view could not claim a display");
        return Ok(());
    }
    addon.on_level_loaded(GameScene::Flight, SIDE_CAMERA);

    let system = DemoSystem::new()?;
    let mut recorder = LineRecorder::new();
    let mut ambient = SCENE_AMBIENT;
    let mut scaled_renderers = [true, false, true, false];

    for index in 0..args.frames {
        let frame = system.frame_at(f64::from(index) * SECONDS_PER_FRAME, &space);
        let targets = frame.target_list();

        if let Some(lock) = addon.late_update(&scripted_input(index), &targets, 0.0) {
            info!(?lock, "input lock change");
        }
        let Some(camera) = addon.render_camera(&targets, aspect_ratio) else {
            warn!(frame = index, "no focus target");
            continue;
        };

        let entries = frame.entries();
        let orbit_frame = OrbitFrame {
            orbits: &entries,
            display_mode: OrbitDisplayMode::for_tracking_station_tier(2),
            camera: camera_matrices(&camera),
            transform: &space,
        };

        addon.on_pre_cull(SIDE_CAMERA, scaled_renderers.iter_mut());
        addon.on_pre_render(SIDE_CAMERA, &mut ambient, VACUUM_AMBIENT);
        recorder.clear();
        let drawn = addon.on_post_render(SIDE_CAMERA, &mut ambient, &orbit_frame, &mut recorder)?;

        let focus = addon
            .controller()
            .target_index()
            .and_then(|i| frame.targets.get(i))
            .map_or("none", |t| t.name.as_str());
        info!(
            frame = index,
            focus,
            distance = addon.controller().distance(),
            eye_radius_m = space.scaled_to_local(camera.position).length(),
            orbits = drawn,
            segments = recorder.segment_count(),
            "frame rendered"
        );
    }

    addon.shutdown(&config_dir)?;
    Ok(())
}

/// A short input script: enter map mode, look around, zoom, switch target.
fn scripted_input(frame: u32) -> FrameInput {
    match frame {
        0 => FrameInput {
            toggle_map: true,
            ..FrameInput::default()
        },
        1 => FrameInput {
            mouse_look: true,
            mouse_delta: DVec2::new(0.3, -0.2),
            ..FrameInput::default()
        },
        2 => FrameInput {
            scroll: -0.5,
            ..FrameInput::default()
        },
        3 => FrameInput {
            next_target: true,
            ..FrameInput::default()
        },
        _ => FrameInput::default(),
    }
}

//! Headless demo: the walker scene and a scripted input reel.
//!
//! Builds the classic demo floor (a 100 x 100 slab with a few scattered
//! crates), then drives the controller through a fixed script: walk into
//! the crate field, hop, grab the pointer, and wheel the camera from
//! third person down to first person and back out.

use crate::collision::{Aabb, StaticIndex};
use crate::controller::controller::LocomotionCfg;
use crate::controller::systems::camera::{CameraRigCfg, Zoom};
use crate::controller::systems::controller::{ControllerLoop, DEFAULT_STEP_SECONDS};
use crate::data::configs::controller::{load_default, ControllerToml};
use anyhow::Result;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Scattered-crate scene matching the demo floor: slab top at y = 0 and
/// five unit crates inside the spawn field.
#[must_use]
pub fn build_scene(seed: u64) -> StaticIndex {
    let mut idx = StaticIndex::default();
    idx.push_box(Aabb::new(
        Vec3::new(-50.0, -1.0, -50.0),
        Vec3::new(50.0, 0.0, 50.0),
    ));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..5 {
        let x = rng.gen_range(-5.0..5.0);
        let z = rng.gen_range(-5.0..5.0);
        idx.push_box(Aabb::from_center_size(
            Vec3::new(x, 0.5, z),
            Vec3::splat(1.0),
        ));
    }
    idx
}

/// Build a controller from loaded tuning, falling back per-field to the
/// built-in defaults.
#[must_use]
pub fn build_controller(cfg: &ControllerToml) -> ControllerLoop {
    let ld = LocomotionCfg::default();
    let loco = LocomotionCfg {
        move_speed: cfg.locomotion.move_speed.unwrap_or(ld.move_speed),
        gravity: cfg.locomotion.gravity.unwrap_or(ld.gravity),
        jump_impulse: cfg.locomotion.jump_impulse.unwrap_or(ld.jump_impulse),
        facing_lerp: cfg.locomotion.facing_lerp.unwrap_or(ld.facing_lerp),
        ground_epsilon: cfg.locomotion.ground_epsilon.unwrap_or(ld.ground_epsilon),
    };
    let rd = CameraRigCfg::default();
    let rig = CameraRigCfg {
        eye_height_frac: cfg.camera.eye_height_frac.unwrap_or(rd.eye_height_frac),
        first_person_threshold: cfg
            .camera
            .first_person_threshold
            .unwrap_or(rd.first_person_threshold),
        probe_backoff: cfg.camera.probe_backoff.unwrap_or(rd.probe_backoff),
        follow_lerp: cfg.camera.follow_lerp.unwrap_or(rd.follow_lerp),
    };
    let height = cfg.locomotion.body_height.unwrap_or(2.5);
    let radius = cfg.locomotion.body_radius.unwrap_or(0.5);
    let shape = crate::controller::world::BodyShape::new(height * 0.5, radius);
    let zoom = Zoom::new(
        cfg.camera.start_distance.unwrap_or(5.0),
        cfg.camera.max_zoom.unwrap_or(15.0),
        cfg.camera.wheel_scale.unwrap_or(0.01),
    );
    ControllerLoop::new(Vec3::new(0.0, height * 0.5, 0.0), shape, loco, rig, zoom)
}

/// Run the scripted walk for roughly `seconds` of simulated time.
pub fn run(seconds: f32) -> Result<()> {
    let cfg = load_default()?;
    let world = build_scene(7);
    let mut cl = build_controller(&cfg);
    let mut events = Vec::new();

    let step = DEFAULT_STEP_SECONDS;
    let mut tick: u32 = 0;
    let mut elapsed = 0.0f32;
    while elapsed < seconds {
        script_inputs(&mut cl, elapsed);
        cl.step(&world, &mut events);
        for ev in events.drain(..) {
            log::info!("host event: {ev:?}");
        }
        tick += 1;
        elapsed += step;
        if tick % 60 == 0 {
            let s = cl.state();
            log::info!(
                "t={elapsed:.1}s pos=({:.2},{:.2},{:.2}) yaw={:.2} cam=({:.2},{:.2},{:.2}) fp={}",
                s.player_pos.x,
                s.player_pos.y,
                s.player_pos.z,
                s.player_yaw,
                s.camera.eye.x,
                s.camera.eye.y,
                s.camera.eye.z,
                s.player_hidden
            );
        }
    }
    Ok(())
}

/// The input reel: phases are keyed off simulated time.
fn script_inputs(cl: &mut ControllerLoop, t: f32) {
    cl.input.clear();
    // Walk forward for the first four seconds, drifting right after two.
    if t < 4.0 {
        cl.input.forward = true;
        cl.input.right = t >= 2.0;
    }
    // A held hop across the middle of the walk.
    cl.input.jump_held = (2.5..3.5).contains(&t);
    // Grab the pointer once, shortly after starting.
    if (t - 1.0).abs() < 1e-4 {
        cl.input.press_capture_toggle();
    }
    // Wheel in to first person, hold, then wheel back out.
    if (5.0..6.0).contains(&t) {
        cl.zoom_mut().apply_scroll(-10.0);
    }
    if (8.0..9.0).contains(&t) {
        cl.zoom_mut().apply_scroll(10.0);
    }
}

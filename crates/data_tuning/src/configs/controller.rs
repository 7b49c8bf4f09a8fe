//! Controller tuning loaded from data/config/controller.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct LocomotionToml {
    pub move_speed: Option<f32>,
    pub gravity: Option<f32>,
    pub jump_impulse: Option<f32>,
    pub facing_lerp: Option<f32>,
    pub ground_epsilon: Option<f32>,
    pub body_height: Option<f32>,
    pub body_radius: Option<f32>,
}

impl Default for LocomotionToml {
    fn default() -> Self {
        Self {
            move_speed: Some(0.15),
            gravity: Some(-0.02),
            jump_impulse: Some(0.35),
            facing_lerp: Some(0.2),
            ground_epsilon: Some(0.01),
            body_height: Some(2.5),
            body_radius: Some(0.5),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraToml {
    pub max_zoom: Option<f32>,
    pub start_distance: Option<f32>,
    pub wheel_scale: Option<f32>,
    pub first_person_threshold: Option<f32>,
    pub probe_backoff: Option<f32>,
    pub follow_lerp: Option<f32>,
    pub eye_height_frac: Option<f32>,
}

impl Default for CameraToml {
    fn default() -> Self {
        Self {
            max_zoom: Some(15.0),
            start_distance: Some(5.0),
            wheel_scale: Some(0.01),
            first_person_threshold: Some(0.1),
            probe_backoff: Some(0.2),
            follow_lerp: Some(0.25),
            eye_height_frac: Some(0.85),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControllerToml {
    #[serde(default)]
    pub locomotion: LocomotionToml,
    #[serde(default)]
    pub camera: CameraToml,
}

fn data_root() -> PathBuf {
    // Prefer the top-level workspace `data/` so tests and tools can run from
    // any crate.
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() {
        ws
    } else {
        here.join("data")
    }
}

pub fn load_default() -> Result<ControllerToml> {
    let path = data_root().join("config/controller.toml");
    let mut cfg = if path.is_file() {
        let txt =
            std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<ControllerToml>(&txt).context("parse controller TOML")?
    } else {
        ControllerToml::default()
    };
    // Env overrides for quick tuning (optional)
    if let Ok(s) = std::env::var("WALK_MOVE_SPEED") {
        cfg.locomotion.move_speed = s.parse().ok();
    }
    if let Ok(s) = std::env::var("WALK_JUMP_IMPULSE") {
        cfg.locomotion.jump_impulse = s.parse().ok();
    }
    if let Ok(s) = std::env::var("WALK_GRAVITY") {
        cfg.locomotion.gravity = s.parse().ok();
    }
    if let Ok(s) = std::env::var("WALK_MAX_ZOOM") {
        cfg.camera.max_zoom = s.parse().ok();
    }
    if let Ok(s) = std::env::var("WALK_START_DISTANCE") {
        cfg.camera.start_distance = s.parse().ok();
    }
    Ok(cfg)
}

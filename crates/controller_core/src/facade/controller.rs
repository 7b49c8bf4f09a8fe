//! Read-only controller state consumed by the renderer.

use crate::systems::camera::CameraPose;
use glam::Vec3;

/// What the renderer needs each frame: where the player is, where the
/// camera is, and whether the local body mesh should be drawn. Fully
/// recomputed every tick; nothing here is authoritative between ticks.
#[derive(Default, Clone, Copy, Debug)]
pub struct ControllerState {
    pub player_pos: Vec3,
    pub player_yaw: f32,
    pub camera: CameraPose,
    /// First person hides the local body mesh; external observers are the
    /// host's concern.
    pub player_hidden: bool,
    pub captured: bool,
}

impl ControllerState {
    #[inline]
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        self.camera
    }

    #[inline]
    #[must_use]
    pub fn player_hidden(&self) -> bool {
        self.player_hidden
    }

    #[inline]
    #[must_use]
    pub fn captured(&self) -> bool {
        self.captured
    }
}

//! Per-frame orchestration: input snapshot, locomotion, then camera.

use crate::controller::{LocomotionCfg, PlayerController};
use crate::facade::controller::ControllerState;
use crate::input::InputState;
use crate::systems::camera::{CameraMode, CameraRig, CameraRigCfg, Zoom};
use crate::systems::capture::{handle_capture_toggle, HostEvent};
use crate::world::{BodyShape, CollisionQuery};
use glam::Vec3;

/// Default seconds folded into one fixed step by [`ControllerLoop::advance`].
pub const DEFAULT_STEP_SECONDS: f32 = 1.0 / 60.0;

/// Owns the input state, the player body, and the camera rig, and runs them
/// in order once per fixed step. The only piece a host attaches to its
/// per-frame callback.
#[derive(Debug)]
pub struct ControllerLoop {
    /// Host key handlers write here between ticks.
    pub input: InputState,
    player: PlayerController,
    zoom: Zoom,
    rig: CameraRig,
    state: ControllerState,
    step_seconds: f32,
    accum: f32,
}

impl ControllerLoop {
    #[must_use]
    pub fn new(
        spawn: Vec3,
        shape: BodyShape,
        loco: LocomotionCfg,
        rig_cfg: CameraRigCfg,
        zoom: Zoom,
    ) -> Self {
        Self {
            input: InputState::default(),
            player: PlayerController::new(spawn, shape, loco),
            zoom,
            rig: CameraRig::new(rig_cfg),
            state: ControllerState::default(),
            step_seconds: DEFAULT_STEP_SECONDS,
            accum: 0.0,
        }
    }

    /// Override the fixed-step length (seconds).
    pub fn set_step_seconds(&mut self, seconds: f32) {
        self.step_seconds = seconds;
    }

    /// Fold real elapsed time into whole fixed steps and run them. Returns
    /// how many steps ran. `dt` must be finite and non-negative; the
    /// controller does not defend against a broken clock.
    pub fn advance(&mut self, dt: f32, world: &impl CollisionQuery, events: &mut Vec<HostEvent>) -> u32 {
        self.accum += dt;
        let mut steps = 0;
        while self.accum >= self.step_seconds {
            self.accum -= self.step_seconds;
            self.step(world, events);
            steps += 1;
        }
        steps
    }

    /// One fixed tick: snapshot input, consume the capture edge, integrate
    /// locomotion, recompute the camera pose, publish the facade state.
    pub fn step(&mut self, world: &impl CollisionQuery, events: &mut Vec<HostEvent>) {
        let snap = self.input.snapshot();

        if self.input.consume_capture_toggle() {
            let mut captured = self.state.captured;
            handle_capture_toggle(&mut captured, events);
            self.state.captured = captured;
        }

        // The rig trails the facing, so the player yaw at tick start is the
        // camera-relative movement basis.
        let basis_yaw = self.player.yaw;
        self.player.step(snap, basis_yaw, world);

        let (camera, mode) = self.rig.tick(
            self.player.pos,
            self.player.yaw,
            self.player.shape,
            &self.zoom,
            world,
        );

        self.state.player_pos = self.player.pos;
        self.state.player_yaw = self.player.yaw;
        self.state.camera = camera;
        self.state.player_hidden = mode == CameraMode::FirstPerson;
    }

    /// Scroll events land here between ticks.
    pub fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    #[must_use]
    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    #[must_use]
    pub fn player(&self) -> &PlayerController {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::OpenWorld;

    fn make_loop() -> ControllerLoop {
        ControllerLoop::new(
            Vec3::new(0.0, 1.25, 0.0),
            BodyShape::new(1.25, 0.5),
            LocomotionCfg::default(),
            CameraRigCfg::default(),
            Zoom::new(5.0, 15.0, 0.01),
        )
    }

    #[test]
    fn advance_folds_dt_into_whole_steps() {
        let mut cl = make_loop();
        let mut ev = Vec::new();
        // 2.5 steps of time: exactly two run, the remainder carries over.
        let ran = cl.advance(DEFAULT_STEP_SECONDS * 2.5, &OpenWorld, &mut ev);
        assert_eq!(ran, 2);
        // One more whole step of time: the carried remainder pushes it over.
        let ran = cl.advance(DEFAULT_STEP_SECONDS, &OpenWorld, &mut ev);
        assert_eq!(ran, 1);
    }

    #[test]
    fn capture_edge_fires_once_per_press() {
        let mut cl = make_loop();
        let mut ev = Vec::new();
        cl.input.press_capture_toggle();
        cl.step(&OpenWorld, &mut ev);
        cl.step(&OpenWorld, &mut ev);
        assert_eq!(ev, vec![HostEvent::PointerLockRequest(true)]);
        assert!(cl.state().captured);
    }
}

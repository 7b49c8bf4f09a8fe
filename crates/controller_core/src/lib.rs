//! Player locomotion and camera-rig controller.
//!
//! Pure per-tick logic: input snapshots in, player/camera poses out. World
//! geometry is consulted through the [`world::CollisionQuery`] seam so the
//! same controller runs against any collision backend (or a synthetic one in
//! tests).

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]

pub mod input {
    /// Held-key state for one local player.
    ///
    /// The host's key handlers mutate this between ticks; during a tick the
    /// controller only reads the `snapshot()` value taken at tick start.
    #[derive(Default, Debug, Clone, Copy)]
    pub struct InputState {
        pub forward: bool,
        pub backward: bool,
        pub left: bool,
        pub right: bool,
        /// Space held. Level state: the ground gate in the integrator turns
        /// it into one impulse per contact, so holding through a landing
        /// hops again while holding mid-air does nothing.
        pub jump_held: bool,
        capture_toggle: bool,
    }

    impl InputState {
        /// Record a discrete capture-toggle key press.
        pub fn press_capture_toggle(&mut self) {
            self.capture_toggle = true;
        }

        /// Take the pending capture-toggle edge. Returns true at most once
        /// per recorded press; holding the key does not re-fire.
        pub fn consume_capture_toggle(&mut self) -> bool {
            std::mem::take(&mut self.capture_toggle)
        }

        /// Copy the held states for one tick.
        #[must_use]
        pub fn snapshot(&self) -> InputSnapshot {
            InputSnapshot {
                forward: self.forward,
                backward: self.backward,
                left: self.left,
                right: self.right,
                jump_held: self.jump_held,
            }
        }

        pub fn clear(&mut self) {
            *self = Self::default();
        }
    }

    /// Immutable per-tick view of the held movement keys.
    #[derive(Default, Debug, Clone, Copy)]
    pub struct InputSnapshot {
        pub forward: bool,
        pub backward: bool,
        pub left: bool,
        pub right: bool,
        pub jump_held: bool,
    }
}

pub mod controller {
    use crate::input::InputSnapshot;
    use crate::world::{BodyShape, CollisionQuery};
    use glam::Vec3;

    /// Locomotion tuning. Units are per fixed step, matching the cadence
    /// owned by [`crate::systems::controller::ControllerLoop`].
    #[derive(Clone, Copy, Debug)]
    pub struct LocomotionCfg {
        /// Horizontal displacement per step while any movement key is held.
        pub move_speed: f32,
        /// Added to vertical velocity every step (negative = down).
        pub gravity: f32,
        /// Vertical velocity set on a grounded jump step.
        pub jump_impulse: f32,
        /// Fixed per-step fraction of the remaining yaw error applied when
        /// turning toward the move direction.
        pub facing_lerp: f32,
        /// Height slack for the grounded test.
        pub ground_epsilon: f32,
    }

    impl Default for LocomotionCfg {
        fn default() -> Self {
            Self {
                move_speed: 0.15,
                gravity: -0.02,
                jump_impulse: 0.35,
                facing_lerp: 0.2,
                ground_epsilon: 0.01,
            }
        }
    }

    /// The player body and its per-step integrator.
    ///
    /// `pos` is the body center; the feet rest at `pos.y - half_height`, so
    /// on flat ground `pos.y` never drops below the shape's half height
    /// except transiently inside a step.
    #[derive(Debug, Clone, Copy)]
    pub struct PlayerController {
        pub pos: Vec3,
        pub yaw: f32,
        pub shape: BodyShape,
        cfg: LocomotionCfg,
        vel_y: f32,
    }

    impl PlayerController {
        #[must_use]
        pub fn new(spawn: Vec3, shape: BodyShape, cfg: LocomotionCfg) -> Self {
            Self {
                pos: spawn,
                yaw: 0.0,
                shape,
                cfg,
                vel_y: 0.0,
            }
        }

        /// Height of the body center when the feet touch flat ground.
        #[must_use]
        pub fn ground_height(&self) -> f32 {
            self.shape.half_height
        }

        /// True when the body is within the grounded slack of contact
        /// height. This is the jump gate; mid-air it stays false until the
        /// body comes back down.
        #[must_use]
        pub fn grounded(&self) -> bool {
            self.pos.y - self.ground_height() <= self.cfg.ground_epsilon
        }

        /// Current vertical velocity (per-step units).
        #[must_use]
        pub fn vertical_velocity(&self) -> f32 {
            self.vel_y
        }

        /// Advance one fixed step.
        ///
        /// `basis_yaw` is the camera yaw the movement keys are relative to.
        /// Order is a contract: horizontal resolve, facing turn, jump gate,
        /// gravity, vertical resolve, ground clamp. The jump impulse is set
        /// before gravity is added, so a jump step rises by
        /// `jump_impulse + gravity`.
        pub fn step(&mut self, input: InputSnapshot, basis_yaw: f32, world: &impl CollisionQuery) {
            let (s, c) = basis_yaw.sin_cos();
            let fwd = Vec3::new(s, 0.0, c);
            let right = Vec3::new(c, 0.0, -s);

            let mut dir = Vec3::ZERO;
            if input.forward {
                dir += fwd;
            }
            if input.backward {
                dir -= fwd;
            }
            if input.right {
                dir += right;
            }
            if input.left {
                dir -= right;
            }

            if dir.length_squared() > 0.0 {
                let delta = dir.normalize() * self.cfg.move_speed;
                let applied = world.resolve_displacement(self.shape, self.pos, delta);
                self.pos += applied;
                // Turn toward the requested direction, not the resolved one,
                // so sliding along a wall keeps the body facing where the
                // player pushes.
                let target = delta.x.atan2(delta.z);
                let diff = wrap_angle(target - self.yaw);
                self.yaw = wrap_angle(self.yaw + diff * self.cfg.facing_lerp);
            }

            // Jump gates on contact sampled before gravity; the impulse is a
            // discrete per-contact event even while the key stays held.
            if input.jump_held && self.grounded() {
                self.vel_y = self.cfg.jump_impulse;
            }
            self.vel_y += self.cfg.gravity;

            let desired = Vec3::new(0.0, self.vel_y, 0.0);
            let applied = world.resolve_displacement(self.shape, self.pos, desired);
            self.pos += applied;

            let ground = self.ground_height();
            if self.pos.y < ground {
                // Landing: clamp exactly, never bounce.
                self.pos.y = ground;
                self.vel_y = 0.0;
            } else if self.vel_y < 0.0 && applied.y - desired.y > 1e-4 {
                // Geometry stopped the fall short (a box top): that is a
                // landing too.
                self.vel_y = 0.0;
            }
        }
    }

    /// Wrap an angle to `(-PI, PI]`.
    #[must_use]
    pub fn wrap_angle(a: f32) -> f32 {
        let mut x = a;
        while x > std::f32::consts::PI {
            x -= std::f32::consts::TAU;
        }
        while x < -std::f32::consts::PI {
            x += std::f32::consts::TAU;
        }
        x
    }
}

pub mod world;

pub mod systems;

pub mod facade {
    pub mod controller;
}

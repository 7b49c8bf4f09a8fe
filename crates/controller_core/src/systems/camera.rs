//! Camera rig: zoom state and first/third-person pose computation.

use crate::world::{BodyShape, CollisionQuery};
use glam::Vec3;

/// User zoom intent. Scroll events accumulate here between ticks. The rig
/// reads it but never writes back: a probe clamp affects the rendered eye
/// only, not the chosen distance.
#[derive(Clone, Copy, Debug)]
pub struct Zoom {
    distance: f32,
    max: f32,
    wheel_scale: f32,
}

impl Zoom {
    #[must_use]
    pub fn new(distance: f32, max: f32, wheel_scale: f32) -> Self {
        Self {
            distance: distance.clamp(0.0, max),
            max,
            wheel_scale,
        }
    }

    /// Accumulate a wheel delta, then clamp to `[0, max]`.
    pub fn apply_scroll(&mut self, delta: f32) {
        self.distance = (self.distance + delta * self.wheel_scale).clamp(0.0, self.max);
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }
}

/// Camera rig tuning.
#[derive(Clone, Copy, Debug)]
pub struct CameraRigCfg {
    /// Eye anchor height above the feet, as a fraction of body height.
    pub eye_height_frac: f32,
    /// At or below this zoom distance the rig is first-person.
    pub first_person_threshold: f32,
    /// Pulled back from a probe hit so the lens never touches the surface.
    pub probe_backoff: f32,
    /// Fixed per-tick exponential factor for the third-person follow.
    pub follow_lerp: f32,
}

impl Default for CameraRigCfg {
    fn default() -> Self {
        Self {
            eye_height_frac: 0.85,
            first_person_threshold: 0.1,
            probe_backoff: 0.2,
            follow_lerp: 0.25,
        }
    }
}

/// Rendering mode, classified from the zoom distance every tick. Never
/// stored: there is no mode field to fall out of sync with the zoom value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    FirstPerson,
    ThirdPerson,
}

/// Read-only camera pose for renderer consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_dir: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            look_dir: Vec3::Z,
            up: Vec3::Y,
        }
    }
}

/// Follow smoothing state. The smoothed eye is `None` until the rig has
/// produced a pose, so the first third-person tick snaps to its target
/// instead of lerping from stale coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    cfg: CameraRigCfg,
    current_eye: Option<Vec3>,
}

impl CameraRig {
    #[must_use]
    pub fn new(cfg: CameraRigCfg) -> Self {
        Self {
            cfg,
            current_eye: None,
        }
    }

    #[must_use]
    pub fn cfg(&self) -> &CameraRigCfg {
        &self.cfg
    }

    /// Compute this tick's camera pose from the player pose and zoom.
    ///
    /// First person (zoom at or under the threshold): the eye sits exactly
    /// on the eye anchor and looks along the facing; the local body mesh is
    /// hidden. Third person: the desired eye sits behind the facing at the
    /// zoom distance, clamped to the nearest probe hit minus the backoff,
    /// and the rendered eye eases toward it.
    pub fn tick(
        &mut self,
        player_pos: Vec3,
        player_yaw: f32,
        shape: BodyShape,
        zoom: &Zoom,
        world: &impl CollisionQuery,
    ) -> (CameraPose, CameraMode) {
        let feet = player_pos.y - shape.half_height;
        let anchor = Vec3::new(
            player_pos.x,
            feet + self.cfg.eye_height_frac * shape.height(),
            player_pos.z,
        );
        let (s, c) = player_yaw.sin_cos();
        let facing = Vec3::new(s, 0.0, c);

        if zoom.distance() <= self.cfg.first_person_threshold {
            self.current_eye = Some(anchor);
            let pose = CameraPose {
                eye: anchor,
                look_dir: facing,
                up: Vec3::Y,
            };
            return (pose, CameraMode::FirstPerson);
        }

        let back = -facing;
        let max_dist = zoom.distance();
        let effective = match world.probe_ray(anchor, back, max_dist) {
            Some(d) => (d - self.cfg.probe_backoff).max(0.0),
            None => max_dist,
        };
        let target = anchor + back * effective;
        let eye = match self.current_eye {
            Some(cur) => cur.lerp(target, self.cfg.follow_lerp),
            None => target,
        };
        self.current_eye = Some(eye);

        let mut look_dir = anchor - eye;
        look_dir = if look_dir.length_squared() > 1e-12 {
            look_dir.normalize()
        } else {
            facing
        };
        let pose = CameraPose {
            eye,
            look_dir,
            up: Vec3::Y,
        };
        (pose, CameraMode::ThirdPerson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::OpenWorld;

    fn shape() -> BodyShape {
        BodyShape::new(1.25, 0.5)
    }

    #[test]
    fn scroll_accumulates_and_clamps() {
        let mut z = Zoom::new(5.0, 15.0, 0.01);
        z.apply_scroll(100.0);
        assert!((z.distance() - 6.0).abs() < 1e-6);
        z.apply_scroll(1.0e9);
        assert!((z.distance() - 15.0).abs() < 1e-6);
        z.apply_scroll(-1.0e12);
        assert!(z.distance().abs() < 1e-6);
    }

    #[test]
    fn first_person_sits_on_eye_anchor() {
        let mut rig = CameraRig::new(CameraRigCfg::default());
        let zoom = Zoom::new(0.05, 15.0, 0.01);
        let pos = Vec3::new(2.0, 1.25, -3.0);
        let (pose, mode) = rig.tick(pos, 0.4, shape(), &zoom, &OpenWorld);
        assert_eq!(mode, CameraMode::FirstPerson);
        let expect_y = (pos.y - 1.25) + 0.85 * 2.5;
        assert!((pose.eye - Vec3::new(2.0, expect_y, -3.0)).length() < 1e-6);
    }

    #[test]
    fn third_person_sits_behind_facing() {
        let mut rig = CameraRig::new(CameraRigCfg::default());
        let zoom = Zoom::new(5.0, 15.0, 0.01);
        let (pose, mode) = rig.tick(Vec3::new(0.0, 1.25, 0.0), 0.0, shape(), &zoom, &OpenWorld);
        assert_eq!(mode, CameraMode::ThirdPerson);
        // Facing +Z at yaw 0, so the eye snaps 5 m behind on the first tick.
        assert!((pose.eye.z + 5.0).abs() < 1e-5);
        assert!((pose.eye.y - 0.85 * 2.5).abs() < 1e-5);
        assert!(pose.look_dir.z > 0.0);
    }
}

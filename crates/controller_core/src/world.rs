//! Collision seam between the controller and world geometry.
//!
//! The controller never owns geometry; it asks an implementor of
//! [`CollisionQuery`] to resolve body displacements and to probe rays for
//! the camera. Both operations are total: a miss is a valid answer, not an
//! error.

use glam::Vec3;

/// Capsule-ish body approximation: a vertical segment with lateral radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyShape {
    pub half_height: f32,
    pub radius: f32,
}

impl BodyShape {
    #[must_use]
    pub fn new(half_height: f32, radius: f32) -> Self {
        Self {
            half_height,
            radius,
        }
    }

    /// Full body height, feet to crown.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }
}

/// Read-only queries against static world geometry.
pub trait CollisionQuery {
    /// Distance along `dir` (unit length) to the nearest surface within
    /// `max_dist`, or `None` when the path is clear.
    fn probe_ray(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32>;

    /// Resolve a desired displacement of a body centered at `from`.
    /// Returns the achievable delta; blocked paths slide along surfaces
    /// rather than stopping dead.
    fn resolve_displacement(&self, shape: BodyShape, from: Vec3, desired: Vec3) -> Vec3;
}

/// Unobstructed world: every probe misses and every displacement lands.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenWorld;

impl CollisionQuery for OpenWorld {
    fn probe_ray(&self, _origin: Vec3, _dir: Vec3, _max_dist: f32) -> Option<f32> {
        None
    }

    fn resolve_displacement(&self, _shape: BodyShape, _from: Vec3, desired: Vec3) -> Vec3 {
        desired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_world_passes_displacements_through() {
        let shape = BodyShape::new(1.25, 0.5);
        let d = Vec3::new(0.3, -0.1, 0.2);
        let out = OpenWorld.resolve_displacement(shape, Vec3::ZERO, d);
        assert!((out - d).length_squared() < 1e-12);
        assert!(OpenWorld.probe_ray(Vec3::ZERO, Vec3::Z, 10.0).is_none());
    }
}

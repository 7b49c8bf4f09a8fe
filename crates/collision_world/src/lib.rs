//! collision_world: static colliders (axis-aligned boxes / Y cylinders) with
//! broadphase AABBs, capsule displacement resolve with slide, and a
//! nearest-hit ray probe.
//!
//! Implements [`controller_core::world::CollisionQuery`], so it plugs
//! straight into the controller as its world-geometry collaborator.

use controller_core::world::{BodyShape, CollisionQuery};
use glam::Vec3;
use smallvec::SmallVec;

const MAX_RESOLVE_ITERS: u32 = 4;

#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Axis-aligned box from a center and full extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CylinderY {
    pub center: Vec3,
    pub radius: f32,
    pub half_height: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum ShapeRef {
    Box(Aabb),
    Cyl(CylinderY),
}

#[derive(Clone, Copy, Debug)]
pub struct StaticCollider {
    pub aabb: Aabb,
    pub shape: ShapeRef,
}

/// Flat list of static colliders with per-collider bounds for broadphase.
#[derive(Clone, Debug, Default)]
pub struct StaticIndex {
    pub colliders: Vec<StaticCollider>,
}

impl StaticIndex {
    pub fn push_box(&mut self, b: Aabb) {
        self.colliders.push(StaticCollider {
            aabb: b,
            shape: ShapeRef::Box(b),
        });
    }

    pub fn push_cylinder(&mut self, cyl: CylinderY) {
        let r = Vec3::new(cyl.radius, cyl.half_height, cyl.radius);
        self.colliders.push(StaticCollider {
            aabb: Aabb::new(cyl.center - r, cyl.center + r),
            shape: ShapeRef::Cyl(cyl),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Hit {
    normal: Vec3,
    depth: f32,
}

/// Vertical capsule: segment `p0..p1` plus lateral radius.
#[derive(Clone, Copy, Debug)]
struct Capsule {
    p0: Vec3,
    p1: Vec3,
    radius: f32,
}

fn capsule_at(shape: BodyShape, center: Vec3) -> Capsule {
    let core = (shape.half_height - shape.radius).max(0.0);
    Capsule {
        p0: center - Vec3::Y * core,
        p1: center + Vec3::Y * core,
        radius: shape.radius,
    }
}

fn capsule_aabb(c: &Capsule) -> Aabb {
    Aabb {
        min: c.p0.min(c.p1) - Vec3::splat(c.radius),
        max: c.p0.max(c.p1) + Vec3::splat(c.radius),
    }
}

fn expand_aabb(a: &Aabb, eps: f32) -> Aabb {
    Aabb {
        min: a.min - Vec3::splat(eps),
        max: a.max + Vec3::splat(eps),
    }
}

fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.max.x < b.min.x
        || a.min.x > b.max.x
        || a.max.y < b.min.y
        || a.min.y > b.max.y
        || a.max.z < b.min.z
        || a.min.z > b.max.z)
}

fn gather_overlaps(cap: &Capsule, idx: &StaticIndex, query: &Aabb, out: &mut SmallVec<[Hit; 8]>) {
    for c in &idx.colliders {
        if !aabb_overlap(&c.aabb, query) {
            continue;
        }
        let hit = match c.shape {
            ShapeRef::Box(b) => capsule_vs_box(cap, &b),
            ShapeRef::Cyl(cyl) => capsule_vs_cyl_y(cap, &cyl),
        };
        if let Some(h) = hit {
            out.push(h);
        }
    }
}

fn capsule_vs_box(cap: &Capsule, b: &Aabb) -> Option<Hit> {
    let cap_bottom = cap.p0.y - cap.radius;
    let cap_top = cap.p1.y + cap.radius;
    if cap_top < b.min.y || cap_bottom > b.max.y {
        return None;
    }
    // The capsule axis is vertical, so laterally this is a circle against
    // the box footprint.
    let cx = cap.p0.x;
    let cz = cap.p0.z;
    let nx = cx.clamp(b.min.x, b.max.x);
    let nz = cz.clamp(b.min.z, b.max.z);
    let dx = cx - nx;
    let dz = cz - nz;
    let lat2 = dx * dx + dz * dz;
    if lat2 > cap.radius * cap.radius {
        return None;
    }
    if lat2 > 1e-12 {
        // Axis outside the footprint: push out laterally.
        let dist = lat2.sqrt();
        return Some(Hit {
            normal: Vec3::new(dx / dist, 0.0, dz / dist),
            depth: cap.radius - dist,
        });
    }
    // Axis inside the footprint: pick the cheapest face, with the vertical
    // faces first so landings resolve onto the top.
    let mut normal = Vec3::Y;
    let mut depth = b.max.y - cap_bottom;
    let down = cap_top - b.min.y;
    if down < depth {
        normal = -Vec3::Y;
        depth = down;
    }
    let candidates = [
        (Vec3::X, b.max.x - cx + cap.radius),
        (-Vec3::X, cx - b.min.x + cap.radius),
        (Vec3::Z, b.max.z - cz + cap.radius),
        (-Vec3::Z, cz - b.min.z + cap.radius),
    ];
    for (n, d) in candidates {
        if d < depth {
            normal = n;
            depth = d;
        }
    }
    Some(Hit { normal, depth })
}

fn capsule_vs_cyl_y(cap: &Capsule, cyl: &CylinderY) -> Option<Hit> {
    let top = cyl.center.y + cyl.half_height;
    let bot = cyl.center.y - cyl.half_height;
    let y_closest = cyl.center.y.clamp(cap.p0.y, cap.p1.y);
    if y_closest < bot - cap.radius || y_closest > top + cap.radius {
        return None;
    }
    let d = Vec3::new(cap.p0.x - cyl.center.x, 0.0, cap.p0.z - cyl.center.z);
    let dist = (d.x * d.x + d.z * d.z).sqrt();
    let allowed = cyl.radius + cap.radius;
    let depth = allowed - dist;
    if depth <= 0.0 {
        return None;
    }
    let normal = if dist > 1e-6 {
        Vec3::new(d.x / dist, 0.0, d.z / dist)
    } else {
        Vec3::X
    };
    Some(Hit { normal, depth })
}

/// Parametric `t` in `[0, 1]` at which the segment `[p0, p1]` first enters
/// the box, or `None` when it stays outside.
fn segment_box_enter_t(p0: Vec3, p1: Vec3, b: &Aabb) -> Option<f32> {
    let d = p1 - p0;
    let mut tmin = 0.0f32;
    let mut tmax = 1.0f32;
    for i in 0..3 {
        let s = p0[i];
        let dir = d[i];
        if dir.abs() < 1e-6 {
            if s < b.min[i] || s > b.max[i] {
                return None;
            }
        } else {
            let inv = 1.0 / dir;
            let mut t0 = (b.min[i] - s) * inv;
            let mut t1 = (b.max[i] - s) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            tmin = tmin.max(t0);
            tmax = tmax.min(t1);
            if tmin > tmax {
                return None;
            }
        }
    }
    Some(tmin)
}

/// Parametric `t` in `[0, 1]` at which the segment first enters the
/// cylinder's lateral surface within its vertical span.
fn segment_cylinder_enter_t(p0: Vec3, p1: Vec3, cyl: &CylinderY) -> Option<f32> {
    let top = cyl.center.y + cyl.half_height;
    let bot = cyl.center.y - cyl.half_height;
    let ox = p0.x - cyl.center.x;
    let oz = p0.z - cyl.center.z;
    let dx = p1.x - p0.x;
    let dz = p1.z - p0.z;
    // Already inside the lateral circle at the start.
    if ox * ox + oz * oz <= cyl.radius * cyl.radius && p0.y >= bot && p0.y <= top {
        return Some(0.0);
    }
    let a = dx * dx + dz * dz;
    if a < 1e-12 {
        return None;
    }
    let half_b = ox * dx + oz * dz;
    let c = ox * ox + oz * oz - cyl.radius * cyl.radius;
    let disc = half_b * half_b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-half_b - disc.sqrt()) / a;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    let y = p0.y + (p1.y - p0.y) * t;
    if y < bot || y > top {
        return None;
    }
    Some(t)
}

impl CollisionQuery for StaticIndex {
    fn probe_ray(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32> {
        let end = origin + dir * max_dist;
        let mut best: Option<f32> = None;
        for c in &self.colliders {
            let t = match c.shape {
                ShapeRef::Box(b) => segment_box_enter_t(origin, end, &b),
                ShapeRef::Cyl(cyl) => segment_cylinder_enter_t(origin, end, &cyl),
            };
            if let Some(t) = t {
                let d = t * max_dist;
                if best.map_or(true, |b| d < b) {
                    best = Some(d);
                }
            }
        }
        best
    }

    fn resolve_displacement(&self, shape: BodyShape, from: Vec3, desired: Vec3) -> Vec3 {
        let mut pos = from + desired;
        let mut cap = capsule_at(shape, pos);
        let mut it = 0;
        while it < MAX_RESOLVE_ITERS {
            it += 1;
            let query = expand_aabb(&capsule_aabb(&cap), 0.01);
            let mut hits: SmallVec<[Hit; 8]> = SmallVec::new();
            gather_overlaps(&cap, self, &query, &mut hits);
            // Push out along the most penetrating normal; lateral pushes
            // leave the tangential part of the displacement intact (slide).
            let mut best = Hit::default();
            for h in hits {
                if h.depth > best.depth {
                    best = h;
                }
            }
            if best.depth <= 1e-4 {
                break;
            }
            let push = best.normal * best.depth;
            pos += push;
            cap.p0 += push;
            cap.p1 += push;
        }
        // Still penetrating after the iteration cap: nudge up to avoid
        // tunneling into geometry.
        let query = expand_aabb(&capsule_aabb(&cap), 0.01);
        let mut hits: SmallVec<[Hit; 8]> = SmallVec::new();
        gather_overlaps(&cap, self, &query, &mut hits);
        if hits.iter().any(|h| h.depth > 1e-3) {
            pos.y += 0.02;
        }
        pos - from
    }
}

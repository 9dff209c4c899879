/// Ray: world-space half line used by `Bvh::cast_ray`.
///
/// Distances returned by `intersect_aabb` are in units of `direction`,
/// which does not need to be normalized.

use glam::Vec3;
use super::aabb::AABB;

/// A half line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction (non-zero, not necessarily unit length)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. The direction must not be the zero vector.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction != Vec3::ZERO, "ray direction must be non-zero");
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an AABB.
    ///
    /// Returns the entry distance `t` (0 when the origin is inside the box),
    /// or `None` if the ray misses or the box lies behind the origin.
    /// Zero direction components are handled per axis: the ray misses if the
    /// origin is outside that slab, otherwise the axis does not constrain `t`.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        if aabb.is_empty() {
            return None;
        }

        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let lo = aabb.min[axis];
            let hi = aabb.max[axis];

            if dir == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;

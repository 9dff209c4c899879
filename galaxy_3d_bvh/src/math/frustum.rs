/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// `ViewFrustum` holds the planes in view space (right-handed, looking down -Z,
/// as produced by glam's `*_rh` projections). The BVH moves the planes to world
/// space once per query instead of moving every node box to view space.

use glam::{Mat4, Vec3, Vec4};
use super::aabb::AABB;

/// Result of a 3-way frustum/AABB classification.
///
/// Used by the BVH for hierarchical culling:
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect all instances without further testing
/// - `Partial` → recurse into children, test instances at leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method for a `[0, 1]` clip-space depth range
    /// (glam's `perspective_rh` / `orthographic_rh`). Works for both perspective
    /// and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row2 (z_clip >= 0)
            Vec4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            *plane = normalize_plane(*plane);
        }

        Self { planes }
    }

    /// Map the planes through an affine transform.
    ///
    /// If `matrix` takes points from space A to space B, the result bounds the
    /// same volume expressed in space B. Planes transform by the inverse-transpose.
    pub fn transformed(&self, matrix: &Mat4) -> Frustum {
        let inverse_transpose = matrix.inverse().transpose();
        let mut planes = self.planes;
        for plane in &mut planes {
            *plane = normalize_plane(inverse_transpose * *plane);
        }
        Frustum { planes }
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// Returns `true` if the AABB is (potentially) inside or intersecting.
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        if aabb.is_empty() {
            return false;
        }

        for plane in &self.planes {
            let normal = plane.truncate();
            if normal.dot(positive_vertex(aabb, normal)) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// Tests both the positive vertex (p-vertex) and negative vertex (n-vertex)
    /// against each plane:
    /// - If the p-vertex is outside any plane → `Outside` (early out)
    /// - If the n-vertex is outside any plane → at least `Partial`
    /// - If all n-vertices are inside all planes → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        if aabb.is_empty() {
            return FrustumTest::Outside;
        }

        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            if normal.dot(positive_vertex(aabb, normal)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }

            if normal.dot(negative_vertex(aabb, normal)) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

/// Frustum expressed in view space.
///
/// This is what a camera owns; `Bvh::do_frustum_culling` pairs it with the
/// camera's view-to-world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrustum {
    frustum: Frustum,
}

impl ViewFrustum {
    /// Symmetric perspective frustum (vertical FOV in radians).
    pub fn perspective(v_fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::from_projection(&Mat4::perspective_rh(v_fov, aspect_ratio, near, far))
    }

    /// Box-shaped frustum of an orthographic projection.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::from_projection(&Mat4::orthographic_rh(left, right, bottom, top, near, far))
    }

    /// Frustum of an arbitrary projection matrix (view space → clip space).
    pub fn from_projection(projection: &Mat4) -> Self {
        Self { frustum: Frustum::from_view_projection(projection) }
    }

    /// View-space planes.
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.frustum.planes
    }

    /// Move the frustum to world space.
    pub fn to_world(&self, view_to_world: &Mat4) -> Frustum {
        self.frustum.transformed(view_to_world)
    }
}

// ===== PLANE HELPERS =====

fn normalize_plane(plane: Vec4) -> Vec4 {
    let normal_len = plane.truncate().length();
    if normal_len > 0.0 { plane / normal_len } else { plane }
}

/// Corner most in the direction of the normal
fn positive_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::new(
        if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
        if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
        if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
    )
}

/// Corner least in the direction of the normal
fn negative_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::new(
        if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
        if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
        if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
    )
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;

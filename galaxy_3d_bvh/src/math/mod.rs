//! Math module: geometry primitives used by the BVH.
//!
//! Thin value types on top of glam. The BVH stores and queries everything
//! in world space; `ViewFrustum` is the only view-space type.

mod aabb;
mod ray;
mod frustum;

pub use aabb::AABB;
pub use ray::Ray;
pub use frustum::{
    Frustum, FrustumTest, ViewFrustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};

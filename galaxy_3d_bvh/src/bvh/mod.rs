//! Bounding-volume hierarchy over scene instances.
//!
//! The BVH indexes caller-owned instances (world AABB + opaque `u64` ID) for
//! the two per-frame queries of the renderer: view-frustum culling and
//! closest-hit ray casts. It never allocates IDs and never owns scene topology;
//! callers feed it build/update/remove calls and query it by reference.

mod types;
mod config;
mod bvh;
mod builder;
mod updater;
mod traversal;

#[cfg(test)]
mod test_utils;

pub use types::{BvhInstance, BvhUpdate, BvhNode, RayHit, CullingCollector, INVALID_INDEX};
pub use config::{BvhConfig, BuildStats};
pub use bvh::Bvh;

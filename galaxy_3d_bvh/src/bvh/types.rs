/// Plain records stored in, passed to, and returned by the BVH.

use std::ops::Range;
use crate::math::AABB;

/// Sentinel for "no node": a leaf's `right_child`, the root's `parent`.
pub const INVALID_INDEX: u32 = u32::MAX;

/// One instance handed to `Bvh::build`: world-space bounds plus caller ID.
///
/// IDs must be unique among the instances currently in the BVH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhInstance {
    pub aabb: AABB,
    pub id: u64,
}

impl BvhInstance {
    pub fn new(aabb: AABB, id: u64) -> Self {
        Self { aabb, id }
    }
}

/// One entry of `Bvh::update`: the instance's current box and its new box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhUpdate {
    /// Box currently stored for the instance (must match exactly)
    pub old_box: AABB,
    /// Replacement box
    pub new_box: AABB,
    pub id: u64,
}

impl BvhUpdate {
    pub fn new(old_box: AABB, new_box: AABB, id: u64) -> Self {
        Self { old_box, new_box, id }
    }
}

/// A node of the flat, depth-first (pre-order) tree.
///
/// The left child of an internal node is always the next slot in the node
/// array; only the right child is stored. `right_child == INVALID_INDEX`
/// marks a leaf, which owns instances `[base, base + count)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    pub(crate) aabb: AABB,
    pub(crate) base: u32,
    pub(crate) count: u32,
    pub(crate) right_child: u32,
    pub(crate) parent: u32,
}

impl BvhNode {
    pub(crate) fn leaf(aabb: AABB, base: usize, count: usize, parent: u32) -> Self {
        Self {
            aabb,
            base: base as u32,
            count: count as u32,
            right_child: INVALID_INDEX,
            parent,
        }
    }

    pub(crate) fn internal(aabb: AABB, right_child: usize, parent: u32) -> Self {
        Self {
            aabb,
            base: 0,
            count: 0,
            right_child: right_child as u32,
            parent,
        }
    }

    /// Union of everything below this node
    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    pub fn is_leaf(&self) -> bool {
        self.right_child == INVALID_INDEX
    }

    /// Right child index (`None` for leaves). The left child is `self + 1`.
    pub fn right_child(&self) -> Option<usize> {
        (!self.is_leaf()).then_some(self.right_child as usize)
    }

    /// Parent index (`None` for the root)
    pub fn parent(&self) -> Option<usize> {
        (self.parent != INVALID_INDEX).then_some(self.parent as usize)
    }

    /// Instance indices owned by a leaf (empty for internal nodes)
    pub fn instance_range(&self) -> Range<usize> {
        if self.is_leaf() {
            self.base as usize..(self.base + self.count) as usize
        } else {
            0..0
        }
    }
}

/// Closest hit reported by `Bvh::cast_ray_hit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: u64,
    /// Entry distance along the ray, in units of the ray direction
    pub distance: f32,
}

/// Append-only sink for frustum culling results.
///
/// `Vec<u64>` collects IDs only; `Vec<BvhInstance>` collects IDs and boxes.
/// Implement it for a frame allocator's vector to keep results in scratch memory.
pub trait CullingCollector {
    fn push_instance(&mut self, instance: &BvhInstance);

    fn extend_instances(&mut self, instances: &[BvhInstance]) {
        for instance in instances {
            self.push_instance(instance);
        }
    }
}

impl CullingCollector for Vec<u64> {
    fn push_instance(&mut self, instance: &BvhInstance) {
        self.push(instance.id);
    }

    fn extend_instances(&mut self, instances: &[BvhInstance]) {
        self.extend(instances.iter().map(|instance| instance.id));
    }
}

impl CullingCollector for Vec<BvhInstance> {
    fn push_instance(&mut self, instance: &BvhInstance) {
        self.push(*instance);
    }

    fn extend_instances(&mut self, instances: &[BvhInstance]) {
        self.extend_from_slice(instances);
    }
}

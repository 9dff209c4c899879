/// Bvh: storage, lifecycle and accessors of the acceleration structure.
///
/// Build, update/remove and the two traversals live in `builder.rs`,
/// `updater.rs` and `traversal.rs` as further `impl Bvh` blocks.
///
/// Threading: mutators take `&mut self` and queries take `&self`, so the
/// borrow checker enforces "one writer or many readers". The BVH does no
/// locking of its own.
///
/// Removal-heavy workloads: `remove` never rebalances or deletes nodes, and
/// leaves may end up sparse or empty. Call `rebuild` periodically to restore
/// a tight tree.

use crate::error::{Error, Result};
use crate::math::AABB;
use crate::utils::MemoryArena;
use super::config::{BvhConfig, BuildStats};
use super::types::{BvhInstance, BvhNode};

/// Index of the root node in the flat node array.
pub(crate) const ROOT: usize = 0;

/// Bounding-volume hierarchy over scene instances.
///
/// Empty until `build` is called. Every `build` invalidates all node and
/// instance indices previously observed through `nodes()`/`instances()`.
pub struct Bvh {
    pub(crate) config: BvhConfig,
    /// Tree in depth-first pre-order
    pub(crate) nodes: MemoryArena<BvhNode>,
    /// Instances, reordered by the build so every leaf owns a contiguous range
    pub(crate) instances: MemoryArena<BvhInstance>,
    pub(crate) stats: BuildStats,
}

impl Bvh {
    /// Create an empty BVH with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(BvhConfig::default())
    }

    /// Create an empty BVH with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration fails validation.
    pub fn with_config(config: BvhConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: BvhConfig) -> Self {
        Self {
            nodes: MemoryArena::new(config.arena_block_size),
            instances: MemoryArena::new(config.arena_block_size),
            stats: BuildStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// True once `build` has produced at least one node
    pub fn is_built(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Discard the tree, the instances and the arena memory
    pub fn clear(&mut self) {
        self.nodes.release();
        self.instances.release();
        self.stats = BuildStats::default();
        crate::engine_trace!("galaxy3d::Bvh", "Cleared");
    }

    /// Box enclosing the whole scene.
    ///
    /// # Panics
    ///
    /// Panics if the BVH hasn't been built (see `try_world_aabb`).
    pub fn world_aabb(&self) -> AABB {
        assert!(self.is_built(), "BVH hasn't been built yet.");
        self.nodes[ROOT].aabb
    }

    /// Box enclosing the whole scene, or `Error::NotBuilt`
    pub fn try_world_aabb(&self) -> Result<AABB> {
        if self.is_built() {
            Ok(self.nodes[ROOT].aabb)
        } else {
            Err(Error::NotBuilt)
        }
    }

    /// Tree nodes in depth-first pre-order (node 0 is the root)
    pub fn nodes(&self) -> &[BvhNode] {
        self.nodes.as_slice()
    }

    /// Instances in leaf order
    pub fn instances(&self) -> &[BvhInstance] {
        self.instances.as_slice()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Statistics of the last build (zeroed when empty)
    pub fn build_stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Bytes reserved by the node and instance arenas
    pub fn memory_usage_bytes(&self) -> usize {
        self.nodes.allocated_bytes() + self.instances.allocated_bytes()
    }
}

impl Default for Bvh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bvh_tests.rs"]
mod tests;

/// Build parameters and build statistics.

use crate::engine::Engine;
use crate::error::{Error, Result};

/// BVH build configuration
///
/// `Default` gives 8 instances per leaf, SAH from 10 instances up, 6 SAH bins.
#[derive(Debug, Clone, PartialEq)]
pub struct BvhConfig {
    /// A range of at most this many instances becomes a leaf
    pub max_instances_per_leaf: usize,
    /// Ranges with at least this many instances are split with binned SAH,
    /// smaller ones at the median
    pub min_instances_split_sah: usize,
    /// Number of SAH bins along the split axis
    pub num_sah_bins: usize,
    /// Past this depth only median splits are used
    pub max_depth: u32,
    /// Arena growth granularity, in elements
    pub arena_block_size: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_instances_per_leaf: 8,
            min_instances_split_sah: 10,
            num_sah_bins: 6,
            max_depth: 64,
            arena_block_size: 256,
        }
    }
}

impl BvhConfig {
    /// Check the configuration, logging and returning the first violation
    pub fn validate(&self) -> Result<()> {
        let problem = if self.max_instances_per_leaf == 0 {
            Some("max_instances_per_leaf must be at least 1".to_string())
        } else if self.num_sah_bins < 2 {
            Some(format!("num_sah_bins must be at least 2 (got {})", self.num_sah_bins))
        } else if self.min_instances_split_sah <= self.max_instances_per_leaf {
            Some(format!(
                "min_instances_split_sah ({}) must exceed max_instances_per_leaf ({})",
                self.min_instances_split_sah, self.max_instances_per_leaf
            ))
        } else if self.max_depth == 0 {
            Some("max_depth must be at least 1".to_string())
        } else if self.arena_block_size == 0 {
            Some("arena_block_size must be at least 1".to_string())
        } else {
            None
        };

        match problem {
            Some(msg) => Err(Engine::log_and_return_error(
                "galaxy3d::BvhConfig",
                Error::InvalidConfig(msg),
            )),
            None => Ok(()),
        }
    }
}

/// Statistics of the last `Bvh::build`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildStats {
    pub instance_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    /// Depth of the deepest node (root = 0)
    pub max_depth: u32,
    pub sah_splits: usize,
    pub median_splits: usize,
    pub build_time_ms: f32,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

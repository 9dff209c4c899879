use glam::Vec3;
use super::*;
use crate::bvh::test_utils::{cube_grid, unit_cube};

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_new_bvh_is_empty() {
    let bvh = Bvh::new();
    assert!(!bvh.is_built());
    assert_eq!(bvh.node_count(), 0);
    assert_eq!(bvh.instance_count(), 0);
    assert!(bvh.nodes().is_empty());
    assert!(bvh.instances().is_empty());
    assert_eq!(bvh.memory_usage_bytes(), 0);
    assert_eq!(*bvh.build_stats(), BuildStats::default());
}

#[test]
fn test_default_matches_new() {
    let bvh = Bvh::default();
    assert_eq!(bvh.config(), &BvhConfig::default());
    assert!(!bvh.is_built());
}

#[test]
fn test_build_marks_built() {
    let mut bvh = Bvh::new();
    bvh.build(&cube_grid(4, 4));

    assert!(bvh.is_built());
    assert_eq!(bvh.instance_count(), 16);
    assert!(bvh.node_count() >= 1);
    assert!(bvh.memory_usage_bytes() > 0);
}

#[test]
fn test_empty_build_leaves_bvh_unbuilt() {
    let mut bvh = Bvh::new();
    bvh.build(&cube_grid(2, 2));
    bvh.build(&[]);

    assert!(!bvh.is_built());
    assert_eq!(bvh.node_count(), 0);
    assert_eq!(bvh.instance_count(), 0);
}

#[test]
fn test_clear_releases_everything() {
    let mut bvh = Bvh::new();
    bvh.build(&cube_grid(10, 10));
    bvh.clear();

    assert!(!bvh.is_built());
    assert_eq!(bvh.instance_count(), 0);
    assert_eq!(bvh.memory_usage_bytes(), 0);
    assert_eq!(bvh.build_stats().node_count, 0);
}

#[test]
fn test_clear_then_rebuild() {
    let mut bvh = Bvh::new();
    bvh.build(&cube_grid(3, 3));
    bvh.clear();
    bvh.build(&cube_grid(2, 1));

    assert!(bvh.is_built());
    assert_eq!(bvh.instance_count(), 2);
    assert_eq!(bvh.world_aabb(), AABB::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)));
}

#[test]
fn test_rebuild_keeps_memory_blocks() {
    let mut bvh = Bvh::new();
    bvh.build(&cube_grid(20, 20));
    let bytes = bvh.memory_usage_bytes();

    bvh.build(&cube_grid(5, 5));
    assert_eq!(bvh.memory_usage_bytes(), bytes);
}

// ============================================================================
// World bounds
// ============================================================================

#[test]
fn test_world_aabb_single_instance() {
    let mut bvh = Bvh::new();
    let cube = unit_cube(Vec3::new(3.0, -1.0, 2.0));
    bvh.build(&[BvhInstance::new(cube, 7)]);

    assert_eq!(bvh.world_aabb(), cube);
    assert_eq!(bvh.node_count(), 1);
    assert!(bvh.nodes()[ROOT].is_leaf());
}

#[test]
#[should_panic(expected = "BVH hasn't been built yet")]
fn test_world_aabb_panics_when_unbuilt() {
    let bvh = Bvh::new();
    let _ = bvh.world_aabb();
}

#[test]
fn test_try_world_aabb() {
    let mut bvh = Bvh::new();
    assert_eq!(bvh.try_world_aabb(), Err(Error::NotBuilt));

    bvh.build(&cube_grid(3, 2));
    assert_eq!(bvh.try_world_aabb(), Ok(AABB::new(Vec3::ZERO, Vec3::new(3.0, 1.0, 2.0))));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_with_config_rejects_invalid() {
    let config = BvhConfig { num_sah_bins: 0, ..BvhConfig::default() };
    assert!(matches!(Bvh::with_config(config), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_with_config_keeps_config() {
    let config = BvhConfig {
        max_instances_per_leaf: 2,
        min_instances_split_sah: 4,
        arena_block_size: 16,
        ..BvhConfig::default()
    };
    let bvh = Bvh::with_config(config.clone()).unwrap();
    assert_eq!(bvh.config(), &config);
}

#[test]
fn test_memory_grows_by_blocks() {
    let config = BvhConfig { arena_block_size: 16, ..BvhConfig::default() };
    let mut bvh = Bvh::with_config(config).unwrap();
    bvh.build(&cube_grid(1, 1));

    let node_bytes = 16 * std::mem::size_of::<BvhNode>();
    let instance_bytes = 16 * std::mem::size_of::<BvhInstance>();
    assert_eq!(bvh.memory_usage_bytes(), node_bytes + instance_bytes);
}

// ============================================================================
// Threading
// ============================================================================

#[test]
fn test_bvh_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Bvh>();
}

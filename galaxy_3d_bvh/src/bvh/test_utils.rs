//! Scene generators and structural checks shared by the BVH unit tests.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::math::{Frustum, Ray, AABB};
use super::{Bvh, BvhInstance};

/// Unit cube with its min corner at `min`
pub fn unit_cube(min: Vec3) -> AABB {
    AABB::new(min, min + Vec3::ONE)
}

/// `nx * nz` unit cubes on the y = 0 floor, IDs row-major (`z * nx + x`)
pub fn cube_grid(nx: u32, nz: u32) -> Vec<BvhInstance> {
    let mut instances = Vec::with_capacity((nx * nz) as usize);
    for z in 0..nz {
        for x in 0..nx {
            let id = (z * nx + x) as u64;
            instances.push(BvhInstance::new(unit_cube(Vec3::new(x as f32, 0.0, z as f32)), id));
        }
    }
    instances
}

/// Boxes of random size (0.1 to 2.0 per side) scattered in a 100-unit cube
pub fn random_instances(count: usize, seed: u64) -> Vec<BvhInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let min = Vec3::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            );
            let size = Vec3::new(
                rng.random_range(0.1..2.0),
                rng.random_range(0.1..2.0),
                rng.random_range(0.1..2.0),
            );
            BvhInstance::new(AABB::new(min, min + size), i as u64)
        })
        .collect()
}

/// Random point in the scene volume of `random_instances`
pub fn random_point(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.random_range(-60.0..60.0),
        rng.random_range(-60.0..60.0),
        rng.random_range(-60.0..60.0),
    )
}

/// Every instance index belongs to exactly one leaf
pub fn assert_leaves_cover_instances(bvh: &Bvh) {
    let mut owners = vec![0u32; bvh.instance_count()];
    for node in bvh.nodes().iter().filter(|n| n.is_leaf()) {
        for i in node.instance_range() {
            owners[i] += 1;
        }
    }
    assert!(owners.iter().all(|&n| n == 1), "leaf ranges must partition the instances: {:?}", owners);
}

/// Every node box contains its children (or its instances) and the
/// left/right/parent links agree
pub fn assert_tree_consistent(bvh: &Bvh) {
    let nodes = bvh.nodes();
    let instances = bvh.instances();
    assert!(nodes[0].parent().is_none(), "root must have no parent");

    for (idx, node) in nodes.iter().enumerate() {
        match node.right_child() {
            None => {
                for instance in &instances[node.instance_range()] {
                    assert!(node.aabb().contains(&instance.aabb), "leaf {} does not contain instance {}", idx, instance.id);
                }
            }
            Some(right) => {
                let left = idx + 1;
                assert!(right > left && right < nodes.len(), "node {} has bad right child {}", idx, right);
                assert_eq!(nodes[left].parent(), Some(idx));
                assert_eq!(nodes[right].parent(), Some(idx));
                assert!(node.aabb().contains(nodes[left].aabb()), "node {} does not contain left child", idx);
                assert!(node.aabb().contains(nodes[right].aabb()), "node {} does not contain right child", idx);
            }
        }
    }
}

/// IDs whose box intersects the frustum, by linear scan, sorted
pub fn brute_force_cull(instances: &[BvhInstance], frustum: &Frustum) -> Vec<u64> {
    let mut ids: Vec<u64> = instances
        .iter()
        .filter(|i| frustum.intersects_aabb(&i.aabb))
        .map(|i| i.id)
        .collect();
    ids.sort_unstable();
    ids
}

/// Closest hit by linear scan, lower ID on equal distance
pub fn brute_force_ray(instances: &[BvhInstance], ray: &Ray) -> Option<(u64, f32)> {
    let mut best: Option<(u64, f32)> = None;
    for instance in instances {
        if let Some(t) = ray.intersect_aabb(&instance.aabb) {
            let closer = match best {
                None => true,
                Some((id, d)) => t < d || (t == d && instance.id < id),
            };
            if closer {
                best = Some((instance.id, t));
            }
        }
    }
    best
}

pub fn sorted(mut ids: Vec<u64>) -> Vec<u64> {
    ids.sort_unstable();
    ids
}

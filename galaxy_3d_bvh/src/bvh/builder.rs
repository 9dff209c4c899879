/// Top-down builder.
///
/// Recursively partitions `[base, base + count)` of the instance array in
/// place. Ranges of at most `max_instances_per_leaf` become leaves; larger
/// ranges split with a binned SAH estimate (from `min_instances_split_sah`
/// instances up) or at the centroid median along the longest axis of the
/// range's union box. Both halves always receive at least one instance.
///
/// Nodes are emitted in pre-order, so the left child lands right after its
/// parent and only the right child index needs storing.

use std::time::Instant;
use rustc_hash::FxHashSet;
use crate::math::AABB;
use super::bvh::Bvh;
use super::types::{BvhInstance, BvhNode, INVALID_INDEX};

/// One SAH bin: instances whose centroid falls in the bin, and their union box
#[derive(Clone, Copy)]
struct SahBin {
    count: usize,
    aabb: AABB,
}

impl Bvh {
    /// Build the tree over `instances`, replacing all previous contents.
    ///
    /// Invalidates every node and instance index handed out before.
    /// An empty slice leaves the BVH empty (`is_built() == false`).
    pub fn build(&mut self, instances: &[BvhInstance]) {
        let start = Instant::now();

        self.nodes.reset();
        self.instances.reset();
        self.stats = Default::default();

        if instances.is_empty() {
            crate::engine_debug!("galaxy3d::Bvh", "Build called with no instances, BVH left empty");
            return;
        }

        debug_assert!(
            instances.len() < INVALID_INDEX as usize,
            "too many instances for 32-bit node indices"
        );
        debug_assert!(has_unique_ids(instances), "instance IDs must be unique");

        self.instances.allocate_from_slice(instances);
        self.build_subtree(0, instances.len(), INVALID_INDEX, 0);

        self.stats.instance_count = self.instances.len();
        self.stats.node_count = self.nodes.len();
        self.stats.build_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        crate::engine_debug!(
            "galaxy3d::Bvh",
            "Built {} instances into {} nodes ({} leaves, depth {}, {} SAH / {} median splits) in {:.3} ms",
            self.stats.instance_count,
            self.stats.node_count,
            self.stats.leaf_count,
            self.stats.max_depth,
            self.stats.sah_splits,
            self.stats.median_splits,
            self.stats.build_time_ms
        );
    }

    /// Rebuild from the instances currently stored (e.g. after many removes).
    pub fn rebuild(&mut self) {
        let instances = self.instances.as_slice().to_vec();
        self.build(&instances);
    }

    /// Build the subtree for `[base, base + count)` and return its root index.
    fn build_subtree(&mut self, base: usize, count: usize, parent: u32, depth: u32) -> usize {
        // Reserve the slot first so the node precedes its whole subtree
        let node_idx = self.nodes.allocate(BvhNode::leaf(AABB::EMPTY, base, 0, parent));

        let aabb = self.instances.as_slice()[base..base + count]
            .iter()
            .fold(AABB::EMPTY, |acc, instance| acc.union(&instance.aabb));

        self.stats.max_depth = self.stats.max_depth.max(depth);

        if count <= self.config.max_instances_per_leaf {
            self.nodes[node_idx] = BvhNode::leaf(aabb, base, count, parent);
            self.stats.leaf_count += 1;
            return node_idx;
        }

        let left_count = self.partition(base, count, &aabb, depth);
        debug_assert!(left_count > 0 && left_count < count, "split left a side empty");

        let left = self.build_subtree(base, left_count, node_idx as u32, depth + 1);
        debug_assert_eq!(left, node_idx + 1);
        let right = self.build_subtree(base + left_count, count - left_count, node_idx as u32, depth + 1);

        self.nodes[node_idx] = BvhNode::internal(aabb, right, parent);
        node_idx
    }

    /// Reorder `[base, base + count)` into left/right halves, returning the left size.
    fn partition(&mut self, base: usize, count: usize, aabb: &AABB, depth: u32) -> usize {
        let axis = aabb.largest_axis();
        let range = &mut self.instances.as_mut_slice()[base..base + count];

        if count >= self.config.min_instances_split_sah && depth < self.config.max_depth {
            if let Some(left_count) = sah_partition(range, axis, self.config.num_sah_bins) {
                self.stats.sah_splits += 1;
                return left_count;
            }
        }

        self.stats.median_splits += 1;
        median_partition(range, axis)
    }
}

fn centroid(instance: &BvhInstance, axis: usize) -> f32 {
    instance.aabb.center()[axis]
}

/// Split at the centroid median. Requires at least 2 instances.
fn median_partition(instances: &mut [BvhInstance], axis: usize) -> usize {
    let mid = instances.len() / 2;
    instances.select_nth_unstable_by(mid, |a, b| centroid(a, axis).total_cmp(&centroid(b, axis)));
    mid
}

/// Binned SAH split along `axis`.
///
/// Centroids are binned over their own extent. Every bin boundary with a
/// non-empty side is scored with `left_count * left_area + right_count * right_area`;
/// the cheapest wins, ties going to the lowest boundary. Returns `None` when
/// no boundary separates the instances (all centroids in one bin).
fn sah_partition(instances: &mut [BvhInstance], axis: usize, num_bins: usize) -> Option<usize> {
    let (c_min, c_max) = instances.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), i| {
        let c = centroid(i, axis);
        (lo.min(c), hi.max(c))
    });
    let extent = c_max - c_min;
    if !(extent > 0.0) {
        return None;
    }

    let bin_of = |instance: &BvhInstance| -> usize {
        let t = (centroid(instance, axis) - c_min) / extent;
        ((t * num_bins as f32) as usize).min(num_bins - 1)
    };

    let mut bins = vec![SahBin { count: 0, aabb: AABB::EMPTY }; num_bins];
    for instance in instances.iter() {
        let bin = &mut bins[bin_of(instance)];
        bin.count += 1;
        bin.aabb = bin.aabb.union(&instance.aabb);
    }

    // Suffix sweep: right side of boundary k holds bins [k, num_bins)
    let mut right_counts = vec![0usize; num_bins];
    let mut right_areas = vec![0.0f32; num_bins];
    let mut acc = SahBin { count: 0, aabb: AABB::EMPTY };
    for k in (1..num_bins).rev() {
        acc.count += bins[k].count;
        acc.aabb = acc.aabb.union(&bins[k].aabb);
        right_counts[k] = acc.count;
        right_areas[k] = acc.aabb.surface_area();
    }

    let mut best: Option<(usize, f32)> = None;
    let mut left = SahBin { count: 0, aabb: AABB::EMPTY };
    for k in 1..num_bins {
        left.count += bins[k - 1].count;
        left.aabb = left.aabb.union(&bins[k - 1].aabb);
        if left.count == 0 || right_counts[k] == 0 {
            continue;
        }

        let cost = left.count as f32 * left.aabb.surface_area()
            + right_counts[k] as f32 * right_areas[k];
        if best.map_or(true, |(_, best_cost)| cost < best_cost) {
            best = Some((k, cost));
        }
    }

    let (split_bin, _) = best?;

    let mut left_count = 0;
    for i in 0..instances.len() {
        if bin_of(&instances[i]) < split_bin {
            instances.swap(i, left_count);
            left_count += 1;
        }
    }

    Some(left_count)
}

fn has_unique_ids(instances: &[BvhInstance]) -> bool {
    let mut seen = FxHashSet::default();
    instances.iter().all(|instance| seen.insert(instance.id))
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;

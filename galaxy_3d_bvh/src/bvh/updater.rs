/// Incremental updates: find, update in place, remove, refit.
///
/// A caller miss (ID not present with that exact box) is a contract
/// violation. It is handled the same way in every build: a `Warn` log entry
/// and no state change.

use rustc_hash::FxHashSet;
use crate::math::AABB;
use super::bvh::{Bvh, ROOT};
use super::types::BvhUpdate;

impl Bvh {
    /// Locate an instance by ID and exact box.
    ///
    /// Descends only through nodes whose box overlaps `aabb`. Returns
    /// `(leaf node index, instance index)`.
    pub fn find(&self, id: u64, aabb: &AABB) -> Option<(usize, usize)> {
        if !self.is_built() {
            return None;
        }

        let mut stack = vec![ROOT];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.aabb.intersects(aabb) {
                continue;
            }

            match node.right_child() {
                None => {
                    let found = node.instance_range().find(|&i| {
                        let instance = &self.instances[i];
                        instance.id == id && instance.aabb == *aabb
                    });
                    if let Some(instance_idx) = found {
                        return Some((node_idx, instance_idx));
                    }
                }
                Some(right) => {
                    stack.push(right);
                    stack.push(node_idx + 1);
                }
            }
        }

        None
    }

    /// Replace the boxes of several instances, then refit once.
    ///
    /// Each ancestor chain touched by the batch is refitted a single time.
    /// The same instance may appear several times in a batch as long as each
    /// entry's `old_box` is the box left by the previous one.
    pub fn update(&mut self, updates: &[BvhUpdate]) {
        if updates.is_empty() {
            return;
        }
        if !self.is_built() {
            crate::engine_warn!("galaxy3d::Bvh", "Update of {} instances on an empty BVH ignored", updates.len());
            return;
        }

        let mut touched_leaves = Vec::with_capacity(updates.len());
        for update in updates {
            let mut location = self.find(update.id, &update.old_box);

            // Earlier entries of this batch may have moved the box outside stale ancestors
            if location.is_none() && !touched_leaves.is_empty() {
                self.refit(&touched_leaves);
                touched_leaves.clear();
                location = self.find(update.id, &update.old_box);
            }

            match location {
                Some((leaf, instance_idx)) => {
                    self.instances[instance_idx].aabb = update.new_box;
                    touched_leaves.push(leaf);
                }
                None => {
                    crate::engine_warn!(
                        "galaxy3d::Bvh",
                        "Update ignored: instance {} not found with box {:?}",
                        update.id,
                        update.old_box
                    );
                }
            }
        }

        self.refit(&touched_leaves);
    }

    /// Remove one instance, identified by ID and its current box.
    ///
    /// The instance array stays dense: later instances shift down by one and
    /// leaf ranges follow. The leaf shrinks but is never deleted, and the tree
    /// is not rebalanced. Returns `false` (and logs) if nothing matched.
    pub fn remove(&mut self, id: u64, aabb: &AABB) -> bool {
        let Some((leaf, instance_idx)) = self.find(id, aabb) else {
            crate::engine_warn!(
                "galaxy3d::Bvh",
                "Remove ignored: instance {} not found with box {:?}",
                id,
                aabb
            );
            return false;
        };

        let range = self.nodes[leaf].instance_range();
        let last = range.end - 1;
        self.instances.as_mut_slice().swap(instance_idx, last);
        self.instances.compact_remove(last);
        self.nodes[leaf].count -= 1;

        for node in self.nodes.as_mut_slice() {
            if node.is_leaf() && node.base as usize > last {
                node.base -= 1;
            }
        }

        self.refit(&[leaf]);
        true
    }

    /// Recompute tight boxes for the given leaves and all their ancestors.
    fn refit(&mut self, leaves: &[usize]) {
        let mut dirty = FxHashSet::default();
        for &leaf in leaves {
            let mut node_idx = leaf;
            while dirty.insert(node_idx) {
                match self.nodes[node_idx].parent() {
                    Some(parent) => node_idx = parent,
                    None => break,
                }
            }
        }

        // Pre-order: children always have larger indices than their parent
        let mut order: Vec<usize> = dirty.into_iter().collect();
        order.sort_unstable_by(|a, b| b.cmp(a));

        for node_idx in order {
            let node = self.nodes[node_idx];
            let aabb = match node.right_child() {
                None => self.instances.as_slice()[node.instance_range()]
                    .iter()
                    .fold(AABB::EMPTY, |acc, instance| acc.union(&instance.aabb)),
                Some(right) => self.nodes[node_idx + 1].aabb.union(&self.nodes[right].aabb),
            };
            self.nodes[node_idx].aabb = aabb;
        }
    }
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;

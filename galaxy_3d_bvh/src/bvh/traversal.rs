/// Queries: frustum culling and closest-hit ray casting.
///
/// Both are read-only and may run concurrently with each other. On an empty
/// BVH they report nothing rather than asserting.

use glam::Mat4;
use crate::math::{Frustum, FrustumTest, Ray, ViewFrustum};
use super::bvh::{Bvh, ROOT};
use super::types::{CullingCollector, RayHit};

impl Bvh {
    /// Collect every instance whose box at least partially overlaps the frustum.
    ///
    /// `view_frustum` is in view space; `view_to_world` is the camera's world
    /// transform. Results are appended in traversal order, without duplicates.
    /// Pass a `Vec<u64>` for IDs only or a `Vec<BvhInstance>` for IDs and boxes.
    pub fn do_frustum_culling<C>(&self, view_frustum: &ViewFrustum, view_to_world: &Mat4, results: &mut C)
    where
        C: CullingCollector + ?Sized,
    {
        if !self.is_built() {
            return;
        }
        self.query_frustum(&view_frustum.to_world(view_to_world), results);
    }

    /// Same as `do_frustum_culling` with a frustum already in world space.
    pub fn query_frustum<C>(&self, frustum: &Frustum, results: &mut C)
    where
        C: CullingCollector + ?Sized,
    {
        if !self.is_built() {
            return;
        }
        let root_class = frustum.classify_aabb(&self.nodes[ROOT].aabb);
        self.cull_recursive(ROOT, frustum, root_class, results);
    }

    /// 3-way classification at each node:
    /// - `Outside` → skip entire subtree
    /// - `Inside` → collect the whole subtree without further testing
    /// - `Partial` → recurse into children, test instances individually at leaves
    fn cull_recursive<C>(&self, node_idx: usize, frustum: &Frustum, classification: FrustumTest, results: &mut C)
    where
        C: CullingCollector + ?Sized,
    {
        match classification {
            FrustumTest::Outside => {}

            FrustumTest::Inside => self.collect_all(node_idx, results),

            FrustumTest::Partial => {
                let node = &self.nodes[node_idx];
                match node.right_child() {
                    None => {
                        for instance in &self.instances.as_slice()[node.instance_range()] {
                            if frustum.intersects_aabb(&instance.aabb) {
                                results.push_instance(instance);
                            }
                        }
                    }
                    Some(right) => {
                        for child in [node_idx + 1, right] {
                            let child_class = frustum.classify_aabb(&self.nodes[child].aabb);
                            self.cull_recursive(child, frustum, child_class, results);
                        }
                    }
                }
            }
        }
    }

    /// Append every instance below `node_idx` (no frustum test).
    ///
    /// Instances with an empty box are never visible and are skipped.
    fn collect_all<C>(&self, node_idx: usize, results: &mut C)
    where
        C: CullingCollector + ?Sized,
    {
        let node = &self.nodes[node_idx];
        match node.right_child() {
            None => {
                let instances = &self.instances.as_slice()[node.instance_range()];
                if instances.iter().all(|instance| !instance.aabb.is_empty()) {
                    results.extend_instances(instances);
                } else {
                    for instance in instances.iter().filter(|instance| !instance.aabb.is_empty()) {
                        results.push_instance(instance);
                    }
                }
            }
            Some(right) => {
                self.collect_all(node_idx + 1, results);
                self.collect_all(right, results);
            }
        }
    }

    /// ID of the closest instance box hit by a world-space ray, or `None`.
    ///
    /// Hits are at instance-box granularity; finer geometry tests belong to
    /// the caller. Equal distances resolve to the lower ID.
    pub fn cast_ray(&self, ray: &Ray) -> Option<u64> {
        self.cast_ray_hit(ray).map(|hit| hit.id)
    }

    /// Closest hit with its entry distance.
    ///
    /// Stack-based descent, nearer child first. A subtree whose entry
    /// distance exceeds the best hit so far is skipped.
    pub fn cast_ray_hit(&self, ray: &Ray) -> Option<RayHit> {
        if !self.is_built() {
            return None;
        }

        let root_t = ray.intersect_aabb(&self.nodes[ROOT].aabb)?;
        let mut best: Option<RayHit> = None;
        let mut stack: Vec<(usize, f32)> = Vec::with_capacity(64);
        stack.push((ROOT, root_t));

        while let Some((node_idx, t_entry)) = stack.pop() {
            if best.is_some_and(|hit| t_entry > hit.distance) {
                continue;
            }

            let node = &self.nodes[node_idx];
            let Some(right) = node.right_child() else {
                for instance in &self.instances.as_slice()[node.instance_range()] {
                    if let Some(t) = ray.intersect_aabb(&instance.aabb) {
                        if is_closer(t, instance.id, best) {
                            best = Some(RayHit { id: instance.id, distance: t });
                        }
                    }
                }
                continue;
            };

            let left = node_idx + 1;
            let t_left = ray.intersect_aabb(&self.nodes[left].aabb);
            let t_right = ray.intersect_aabb(&self.nodes[right].aabb);

            // Push the far child first so the near one is popped next
            match (t_left, t_right) {
                (Some(tl), Some(tr)) if tl <= tr => {
                    stack.push((right, tr));
                    stack.push((left, tl));
                }
                (Some(tl), Some(tr)) => {
                    stack.push((left, tl));
                    stack.push((right, tr));
                }
                (Some(tl), None) => stack.push((left, tl)),
                (None, Some(tr)) => stack.push((right, tr)),
                (None, None) => {}
            }
        }

        best
    }
}

fn is_closer(t: f32, id: u64, best: Option<RayHit>) -> bool {
    match best {
        None => true,
        Some(hit) => t < hit.distance || (t == hit.distance && id < hit.id),
    }
}

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;

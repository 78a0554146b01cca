//! Recursive traversal driving ray-cast and sphere-overlap queries.
//!
//! Straddling faces live in internal nodes, so every visited node's own
//! bucket is tested before descending; a subtree is skipped when its box
//! cannot contain a hit nearer than the current best.

use crate::error::Result;
use crate::intersect::{hit_test_box, hit_test_triangle, test_sphere_box, test_sphere_triangle};
use crate::octree::{NodeId, NodeKind, Octree};
use crate::ray::{Ray, RayCastOptions, RayHit};
use meshray_math::Point3;

/// Diagnostic counters accumulated over one query.
///
/// Threaded explicitly through the traversal so queries stay reentrant:
/// concurrent queries on a shared tree touch no common state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Nodes whose bucket was visited.
    pub boxes_tested: u32,
    /// Triangles run through an intersection routine.
    pub triangles_tested: u32,
}

/// Fold a new hit into the best-so-far candidate.
#[inline]
fn merge(best: Option<RayHit>, hit: RayHit) -> Option<RayHit> {
    Some(match best {
        Some(prev) => prev.closer(hit),
        None => hit,
    })
}

impl Octree {
    /// Cast a ray against the mesh and return the nearest hit, if any.
    ///
    /// Fails with [`crate::OctreeError::NotBuilt`] before the tree is
    /// built. The ray direction is not normalized internally; `t` and the
    /// `t_min`/`t_max` bounds are in direction-length units.
    pub fn cast_ray(&self, ray: &Ray, opts: &RayCastOptions) -> Result<Option<RayHit>> {
        self.cast_ray_with_stats(ray, opts).map(|(hit, _)| hit)
    }

    /// Like [`Octree::cast_ray`], also reporting traversal statistics.
    pub fn cast_ray_with_stats(
        &self,
        ray: &Ray,
        opts: &RayCastOptions,
    ) -> Result<(Option<RayHit>, QueryStats)> {
        let root = self.root()?;
        let mut stats = QueryStats::default();

        // No collision with the mesh bounding box at all.
        if hit_test_box(ray, self.node(root).aabb()).is_none() {
            return Ok((None, stats));
        }

        let hit = self.ray_in_node(root, ray, opts, &mut stats);
        Ok((hit, stats))
    }

    fn ray_in_node(
        &self,
        id: NodeId,
        ray: &Ray,
        opts: &RayCastOptions,
        stats: &mut QueryStats,
    ) -> Option<RayHit> {
        stats.boxes_tested += 1;
        let node = self.node(id);

        let mut best: Option<RayHit> = None;
        for face in node.kind().faces() {
            stats.triangles_tested += 1;
            if let Some(mut hit) = hit_test_triangle(ray, &face.a, &face.b, &face.c, opts) {
                hit.face = Some(*face);
                best = merge(best, hit);
            }
        }

        if let NodeKind::Internal { children, .. } = node.kind() {
            for &child in children {
                let Some(box_hit) = hit_test_box(ray, self.node(child).aabb()) else {
                    continue;
                };
                // Box entry behind the current best: the subtree cannot
                // improve on it.
                if best.is_some_and(|b| box_hit.t > b.t) {
                    continue;
                }
                if let Some(hit) = self.ray_in_node(child, ray, opts, stats) {
                    best = merge(best, hit);
                }
            }
        }

        best
    }

    /// Test whether any triangle of the mesh intersects the sphere.
    ///
    /// Existence query: returns as soon as one intersecting triangle is
    /// found. Fails with [`crate::OctreeError::NotBuilt`] before the tree
    /// is built.
    pub fn test_sphere(&self, center: &Point3, radius: f32) -> Result<bool> {
        self.test_sphere_with_stats(center, radius).map(|(hit, _)| hit)
    }

    /// Like [`Octree::test_sphere`], also reporting traversal statistics.
    pub fn test_sphere_with_stats(
        &self,
        center: &Point3,
        radius: f32,
    ) -> Result<(bool, QueryStats)> {
        let root = self.root()?;
        let mut stats = QueryStats::default();

        // All internal comparisons use the squared radius.
        let radius2 = radius * radius;

        if !test_sphere_box(center, radius2, self.node(root).aabb()) {
            return Ok((false, stats));
        }

        let hit = self.sphere_in_node(root, center, radius2, &mut stats);
        Ok((hit, stats))
    }

    fn sphere_in_node(
        &self,
        id: NodeId,
        center: &Point3,
        radius2: f32,
        stats: &mut QueryStats,
    ) -> bool {
        stats.boxes_tested += 1;
        let node = self.node(id);

        for face in node.kind().faces() {
            stats.triangles_tested += 1;
            if test_sphere_triangle(center, radius2, &face.a, &face.b, &face.c) {
                return true;
            }
        }

        if let NodeKind::Internal { children, .. } = node.kind() {
            for &child in children {
                if !test_sphere_box(center, radius2, self.node(child).aabb()) {
                    continue;
                }
                if self.sphere_in_node(child, center, radius2, stats) {
                    return true;
                }
            }
        }

        false
    }
}

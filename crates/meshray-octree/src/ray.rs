//! Ray representation and hit records.

use crate::face::Face;
use meshray_math::{Point3, Vec3};

/// A ray in 3D space defined by origin and direction.
///
/// The direction is used as given and is NOT normalized: the parametric
/// distance `t` of every hit is measured in units of the direction's
/// length. Callers that want `t` in world units should pass a unit
/// direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray (not required to be normalized).
    pub direction: Vec3,
    /// Precomputed reciprocal of direction components for slab tests.
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let inv_direction = Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z);
        Self {
            origin,
            direction,
            inv_direction,
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }

    /// Component-wise reciprocal of the direction.
    ///
    /// Axis-aligned directions carry infinities here; the slab test relies
    /// on IEEE semantics for those.
    #[inline]
    pub fn inv_direction(&self) -> &Vec3 {
        &self.inv_direction
    }
}

/// Options for a ray-cast query.
#[derive(Debug, Clone, Copy)]
pub struct RayCastOptions {
    /// Minimum accepted parametric distance.
    pub t_min: f32,
    /// Maximum accepted parametric distance.
    pub t_max: f32,
    /// Accept triangles whose front face points away from the ray.
    pub test_backfaces: bool,
}

impl Default for RayCastOptions {
    fn default() -> Self {
        Self {
            t_min: 0.0,
            t_max: f32::INFINITY,
            test_backfaces: false,
        }
    }
}

/// Result of a ray-triangle intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Parameter along the ray where the intersection occurs.
    pub t: f32,
    /// 3D intersection point (`origin + t * direction`).
    pub point: Point3,
    /// Unit normal of the struck triangle's plane.
    pub normal: Vec3,
    /// The triangle that was struck, when known.
    pub face: Option<Face>,
}

impl RayHit {
    /// Best-of-two merge: the hit with the smaller `t` wins.
    ///
    /// Pure value-level merge so traversals can fold candidates without
    /// mutating shared state.
    #[inline]
    pub fn closer(self, other: RayHit) -> RayHit {
        if other.t < self.t {
            other
        } else {
            self
        }
    }
}

/// Result of a ray-box intersection.
#[derive(Debug, Clone, Copy)]
pub struct BoxHit {
    /// Parameter along the ray of the box entry point.
    pub t: f32,
    /// Entry point on the box surface (the origin itself when inside).
    pub point: Point3,
    /// Per-axis sign of the struck box side: `+1`/`-1` when the entry
    /// point lies on the max/min face of that axis, `0` otherwise. A ray
    /// starting inside the box reports its own direction here.
    pub side: Vec3,
}

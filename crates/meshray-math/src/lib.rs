#![warn(missing_docs)]

//! Math types for the meshray octree core.
//!
//! Thin wrappers around nalgebra providing single-precision points,
//! vectors, and axis-aligned bounding boxes. Mesh vertex buffers carry
//! `f32` coordinates, so the whole core computes in `f32`.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// Octant corner offsets for bit pattern `(x, y, z)` in {0,1}³, z fastest.
///
/// The enumeration order is fixed: subdivision and insertion both rely on
/// children being visited in this order.
const OCTANT_REF: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
];

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest AABB containing all points of the iterator, or `None` if
    /// the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut aabb = Self::empty();
        let mut any = false;
        for p in points {
            aabb.include_point(&p);
            any = true;
        }
        any.then_some(aabb)
    }

    /// Extent along each axis (`max - min`).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        self.min + self.size() * 0.5
    }

    /// Volume of the box.
    pub fn volume(&self) -> f32 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Grow the box by a per-axis margin in both directions.
    pub fn expand(&mut self, margin: &Vec3) {
        self.min -= *margin;
        self.max += *margin;
    }

    /// Test if `other` is fully contained in this box (componentwise
    /// `other.min >= self.min` and `other.max <= self.max`; a shared
    /// boundary still counts as contained).
    pub fn contains(&self, other: &Aabb3) -> bool {
        !(other.min.x < self.min.x
            || other.min.y < self.min.y
            || other.min.z < self.min.z
            || other.max.x > self.max.x
            || other.max.y > self.max.y
            || other.max.z > self.max.z)
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// The `i`-th octant sub-box (0..8), in the fixed enumeration order.
    ///
    /// The eight octants exactly tile this box: each spans half the parent
    /// extent along every axis.
    pub fn octant(&self, i: usize) -> Aabb3 {
        let half = self.size() * 0.5;
        let r = &OCTANT_REF[i];
        let min = Point3::new(
            self.min.x + half.x * r[0],
            self.min.y + half.y * r[1],
            self.min.z + half.z * r[2],
        );
        Aabb3::new(min, min + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_point_reduction() {
        let mut aabb = Aabb3::empty();
        aabb.include_point(&Point3::new(1.0, -2.0, 3.0));
        aabb.include_point(&Point3::new(-1.0, 2.0, 0.0));
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_points() {
        assert!(Aabb3::from_points(Vec::<Point3>::new()).is_none());
        let aabb =
            Aabb3::from_points([Point3::new(1.0, 0.0, 2.0), Point3::new(0.0, 3.0, 1.0)]).unwrap();
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_size_and_center() {
        let aabb = Aabb3::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, 6.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 4.0, 4.0));
        assert_eq!(aabb.center(), Point3::new(1.0, 2.0, 4.0));
        assert_eq!(aabb.volume(), 64.0);
    }

    #[test]
    fn test_expand() {
        let mut aabb = Aabb3::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        aabb.expand(&Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(aabb.min, Point3::new(-0.1, -0.2, -0.3));
        assert_eq!(aabb.max, Point3::new(1.1, 1.2, 1.3));
    }

    #[test]
    fn test_contains() {
        let outer = Aabb3::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0));
        let inner = Aabb3::new(Point3::new(0.5, 0.5, 0.5), Point3::new(1.5, 1.5, 1.5));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        // A shared boundary still counts as contained.
        assert!(outer.contains(&outer));
        let straddling = Aabb3::new(Point3::new(1.5, 0.5, 0.5), Point3::new(2.5, 1.5, 1.5));
        assert!(!outer.contains(&straddling));
    }

    #[test]
    fn test_octants_tile_parent() {
        let parent = Aabb3::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(3.0, 2.0, 1.0));
        let mut volume = 0.0;
        for i in 0..8 {
            let o = parent.octant(i);
            assert!(parent.contains(&o));
            assert_eq!(o.size(), parent.size() * 0.5);
            volume += o.volume();
        }
        assert!((volume - parent.volume()).abs() < 1e-4);
        // Octants only touch at shared faces: interiors are disjoint.
        for i in 0..8 {
            for j in (i + 1)..8 {
                let a = parent.octant(i);
                let b = parent.octant(j);
                assert!(a.overlaps(&b));
                let overlap_volume = (a.max.x.min(b.max.x) - a.min.x.max(b.min.x))
                    * (a.max.y.min(b.max.y) - a.min.y.max(b.min.y))
                    * (a.max.z.min(b.max.z) - a.min.z.max(b.min.z));
                assert_eq!(overlap_volume, 0.0);
            }
        }
    }

    #[test]
    fn test_octant_order() {
        // z varies fastest, then y, then x.
        let parent = Aabb3::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0));
        assert_eq!(parent.octant(0).min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(parent.octant(1).min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(parent.octant(2).min, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(parent.octant(4).min, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(parent.octant(7).min, Point3::new(1.0, 1.0, 1.0));
    }
}

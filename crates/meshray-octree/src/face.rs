//! Triangle faces owned by the octree.

use meshray_math::{Aabb3, Point3};

/// One triangle, copied out of the source mesh at build time.
///
/// Owning the corner positions decouples the octree from the mesh buffers
/// it was built from: the mesh may be dropped or re-uploaded while the
/// octree keeps serving queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// First corner.
    pub a: Point3,
    /// Second corner.
    pub b: Point3,
    /// Third corner.
    pub c: Point3,
}

impl Face {
    /// Create a face from its three corners.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// The corners as an array, in order.
    pub fn corners(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    /// Bounding box of the three corners.
    pub fn aabb(&self) -> Aabb3 {
        let mut aabb = Aabb3::empty();
        aabb.include_point(&self.a);
        aabb.include_point(&self.b);
        aabb.include_point(&self.c);
        aabb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_aabb() {
        let face = Face::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, -1.0),
            Point3::new(1.0, 3.0, 0.5),
        );
        let aabb = face.aabb();
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(aabb.max, Point3::new(2.0, 3.0, 0.5));
    }
}

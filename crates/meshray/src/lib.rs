#![warn(missing_docs)]

//! meshray — octree-accelerated mesh intersection queries.
//!
//! Builds a static octree over a triangle mesh (flat vertex buffer plus
//! optional index buffer) and answers nearest-hit ray casts and
//! sphere-overlap tests with pruned recursive traversal.
//!
//! # Example
//!
//! ```
//! use meshray::{make_box, Octree, Point3, Ray, RayCastOptions, Vec3};
//!
//! let octree = Octree::from_mesh(&make_box(1.0, 1.0, 1.0))?;
//!
//! // Straight down the Z axis onto the top face of the cube.
//! let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = octree.cast_ray(&ray, &RayCastOptions::default())?.unwrap();
//! assert!((hit.t - 4.5).abs() < 1e-5);
//!
//! // Any geometry within 0.05 of the cube corner?
//! let touching = octree.test_sphere(&Point3::new(0.5, 0.5, 0.5), 0.05)?;
//! assert!(touching);
//! # Ok::<(), meshray::OctreeError>(())
//! ```

pub use meshray_math::{Aabb3, Point3, Vec3};
pub use meshray_mesh::{make_box, make_quad, make_uv_sphere, TriangleMesh};
pub use meshray_octree::{
    intersect, BoxHit, Face, NodeId, NodeKind, Octree, OctreeError, OctreeNode, QueryStats, Ray,
    RayCastOptions, RayHit, Result,
};

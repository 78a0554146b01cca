#![warn(missing_docs)]

//! Octree-accelerated intersection queries over triangle meshes.
//!
//! Builds a static octree from a mesh's vertex and index buffers, then
//! answers ray-cast (nearest hit) and sphere-overlap (existence) queries
//! with box-pruned recursive traversal.
//!
//! # Architecture
//!
//! - [`Ray`], [`RayHit`], [`BoxHit`] - query inputs and hit records
//! - [`intersect`] - stateless geometric intersection routines
//! - [`Face`] - triangles copied out of the mesh at build time
//! - [`Octree`] - arena-backed node tree, builder and queries
//! - [`QueryStats`] - per-query diagnostic counters
//!
//! # Example
//!
//! ```
//! use meshray_math::{Point3, Vec3};
//! use meshray_mesh::make_box;
//! use meshray_octree::{Octree, Ray, RayCastOptions};
//!
//! let octree = Octree::from_mesh(&make_box(1.0, 1.0, 1.0))?;
//!
//! let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = octree.cast_ray(&ray, &RayCastOptions::default())?;
//! assert!(hit.is_some());
//! # Ok::<(), meshray_octree::OctreeError>(())
//! ```

mod error;
mod face;
mod octree;
mod query;
mod ray;

pub mod intersect;

pub use error::{OctreeError, Result};
pub use face::Face;
pub use octree::{
    NodeId, NodeKind, Octree, OctreeNode, MARGIN_RATIO, MAX_NODE_TRIANGLES_RATIO,
    MAX_OCTREE_DEPTH, MIN_MARGIN,
};
pub use query::QueryStats;
pub use ray::{BoxHit, Ray, RayCastOptions, RayHit};

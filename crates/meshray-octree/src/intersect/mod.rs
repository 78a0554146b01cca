//! Geometric intersection routines.
//!
//! Stateless tests over primitive inputs. The octree traversal composes
//! these; they are also usable on their own.

mod aabb;
mod sphere;
mod triangle;

pub use aabb::{hit_test_box, test_sphere_box};
pub use sphere::test_sphere_triangle;
pub use triangle::hit_test_triangle;

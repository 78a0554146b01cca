//! Error types for octree construction and queries.

use thiserror::Error;

/// Errors that can occur while building or querying an octree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctreeError {
    /// The input mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// A query was issued before the octree was built.
    #[error("octree not built")]
    NotBuilt,
}

/// Result type for octree operations.
pub type Result<T> = std::result::Result<T, OctreeError>;

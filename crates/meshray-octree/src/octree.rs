//! Octree construction over triangle meshes.
//!
//! The tree buckets whole faces: a face lives in the deepest node whose
//! box fully contains its bounding box. Faces that straddle a split plane
//! stay in the parent's bucket, so queries must test every visited node's
//! bucket, not just leaves.

use crate::error::{OctreeError, Result};
use crate::face::Face;
use meshray_math::Aabb3;
use meshray_mesh::TriangleMesh;

/// Per-node split threshold as a fraction of the mesh's total face count.
pub const MAX_NODE_TRIANGLES_RATIO: f32 = 0.1;
/// Maximum subdivision depth.
pub const MAX_OCTREE_DEPTH: u32 = 8;
/// Root box margin as a fraction of the box size, per axis.
pub const MARGIN_RATIO: f32 = 0.01;
/// Absolute minimum root box margin, per axis.
pub const MIN_MARGIN: f32 = 0.1;

/// Index of a node in the octree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of an octree node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A node that has not split; owns its face bucket.
    Leaf {
        /// Faces bucketed in this node.
        faces: Vec<Face>,
    },
    /// A node that has split into octant children.
    Internal {
        /// Child ids in fixed octant order. Exactly 8 after the split;
        /// the trim pass removes children with no faces underneath.
        children: Vec<NodeId>,
        /// Faces whose box fits in no single child.
        straddling: Vec<Face>,
    },
}

impl NodeKind {
    /// The faces bucketed directly in this node (leaf bucket or the
    /// straddling bucket of an internal node).
    pub fn faces(&self) -> &[Face] {
        match self {
            NodeKind::Leaf { faces } => faces,
            NodeKind::Internal { straddling, .. } => straddling,
        }
    }
}

/// One cuboid region of the subdivision.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    aabb: Aabb3,
    /// Faces ever inserted into this node or its descendants.
    inside: u32,
    kind: NodeKind,
}

impl OctreeNode {
    fn leaf(aabb: Aabb3) -> Self {
        Self {
            aabb,
            inside: 0,
            kind: NodeKind::Leaf { faces: Vec::new() },
        }
    }

    /// World-space box of this node.
    pub fn aabb(&self) -> &Aabb3 {
        &self.aabb
    }

    /// Leaf bucket or children plus straddling bucket.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

/// Octree over the triangles of a mesh, for accelerated ray-cast and
/// sphere-overlap queries.
///
/// Built once from a static mesh and immutable afterwards; a `&Octree`
/// can be shared freely across threads for concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    root: Option<NodeId>,
    total_depth: u32,
    total_nodes: u32,
    total_triangles: u32,
    max_node_triangles: f32,
}

impl Octree {
    /// Create an empty, unbuilt octree. Queries fail with
    /// [`OctreeError::NotBuilt`] until [`Octree::build_from_mesh`] runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an octree from a mesh in one step.
    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        let mut octree = Self::new();
        octree.build_from_mesh(mesh)?;
        Ok(octree)
    }

    /// Build the tree from a mesh, replacing any previous contents.
    ///
    /// Faces are copied out of the mesh buffers; the mesh is not retained.
    /// The root box is the mesh's bounding box expanded by a per-axis
    /// margin so faces lying exactly on the boundary still classify as
    /// inside.
    pub fn build_from_mesh(&mut self, mesh: &TriangleMesh) -> Result<()> {
        self.nodes.clear();
        self.root = None;
        self.total_depth = 0;
        self.total_nodes = 0;

        let total = mesh.num_triangles();
        if total == 0 {
            return Err(OctreeError::EmptyMesh);
        }
        // num_triangles > 0 implies a non-empty vertex buffer.
        let mut aabb = mesh.aabb().ok_or(OctreeError::EmptyMesh)?;

        let margin = (aabb.size() * MARGIN_RATIO).map(|m| m.max(MIN_MARGIN));
        aabb.expand(&margin);

        self.total_triangles = total as u32;
        self.max_node_triangles = total as f32 * MAX_NODE_TRIANGLES_RATIO;

        self.nodes.push(OctreeNode::leaf(aabb));
        let root = NodeId(0);
        self.root = Some(root);

        for i in 0..total {
            let [a, b, c] = mesh.triangle(i);
            self.add_to_node(root, Face::new(a, b, c), 0);
        }

        self.total_nodes = self.trim(root);
        Ok(())
    }

    /// Whether the tree has been built.
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Root node id, or `Err(NotBuilt)` before construction.
    pub fn root(&self) -> Result<NodeId> {
        self.root.ok_or(OctreeError::NotBuilt)
    }

    /// Access a node of the built tree.
    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.nodes[id.index()]
    }

    /// Deepest subdivision level reached during the build (root = 0).
    pub fn total_depth(&self) -> u32 {
        self.total_depth
    }

    /// Number of nodes reachable from the root after trimming.
    pub fn total_nodes(&self) -> u32 {
        self.total_nodes
    }

    /// Number of faces the tree was built from.
    pub fn total_triangles(&self) -> u32 {
        self.total_triangles
    }

    /// Insert a face into `id`'s subtree.
    ///
    /// Children are tested in fixed octant order and the first whose box
    /// fully contains the face's box wins; a face straddling a split
    /// plane matches no child and stays in this node's bucket.
    fn add_to_node(&mut self, id: NodeId, face: Face, depth: u32) {
        self.nodes[id.index()].inside += 1;

        if matches!(self.nodes[id.index()].kind, NodeKind::Internal { .. }) {
            match self.find_containing_child(id, &face.aabb()) {
                Some(child) => self.add_to_node(child, face, depth + 1),
                None => self.push_straddling(id, face),
            }
            return;
        }

        let bucket_len = {
            let NodeKind::Leaf { faces } = &mut self.nodes[id.index()].kind else {
                unreachable!("checked above");
            };
            faces.push(face);
            faces.len()
        };
        if bucket_len as f32 > self.max_node_triangles && depth < MAX_OCTREE_DEPTH {
            self.split_node(id, depth);
        }
    }

    /// Append a face to an internal node's straddling bucket.
    fn push_straddling(&mut self, id: NodeId, face: Face) {
        if let NodeKind::Internal { straddling, .. } = &mut self.nodes[id.index()].kind {
            straddling.push(face);
        }
    }

    /// Split a leaf into 8 equal-volume octant children and redistribute
    /// its bucket. Runs at most once per node: a node that has children
    /// never re-splits, so a growing straddling bucket is never re-cut.
    fn split_node(&mut self, id: NodeId, depth: u32) {
        if self.total_depth < depth + 1 {
            self.total_depth = depth + 1;
        }

        let aabb = self.nodes[id.index()].aabb;
        let children: Vec<NodeId> = (0..8usize)
            .map(|i| {
                let child = NodeId(self.nodes.len() as u32);
                self.nodes.push(OctreeNode::leaf(aabb.octant(i)));
                child
            })
            .collect();
        self.total_nodes += 8;

        let snapshot = std::mem::replace(
            &mut self.nodes[id.index()].kind,
            NodeKind::Internal {
                children,
                straddling: Vec::new(),
            },
        );
        let NodeKind::Leaf { faces } = snapshot else {
            unreachable!("split_node is only called on leaves");
        };

        for face in faces {
            match self.find_containing_child(id, &face.aabb()) {
                Some(child) => self.add_to_node(child, face, depth + 1),
                None => self.push_straddling(id, face),
            }
        }
    }

    /// First child (in octant order) whose box fully contains `aabb`.
    fn find_containing_child(&self, id: NodeId, aabb: &Aabb3) -> Option<NodeId> {
        let NodeKind::Internal { children, .. } = &self.nodes[id.index()].kind else {
            return None;
        };
        children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.index()].aabb.contains(aabb))
    }

    /// Drop children with no faces underneath; returns the number of
    /// surviving nodes in `id`'s subtree. The root is never dropped, even
    /// when empty.
    fn trim(&mut self, id: NodeId) -> u32 {
        let kept: Vec<NodeId> = match &self.nodes[id.index()].kind {
            NodeKind::Leaf { .. } => return 1,
            NodeKind::Internal { children, .. } => children
                .iter()
                .copied()
                .filter(|&child| self.nodes[child.index()].inside > 0)
                .collect(),
        };

        let mut num = 1;
        for &child in &kept {
            num += self.trim(child);
        }

        if let NodeKind::Internal { children, .. } = &mut self.nodes[id.index()].kind {
            *children = kept;
        }
        num
    }

    /// Iterate over the reachable nodes of the built tree (pre-order).
    pub fn iter_nodes(&self) -> impl Iterator<Item = &OctreeNode> + '_ {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id.index()];
            if let NodeKind::Internal { children, .. } = &node.kind {
                stack.extend(children.iter().rev().copied());
            }
            Some(node)
        })
    }
}

#![warn(missing_docs)]

//! Triangle mesh buffers for the meshray octree builder.
//!
//! The octree core consumes a mesh only through its flat vertex-position
//! buffer and optional triangle-index buffer; how those buffers were
//! produced (file import, GPU readback, procedural generation) is not this
//! crate's concern. The procedural builders here exist for tests, benches,
//! and examples.

use meshray_math::{Aabb3, Point3};

/// A triangle mesh held as flat buffers.
///
/// Vertex positions are `[x0, y0, z0, x1, y1, z1, ...]`. When `indices` is
/// present, every 3 indices form one triangle; otherwise the vertex buffer
/// is consumed sequentially in groups of 9 floats as a triangle soup.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions (3 floats per vertex).
    pub vertices: Vec<f32>,
    /// Optional flat array of triangle indices (3 per triangle).
    pub indices: Option<Vec<u32>>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an indexed mesh from position and index buffers.
    pub fn indexed(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices: Some(indices),
        }
    }

    /// Create an unindexed triangle soup (9 floats per triangle).
    pub fn soup(vertices: Vec<f32>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    /// Number of vertices in the position buffer.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 9,
        }
    }

    /// The `i`-th vertex position.
    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(
            self.vertices[i * 3],
            self.vertices[i * 3 + 1],
            self.vertices[i * 3 + 2],
        )
    }

    /// The corner positions of the `i`-th triangle.
    pub fn triangle(&self, i: usize) -> [Point3; 3] {
        match &self.indices {
            Some(indices) => [
                self.vertex(indices[i * 3] as usize),
                self.vertex(indices[i * 3 + 1] as usize),
                self.vertex(indices[i * 3 + 2] as usize),
            ],
            None => [
                self.vertex(i * 3),
                self.vertex(i * 3 + 1),
                self.vertex(i * 3 + 2),
            ],
        }
    }

    /// Bounding box of the vertex buffer, or `None` for an empty mesh.
    pub fn aabb(&self) -> Option<Aabb3> {
        Aabb3::from_points((0..self.num_vertices()).map(|i| self.vertex(i)))
    }

    /// Flatten an indexed mesh into an equivalent triangle soup.
    ///
    /// A mesh that is already a soup is returned unchanged.
    pub fn deindex(&self) -> TriangleMesh {
        match &self.indices {
            None => self.clone(),
            Some(indices) => {
                let mut vertices = Vec::with_capacity(indices.len() * 3);
                for &idx in indices {
                    let base = idx as usize * 3;
                    vertices.extend_from_slice(&self.vertices[base..base + 3]);
                }
                TriangleMesh::soup(vertices)
            }
        }
    }
}

/// Build an axis-aligned box centered at the origin with dimensions
/// `(sx, sy, sz)`.
///
/// 8 vertices, 12 triangles, outward-facing winding (CCW viewed from
/// outside). Vertex layout:
/// ```text
///     v4----v5
///    /|    /|
///   v7----v6|    z
///   | v0--|-v1   | y
///   |/    |/     |/
///   v3----v2     +---x
/// ```
pub fn make_box(sx: f32, sy: f32, sz: f32) -> TriangleMesh {
    let (hx, hy, hz) = (sx * 0.5, sy * 0.5, sz * 0.5);
    let vertices = vec![
        -hx, -hy, -hz, // v0
        hx, -hy, -hz, // v1
        hx, hy, -hz, // v2
        -hx, hy, -hz, // v3
        -hx, -hy, hz, // v4
        hx, -hy, hz, // v5
        hx, hy, hz, // v6
        -hx, hy, hz, // v7
    ];
    // One quad per face, CCW viewed from outside, split into two triangles.
    let quads: [[u32; 4]; 6] = [
        [0, 3, 2, 1], // bottom (-Z)
        [4, 5, 6, 7], // top (+Z)
        [0, 1, 5, 4], // front (-Y)
        [2, 3, 7, 6], // back (+Y)
        [0, 4, 7, 3], // left (-X)
        [1, 2, 6, 5], // right (+X)
    ];
    let mut indices = Vec::with_capacity(36);
    for q in &quads {
        indices.extend_from_slice(&[q[0], q[1], q[2]]);
        indices.extend_from_slice(&[q[0], q[2], q[3]]);
    }
    TriangleMesh::indexed(vertices, indices)
}

/// Build a square quad of side `size` in the XY plane at z = 0, facing +Z.
pub fn make_quad(size: f32) -> TriangleMesh {
    let h = size * 0.5;
    let vertices = vec![-h, -h, 0.0, h, -h, 0.0, h, h, 0.0, -h, h, 0.0];
    let indices = vec![0, 1, 2, 0, 2, 3];
    TriangleMesh::indexed(vertices, indices)
}

/// Build a UV sphere of the given radius centered at the origin.
///
/// `segments` is the longitude division count (min 3), `rings` the latitude
/// band count (min 2). Outward-facing winding.
pub fn make_uv_sphere(radius: f32, segments: u32, rings: u32) -> TriangleMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::new();
    // North pole, interior rings, south pole.
    vertices.extend_from_slice(&[0.0, 0.0, radius]);
    for r in 1..rings {
        let theta = std::f32::consts::PI * r as f32 / rings as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for s in 0..segments {
            let phi = std::f32::consts::TAU * s as f32 / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            vertices.extend_from_slice(&[
                radius * sin_t * cos_p,
                radius * sin_t * sin_p,
                radius * cos_t,
            ]);
        }
    }
    vertices.extend_from_slice(&[0.0, 0.0, -radius]);

    let ring_vertex = |r: u32, s: u32| 1 + (r - 1) * segments + (s % segments);
    let north = 0u32;
    let south = 1 + (rings - 1) * segments;

    let mut indices = Vec::new();
    // Top fan.
    for s in 0..segments {
        indices.extend_from_slice(&[north, ring_vertex(1, s), ring_vertex(1, s + 1)]);
    }
    // Quads between consecutive rings.
    for r in 1..rings - 1 {
        for s in 0..segments {
            let a = ring_vertex(r, s);
            let b = ring_vertex(r, s + 1);
            let c = ring_vertex(r + 1, s + 1);
            let d = ring_vertex(r + 1, s);
            indices.extend_from_slice(&[a, d, c]);
            indices.extend_from_slice(&[a, c, b]);
        }
    }
    // Bottom fan.
    for s in 0..segments {
        indices.extend_from_slice(&[south, ring_vertex(rings - 1, s + 1), ring_vertex(rings - 1, s)]);
    }

    TriangleMesh::indexed(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meshray_math::Vec3;

    #[test]
    fn test_box_counts() {
        let mesh = make_box(1.0, 1.0, 1.0);
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_triangles(), 12);
    }

    #[test]
    fn test_box_aabb() {
        let mesh = make_box(2.0, 4.0, 6.0);
        let aabb = mesh.aabb().unwrap();
        assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center().coords, Vec3::zeros());
    }

    #[test]
    fn test_box_winding_outward() {
        // Every triangle normal must point away from the box center.
        let mesh = make_box(1.0, 1.0, 1.0);
        for i in 0..mesh.num_triangles() {
            let [a, b, c] = mesh.triangle(i);
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "triangle {i} winds inward");
        }
    }

    #[test]
    fn test_soup_triangle_access() {
        let mesh = make_quad(2.0).deindex();
        assert!(mesh.indices.is_none());
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.num_vertices(), 6);
        let [a, _, c] = mesh.triangle(0);
        assert_eq!(a, Point3::new(-1.0, -1.0, 0.0));
        assert_eq!(c, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_deindex_preserves_triangles() {
        let mesh = make_box(2.0, 2.0, 2.0);
        let soup = mesh.deindex();
        assert_eq!(soup.num_triangles(), mesh.num_triangles());
        for i in 0..mesh.num_triangles() {
            assert_eq!(soup.triangle(i), mesh.triangle(i));
        }
    }

    #[test]
    fn test_uv_sphere_on_surface() {
        let radius = 2.5;
        let mesh = make_uv_sphere(radius, 12, 6);
        assert_eq!(mesh.num_vertices() as u32, 2 + 5 * 12);
        assert_eq!(mesh.num_triangles() as u32, 2 * 12 + 4 * 12 * 2);
        for i in 0..mesh.num_vertices() {
            assert_relative_eq!(mesh.vertex(i).coords.norm(), radius, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_uv_sphere_winding_outward() {
        let mesh = make_uv_sphere(1.0, 8, 4);
        for i in 0..mesh.num_triangles() {
            let [a, b, c] = mesh.triangle(i);
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "triangle {i} winds inward");
        }
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangleMesh::new();
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.aabb().is_none());
    }
}

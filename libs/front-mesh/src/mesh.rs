//! # Mesh Data Structure
//!
//! Output of a triangulation run: vertex positions, optional unit normals
//! and triangle index triples.

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A triangle mesh with vertices and indices.
///
/// All geometry uses f64.
///
/// # Example
///
/// ```rust
/// use front_mesh::primitives::{create_sphere_with_holes, SphereParams};
///
/// let mesh = create_sphere_with_holes(&SphereParams::default()).unwrap();
/// assert_eq!(mesh.euler_characteristic(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional unit vertex normals (implicit surfaces only)
    normals: Option<Vec<DVec3>>,
}

impl Mesh {
    /// Creates a mesh from its parts.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
        normals: Option<Vec<DVec3>>,
    ) -> Self {
        Self {
            vertices,
            triangles,
            normals,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Counts how many triangles use each undirected edge.
    fn edge_usage(&self) -> HashMap<(u32, u32), usize> {
        let mut usage = HashMap::with_capacity(self.triangles.len() * 3 / 2 + 1);
        for tri in &self.triangles {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                *usage.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        usage
    }

    /// Returns the number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_usage().len()
    }

    /// Returns the edges used by exactly one triangle, sorted.
    pub fn boundary_edges(&self) -> Vec<[u32; 2]> {
        let mut edges: Vec<[u32; 2]> = self
            .edge_usage()
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|((a, b), _)| [a, b])
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Returns true if some edge is shared by more than two triangles.
    pub fn has_non_manifold_edges(&self) -> bool {
        self.edge_usage().values().any(|&count| count > 2)
    }

    /// Euler characteristic `V - E + F` over the referenced vertices.
    pub fn euler_characteristic(&self) -> i64 {
        let mut used = vec![false; self.vertices.len()];
        for tri in &self.triangles {
            for &v in tri {
                used[v as usize] = true;
            }
        }
        let v = used.iter().filter(|&&u| u).count() as i64;
        let e = self.edge_count() as i64;
        let f = self.triangles.len() as i64;
        v - e + f
    }

    /// Returns the (shortest, longest) edge length, or `None` for an empty mesh.
    pub fn edge_length_range(&self) -> Option<(f64, f64)> {
        if self.triangles.is_empty() {
            return None;
        }
        let mut range = (f64::INFINITY, 0.0_f64);
        for tri in &self.triangles {
            for k in 0..3 {
                let len = self
                    .vertex(tri[k])
                    .distance(self.vertex(tri[(k + 1) % 3]));
                range.0 = range.0.min(len);
                range.1 = range.1.max(len);
            }
        }
        Some(range)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex
    /// - No zero-area triangles
    /// - Normals, if present, are parallel to the position array
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        if let Some(normals) = &self.normals {
            if normals.len() != self.vertices.len() {
                return false;
            }
        }

        for tri in &self.triangles {
            if tri.iter().any(|&v| v >= vertex_count) {
                return false;
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let area = (v1 - v0).cross(v2 - v0).length();
            if area < DEGENERATE_AREA_EPSILON {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Regular tetrahedron, outward winding.
    fn tetrahedron() -> Mesh {
        Mesh::from_parts(
            vec![
                DVec3::new(1.0, 1.0, 1.0),
                DVec3::new(-1.0, -1.0, 1.0),
                DVec3::new(-1.0, 1.0, -1.0),
                DVec3::new(1.0, -1.0, -1.0),
            ],
            vec![[0, 1, 3], [0, 2, 1], [0, 3, 2], [1, 2, 3]],
            None,
        )
    }

    #[test]
    fn test_mesh_default_is_empty() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.edge_length_range().is_none());
    }

    #[test]
    fn test_tetrahedron_topology() {
        let mesh = tetrahedron();
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert!(mesh.boundary_edges().is_empty());
        assert!(!mesh.has_non_manifold_edges());
        assert!(mesh.validate());
    }

    #[test]
    fn test_single_triangle_boundary() {
        let mesh = Mesh::from_parts(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![[0, 1, 2]], None);
        assert_eq!(mesh.boundary_edges(), vec![[0, 1], [0, 2], [1, 2]]);
        assert_eq!(mesh.euler_characteristic(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mesh = Mesh::from_parts(vec![DVec3::ZERO], vec![[0, 1, 2]], None);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_validate_rejects_short_normals() {
        let mesh = Mesh::from_parts(vec![DVec3::ZERO, DVec3::X], vec![], Some(vec![DVec3::Z]));
        assert!(!mesh.validate());
    }

    #[test]
    fn test_edge_length_range() {
        let mesh = Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), DVec3::new(0.0, 4.0, 0.0)],
            vec![[0, 1, 2]],
            None,
        );
        assert_eq!(mesh.edge_length_range(), Some((3.0, 5.0)));
    }
}

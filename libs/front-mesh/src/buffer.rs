//! # Mesh Buffer
//!
//! Pre-sized, append-only storage that the front algorithm writes into.
//!
//! ## Cursors
//!
//! The vertex cursor and the triangle cursor only move forward. Pushing past
//! the declared capacity is an error, the buffer never grows beyond it.

use crate::error::{BufferKind, MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

// =============================================================================
// MESH BUILDER
// =============================================================================

/// Append-only vertex and triangle buffer with fixed capacities.
///
/// Every vertex carries a unit normal. Normals are needed internally to
/// build tangent frames; whether they end up in the output is decided by
/// [`MeshBuilder::finish`].
///
/// # Example
///
/// ```rust
/// use front_mesh::MeshBuilder;
/// use glam::DVec3;
///
/// let mut builder = MeshBuilder::new(3, 1);
/// let a = builder.push_vertex(DVec3::ZERO, DVec3::Z).unwrap();
/// let b = builder.push_vertex(DVec3::X, DVec3::Z).unwrap();
/// let c = builder.push_vertex(DVec3::Y, DVec3::Z).unwrap();
/// builder.push_triangle([a, b, c]).unwrap();
/// assert!(builder.push_vertex(DVec3::ONE, DVec3::Z).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    max_vertices: usize,
    max_triangles: usize,
}

impl MeshBuilder {
    /// Creates a buffer able to hold `max_vertices` vertices and
    /// `max_triangles` triangles.
    pub fn new(max_vertices: usize, max_triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(max_vertices),
            normals: Vec::with_capacity(max_vertices),
            triangles: Vec::with_capacity(max_triangles),
            max_vertices,
            max_triangles,
        }
    }

    /// Appends a vertex and returns its index.
    ///
    /// # Errors
    ///
    /// [`MeshError::CapacityExceeded`] once the vertex cursor reaches
    /// `max_vertices`.
    pub fn push_vertex(&mut self, position: DVec3, normal: DVec3) -> MeshResult<u32> {
        if self.positions.len() >= self.max_vertices {
            return Err(MeshError::CapacityExceeded {
                buffer: BufferKind::Vertices,
                max: self.max_vertices,
            });
        }
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        Ok(index)
    }

    /// Appends a triangle.
    ///
    /// # Errors
    ///
    /// [`MeshError::CapacityExceeded`] once the triangle cursor reaches
    /// `max_triangles`.
    pub fn push_triangle(&mut self, triangle: [u32; 3]) -> MeshResult<()> {
        if self.triangles.len() >= self.max_triangles {
            return Err(MeshError::CapacityExceeded {
                buffer: BufferKind::Triangles,
                max: self.max_triangles,
            });
        }
        debug_assert!(triangle.iter().all(|&v| (v as usize) < self.positions.len()));
        self.triangles.push(triangle);
        Ok(())
    }

    /// Position of vertex `index`.
    #[inline]
    pub fn position(&self, index: u32) -> DVec3 {
        self.positions[index as usize]
    }

    /// Unit normal of vertex `index`.
    #[inline]
    pub fn normal(&self, index: u32) -> DVec3 {
        self.normals[index as usize]
    }

    /// Number of vertices written so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles written so far.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Declared vertex capacity.
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Declared triangle capacity.
    pub fn max_triangles(&self) -> usize {
        self.max_triangles
    }

    /// Consumes the buffer and returns the written prefix as a [`Mesh`].
    pub fn finish(self, export_normals: bool) -> Mesh {
        let normals = export_normals.then_some(self.normals);
        Mesh::from_parts(self.positions, self.triangles, normals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_sequential_indices() {
        let mut builder = MeshBuilder::new(4, 2);
        assert_eq!(builder.push_vertex(DVec3::ZERO, DVec3::Z).unwrap(), 0);
        assert_eq!(builder.push_vertex(DVec3::X, DVec3::Z).unwrap(), 1);
        assert_eq!(builder.vertex_count(), 2);
        assert_eq!(builder.position(1), DVec3::X);
        assert_eq!(builder.normal(1), DVec3::Z);
    }

    #[test]
    fn test_vertex_capacity_exceeded() {
        let mut builder = MeshBuilder::new(1, 1);
        builder.push_vertex(DVec3::ZERO, DVec3::Z).unwrap();
        let err = builder.push_vertex(DVec3::X, DVec3::Z).unwrap_err();
        assert!(matches!(
            err,
            MeshError::CapacityExceeded {
                buffer: BufferKind::Vertices,
                max: 1
            }
        ));
        assert_eq!(builder.vertex_count(), 1);
    }

    #[test]
    fn test_triangle_capacity_exceeded() {
        let mut builder = MeshBuilder::new(3, 1);
        for p in [DVec3::ZERO, DVec3::X, DVec3::Y] {
            builder.push_vertex(p, DVec3::Z).unwrap();
        }
        builder.push_triangle([0, 1, 2]).unwrap();
        let err = builder.push_triangle([0, 2, 1]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::CapacityExceeded {
                buffer: BufferKind::Triangles,
                ..
            }
        ));
        assert_eq!(builder.triangle_count(), 1);
    }

    #[test]
    fn test_finish_controls_normals() {
        let mut builder = MeshBuilder::new(3, 1);
        for p in [DVec3::ZERO, DVec3::X, DVec3::Y] {
            builder.push_vertex(p, DVec3::Z).unwrap();
        }
        builder.push_triangle([0, 1, 2]).unwrap();

        let with = builder.clone().finish(true);
        assert_eq!(with.normals().map(<[DVec3]>::len), Some(3));

        let without = builder.finish(false);
        assert!(without.normals().is_none());
        assert_eq!(without.triangle_count(), 1);
    }
}

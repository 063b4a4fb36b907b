//! # Implicit Surfaces
//!
//! Triangulates the component of `F(x, y, z) = 0` that contains the
//! projection of a seed point, optionally clipped to a box. Output meshes
//! carry unit-gradient normals.

use crate::aabb::Aabb;
use crate::engine::{MeshingOptions, Triangulator};
use crate::error::MeshResult;
use crate::front::AngleMethod;
use crate::mesh::Mesh;
use crate::surface::{BoundedImplicitSurface, ImplicitFunction, ImplicitSurface, SurfaceProjector};
use config::constants::{DEFAULT_MAX_TRIANGLES, DEFAULT_MAX_VERTICES, DEFAULT_NEWTON_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Implicit surface run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplicitParams {
    /// Point near the surface where meshing starts.
    pub seed: DVec3,
    /// Target edge length.
    pub d: f64,
    /// Newton convergence epsilon.
    pub epsilon: f64,
    /// Triangle capacity.
    pub max_triangles: usize,
    /// Vertex capacity.
    pub max_vertices: usize,
    /// Clipping box `[xmax, xmin, ymax, ymin, zmax, zmin]`.
    pub bounds: Option<[f64; 6]>,
    /// Front angle evaluation.
    pub angle_method: AngleMethod,
}

impl Default for ImplicitParams {
    fn default() -> Self {
        Self {
            seed: DVec3::X,
            d: 0.1,
            epsilon: DEFAULT_NEWTON_EPSILON,
            max_triangles: DEFAULT_MAX_TRIANGLES,
            max_vertices: DEFAULT_MAX_VERTICES,
            bounds: None,
            angle_method: AngleMethod::default(),
        }
    }
}

impl ImplicitParams {
    fn options(&self) -> MeshingOptions {
        MeshingOptions::new(self.d)
            .with_capacities(self.max_vertices, self.max_triangles)
            .with_angle_method(self.angle_method)
    }
}

/// Triangulates an implicit surface from `params.seed`.
///
/// # Errors
///
/// - [`MeshError::InvalidEpsilon`](crate::MeshError::InvalidEpsilon) for a
///   non-positive epsilon
/// - any error of [`Triangulator::new`] or [`Triangulator::run`]
///
/// # Example
///
/// ```rust
/// use front_mesh::primitives::{create_implicit_surface, ImplicitParams};
/// use front_mesh::surface::implicit_fn;
/// use glam::DVec3;
///
/// let sphere = implicit_fn(|p: DVec3| p.length_squared() - 1.0, |p: DVec3| 2.0 * p);
/// let params = ImplicitParams { d: 0.25, ..ImplicitParams::default() };
/// let mesh = create_implicit_surface(&params, sphere).unwrap();
/// assert_eq!(mesh.euler_characteristic(), 2);
/// assert!(mesh.normals().is_some());
/// ```
pub fn create_implicit_surface<F: ImplicitFunction>(params: &ImplicitParams, function: F) -> MeshResult<Mesh> {
    let surface = ImplicitSurface::new(function, params.epsilon)?;
    match params.bounds {
        Some(extents) => {
            let bounds = Aabb::from_extents(extents);
            debug!("Clipping implicit surface to {:?}", bounds);
            seed_and_run(BoundedImplicitSurface::new(surface, bounds), params)
        }
        None => seed_and_run(surface, params),
    }
}

fn seed_and_run<S: SurfaceProjector>(surface: S, params: &ImplicitParams) -> MeshResult<Mesh> {
    let mut tri = Triangulator::new(surface, params.options())?;
    tri.seed_at(params.seed)?;
    tri.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::surface::{implicit_fn, implicit_from_partials};

    fn unit_sphere() -> impl ImplicitFunction {
        implicit_from_partials(
            |x, y, z| x * x + y * y + z * z - 1.0,
            |x, _, _| 2.0 * x,
            |_, y, _| 2.0 * y,
            |_, _, z| 2.0 * z,
        )
    }

    #[test]
    fn test_unit_sphere_normals_and_residual() {
        let params = ImplicitParams {
            seed: DVec3::X,
            d: 0.1,
            epsilon: 1e-9,
            ..ImplicitParams::default()
        };
        let function = unit_sphere();
        let mesh = create_implicit_surface(&params, &function).unwrap();

        assert_eq!(mesh.euler_characteristic(), 2);
        let normals = mesh.normals().unwrap();
        assert_eq!(normals.len(), mesh.vertex_count());
        for (p, n) in mesh.vertices().iter().zip(normals) {
            assert!(n.dot(p.normalize()) > 1.0 - 1e-6);
            assert!(function.value(*p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ellipsoid_is_closed() {
        let ellipsoid = implicit_fn(
            |p: DVec3| p.x * p.x / 4.0 + p.y * p.y + p.z * p.z / 2.25 - 1.0,
            |p: DVec3| DVec3::new(p.x / 2.0, 2.0 * p.y, p.z / 1.125),
        );
        let params = ImplicitParams {
            seed: DVec3::new(2.5, 0.1, 0.0),
            d: 0.2,
            ..ImplicitParams::default()
        };
        let mesh = create_implicit_surface(&params, ellipsoid).unwrap();
        assert_eq!(mesh.euler_characteristic(), 2);
        assert!(mesh.boundary_edges().is_empty());
    }

    #[test]
    fn test_bounded_sphere_stays_in_box() {
        let params = ImplicitParams {
            seed: DVec3::NEG_X,
            d: 0.1,
            bounds: Some([0.6, -1.1, 1.1, -1.1, 1.1, -1.1]),
            ..ImplicitParams::default()
        };
        let mesh = create_implicit_surface(&params, unit_sphere()).unwrap();

        assert!(!mesh.boundary_edges().is_empty());
        assert_eq!(mesh.normals().map(<[DVec3]>::len), Some(mesh.vertex_count()));
        for p in mesh.vertices() {
            assert!(p.x <= 0.6 + 1e-9);
        }
    }

    #[test]
    fn test_capacity_exceeded() {
        let params = ImplicitParams {
            max_triangles: 10,
            ..ImplicitParams::default()
        };
        assert!(matches!(
            create_implicit_surface(&params, unit_sphere()),
            Err(MeshError::CapacityExceeded { max: 10, .. })
        ));
    }

    #[test]
    fn test_rejects_epsilon() {
        let params = ImplicitParams {
            epsilon: 0.0,
            ..ImplicitParams::default()
        };
        assert_eq!(
            create_implicit_surface(&params, unit_sphere()).unwrap_err(),
            MeshError::InvalidEpsilon(0.0)
        );
    }
}

//! # Primitives
//!
//! Ready-made triangulation runs: sphere and cylinder with holes, planar
//! regions with holes and implicit surfaces.
//!
//! Each entry point builds the surface projector and the initial fronts,
//! sizes the buffers from the primitive's detail and runs the
//! [`Triangulator`](crate::Triangulator). The sphere, cylinder and plane
//! parameter structs also expose `triangulator()` to inspect a run with
//! [`run_with_stats`](crate::Triangulator::run_with_stats).

pub mod cylinder;
pub mod implicit;
pub mod plane;
pub mod sphere;

pub use cylinder::{create_cylinder_with_holes, CylinderHole, CylinderParams};
pub use implicit::{create_implicit_surface, ImplicitParams};
pub use plane::{create_plane_region, PlaneBoundary, PlaneRegionParams};
pub use sphere::{create_sphere_with_holes, SphereHole, SphereParams};

use crate::error::{MeshError, MeshResult};

/// Buffer capacity `detail² · factor`.
fn capacity(detail: usize, factor: usize) -> usize {
    detail * detail * factor
}

/// Rejects a quarter-circle division of zero.
fn check_div4(name: &str, div4: u32) -> MeshResult<()> {
    if div4 == 0 {
        return Err(MeshError::invalid(format!("{name} must be at least 1")));
    }
    Ok(())
}

//! # Front Mesh
//!
//! Advancing-front triangulation of smooth surfaces with near-uniform edge
//! length, honoring holes and open boundaries.
//!
//! ## Architecture
//!
//! ```text
//! contours / seed ─▶ FrontSet ─▶ Triangulator ─▶ MeshBuilder ─▶ Mesh
//!                                     │
//!                              SurfaceProjector
//!                 (sphere, cylinder, plane, parametric, implicit)
//! ```
//!
//! ## Algorithm
//!
//! - **Fronts**: closed vertex loops between meshed and unmeshed surface
//! - **Emission**: a fan of triangles at the smallest front angle
//! - **Projection**: new points land on the surface (closed form or Newton)
//! - **Merge / split**: fronts that come within `d` of each other (or of
//!   themselves) are joined or cut
//!
//! ## Usage
//!
//! ```rust
//! use front_mesh::primitives::{create_sphere_with_holes, SphereHole, SphereParams};
//!
//! let params = SphereParams {
//!     holes: vec![SphereHole::Circular { theta: 1.0, phi: 0.5, div4: 3 }],
//!     ..SphereParams::default()
//! };
//! let mesh = create_sphere_with_holes(&params).unwrap();
//! assert_eq!(mesh.euler_characteristic(), 1);
//! ```

pub mod aabb;
pub mod buffer;
pub mod contour;
pub mod engine;
pub mod error;
pub mod front;
pub mod mesh;
pub mod primitives;
pub mod surface;

pub use aabb::Aabb;
pub use buffer::MeshBuilder;
pub use engine::{MeshingOptions, RunStats, Triangulator};
pub use error::{BufferKind, MeshError, MeshResult};
pub use front::AngleMethod;
pub use mesh::Mesh;
pub use surface::{SurfacePoint, SurfaceProjector, TangentFrame};

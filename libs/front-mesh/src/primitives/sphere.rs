//! # Sphere With Holes
//!
//! Sphere around the origin whose radius follows from the edge length:
//! a great circle divided into `4·div4` chords of length `d`.
//!
//! Holes are either small circles cut by a plane (`4·div4` points on the
//! circle of radius `d / (2·sin(π/(4·div4)))`) or point lists given in
//! spherical coordinates. Without holes the run starts from a single
//! triangle at the pole.

use super::{capacity, check_div4};
use crate::contour::circle_contour;
use crate::engine::{MeshingOptions, Triangulator};
use crate::error::{MeshError, MeshResult};
use crate::front::AngleMethod;
use crate::mesh::Mesh;
use crate::surface::{direction, Sphere};
use config::constants::{chord_length, circumradius, DEFAULT_DIV4, SPHERE_TRIANGLE_FACTOR, SPHERE_VERTEX_FACTOR};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

/// A hole in the sphere.
///
/// Angles are spherical coordinates: `theta` from the +y pole, `phi` around
/// the y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SphereHole {
    /// Circle of `4·div4` points centered at `(theta, phi)`.
    Circular { theta: f64, phi: f64, div4: u32 },
    /// Closed point loop `(theta, phi)`, counter-clockwise seen from outside.
    Points(Vec<(f64, f64)>),
}

/// Sphere parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    /// Target edge length.
    pub d: f64,
    /// Division of a quarter great circle.
    pub div4: u32,
    /// Holes, each one an initial front.
    pub holes: Vec<SphereHole>,
    /// Front angle evaluation.
    pub angle_method: AngleMethod,
}

impl Default for SphereParams {
    /// Unit sphere with 24 great circle divisions.
    fn default() -> Self {
        Self {
            d: chord_length(1.0, 4 * DEFAULT_DIV4),
            div4: DEFAULT_DIV4,
            holes: Vec::new(),
            angle_method: AngleMethod::default(),
        }
    }
}

impl SphereParams {
    /// Great circle division `4·div4`.
    pub fn detail(&self) -> u32 {
        4 * self.div4
    }

    /// Sphere radius.
    pub fn radius(&self) -> f64 {
        circumradius(self.d, self.detail())
    }

    /// Prepares a run with all holes (or the seed triangle) registered.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidParameter`] for a zero division or a hole
    ///   wider than the sphere
    /// - any error of [`Triangulator::new`] or
    ///   [`Triangulator::add_contour`]
    pub fn triangulator(&self) -> MeshResult<Triangulator<Sphere>> {
        check_div4("sphere div4", self.div4)?;
        let detail = self.detail() as usize;
        let options = MeshingOptions::new(self.d)
            .with_capacities(capacity(detail, SPHERE_VERTEX_FACTOR), capacity(detail, SPHERE_TRIANGLE_FACTOR))
            .with_angle_method(self.angle_method);

        let sphere = Sphere::new(DVec3::ZERO, self.radius());
        let mut tri = Triangulator::new(sphere, options)?;

        if self.holes.is_empty() {
            let theta = FRAC_PI_2 / self.div4 as f64;
            tri.seed_triangle([
                sphere.point(0.0, 0.0),
                sphere.point(theta, -FRAC_PI_6),
                sphere.point(theta, FRAC_PI_6),
            ])?;
            return Ok(tri);
        }

        for hole in &self.holes {
            let contour = match hole {
                SphereHole::Circular { theta, phi, div4 } => circular_hole(&sphere, self.d, *theta, *phi, *div4)?,
                SphereHole::Points(points) => points.iter().map(|&(theta, phi)| sphere.point(theta, phi)).collect(),
            };
            tri.add_contour(&contour)?;
        }
        Ok(tri)
    }
}

fn circular_hole(sphere: &Sphere, d: f64, theta: f64, phi: f64, div4: u32) -> MeshResult<Vec<DVec3>> {
    check_div4("hole div4", div4)?;
    let count = 4 * div4;
    let r = circumradius(d, count);
    if r > sphere.radius {
        return Err(MeshError::invalid(format!(
            "hole radius {r:.4} exceeds sphere radius {:.4}",
            sphere.radius
        )));
    }

    let h = (sphere.radius * sphere.radius - r * r).sqrt();
    let axis = direction(theta, phi);
    Ok(circle_contour(sphere.center + axis * h, axis, r, count as usize))
}

/// Triangulates a sphere with holes.
///
/// # Example
///
/// ```rust
/// use front_mesh::primitives::{create_sphere_with_holes, SphereParams};
///
/// let mesh = create_sphere_with_holes(&SphereParams::default()).unwrap();
/// assert_eq!(mesh.euler_characteristic(), 2);
/// ```
pub fn create_sphere_with_holes(params: &SphereParams) -> MeshResult<Mesh> {
    params.triangulator()?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sphere_is_closed_and_on_surface() {
        let params = SphereParams::default();
        let mesh = create_sphere_with_holes(&params).unwrap();

        assert_eq!(mesh.euler_characteristic(), 2);
        assert!(mesh.boundary_edges().is_empty());
        assert!(!mesh.has_non_manifold_edges());
        assert!(mesh.validate());
        assert!(mesh.triangle_count() <= 8 * 24 * 24);
        for p in mesh.vertices() {
            assert!((p.length() - 1.0).abs() < 1e-6);
        }

        let (min, max) = mesh.edge_length_range().unwrap();
        assert!(min >= 0.2 * params.d, "shortest edge {min}");
        assert!(max <= 1.6 * params.d, "longest edge {max}");
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = create_sphere_with_holes(&SphereParams::default()).unwrap();
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.vertex(i));
            assert!((b - a).cross(c - a).dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_circular_hole_stays_open() {
        let params = SphereParams {
            div4: 16,
            holes: vec![SphereHole::Circular {
                theta: 1.82,
                phi: 0.41,
                div4: 12,
            }],
            ..SphereParams::default()
        };
        let radius = params.radius();
        let mesh = create_sphere_with_holes(&params).unwrap();

        assert_eq!(mesh.boundary_edges().len(), 48);
        assert_eq!(mesh.euler_characteristic(), 1);
        assert!(!mesh.has_non_manifold_edges());
        for p in mesh.vertices() {
            assert!((p.length() - radius).abs() < 1e-6);
        }
    }

    #[test]
    fn test_nearby_holes_merge() {
        let params = SphereParams {
            holes: vec![
                SphereHole::Circular {
                    theta: FRAC_PI_2,
                    phi: 0.75,
                    div4: 3,
                },
                SphereHole::Circular {
                    theta: FRAC_PI_2,
                    phi: -0.75,
                    div4: 3,
                },
            ],
            ..SphereParams::default()
        };
        let (mesh, stats) = params.triangulator().unwrap().run_with_stats().unwrap();

        assert!(stats.merges >= 1);
        // both 12-edge hole outlines, one shared front
        assert_eq!(mesh.euler_characteristic(), 0);
        assert_eq!(mesh.boundary_edges().len(), 24);
        assert!(mesh.validate());
        assert!(!mesh.has_non_manifold_edges());
    }

    #[test]
    fn test_points_hole() {
        let params = SphereParams {
            holes: vec![SphereHole::Points(vec![
                (1.2, 0.0),
                (1.6, 0.0),
                (1.6, 0.4),
                (1.2, 0.4),
            ])],
            ..SphereParams::default()
        };
        let mesh = create_sphere_with_holes(&params).unwrap();
        assert_eq!(mesh.euler_characteristic(), 1);
        assert!(!mesh.boundary_edges().is_empty());
    }

    #[test]
    fn test_reruns_are_identical() {
        let params = SphereParams::default();
        assert_eq!(
            create_sphere_with_holes(&params).unwrap(),
            create_sphere_with_holes(&params).unwrap()
        );
    }

    #[test]
    fn test_rejects_oversized_hole() {
        let params = SphereParams {
            holes: vec![SphereHole::Circular {
                theta: 0.0,
                phi: 0.0,
                div4: 12,
            }],
            ..SphereParams::default()
        };
        assert!(matches!(
            create_sphere_with_holes(&params),
            Err(MeshError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_zero_division() {
        let params = SphereParams {
            div4: 0,
            ..SphereParams::default()
        };
        assert!(create_sphere_with_holes(&params).is_err());
    }
}

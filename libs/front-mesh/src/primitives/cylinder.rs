//! # Cylinder With Holes
//!
//! Open tube around the y axis between `bottom` and `top`. Its radius
//! follows from the edge length like the sphere's: the circumference is
//! divided into `4·div4` chords of length `d`.
//!
//! Both rims are outer boundaries. Circular holes are the intersection
//! curves of the tube with a transverse cylinder of radius
//! `d / (2·sin(π/(4·div4)))`, so the hole outline follows the tube wall.

use super::{capacity, check_div4};
use crate::engine::{MeshingOptions, Triangulator};
use crate::error::{MeshError, MeshResult};
use crate::front::AngleMethod;
use crate::mesh::Mesh;
use crate::surface::Cylinder;
use config::constants::{
    chord_length, circumradius, CYLINDER_TRIANGLE_FACTOR, CYLINDER_VERTEX_FACTOR, DEFAULT_DIV4, FULL_TURN,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A hole in the cylinder wall.
///
/// `y` is the axial position, `phi` the angle around the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CylinderHole {
    /// Transverse cylinder cut of `4·div4` points centered at `(y, phi)`.
    Circular { y: f64, phi: f64, div4: u32 },
    /// Closed point loop `(y, phi)`, counter-clockwise seen from outside.
    Points(Vec<(f64, f64)>),
}

/// Cylinder parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylinderParams {
    /// Target edge length.
    pub d: f64,
    /// Division of a quarter circumference.
    pub div4: u32,
    /// Lower rim height.
    pub bottom: f64,
    /// Upper rim height.
    pub top: f64,
    /// Holes in the wall.
    pub holes: Vec<CylinderHole>,
    /// Front angle evaluation.
    pub angle_method: AngleMethod,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            d: chord_length(1.0, 4 * DEFAULT_DIV4),
            div4: DEFAULT_DIV4,
            bottom: -1.0,
            top: 1.0,
            holes: Vec::new(),
            angle_method: AngleMethod::default(),
        }
    }
}

impl CylinderParams {
    /// Circumference division `4·div4`.
    pub fn detail(&self) -> u32 {
        4 * self.div4
    }

    /// Tube radius.
    pub fn radius(&self) -> f64 {
        circumradius(self.d, self.detail())
    }

    /// Prepares a run with both rims and all holes registered.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidParameter`] for `top <= bottom`, a zero
    ///   division, or a circular hole that does not fit on the wall
    /// - any error of [`Triangulator::new`] or
    ///   [`Triangulator::add_contour`]
    pub fn triangulator(&self) -> MeshResult<Triangulator<Cylinder>> {
        check_div4("cylinder div4", self.div4)?;
        if !(self.top > self.bottom) {
            return Err(MeshError::invalid(format!(
                "cylinder top {} must lie above bottom {}",
                self.top, self.bottom
            )));
        }

        let detail = self.detail() as usize;
        let options = MeshingOptions::new(self.d)
            .with_capacities(
                capacity(detail, CYLINDER_VERTEX_FACTOR),
                capacity(detail, CYLINDER_TRIANGLE_FACTOR),
            )
            .with_angle_method(self.angle_method);

        let radius = self.radius();
        let mut tri = Triangulator::new(Cylinder::y_axis(radius), options)?;

        let rim = |y: f64, sign: f64| -> Vec<DVec3> {
            (0..detail)
                .map(|k| {
                    let phi = FULL_TURN * k as f64 / detail as f64;
                    DVec3::new(radius * phi.cos(), y, sign * radius * phi.sin())
                })
                .collect()
        };
        tri.add_contour(&rim(self.bottom, 1.0))?;
        tri.add_contour(&rim(self.top, -1.0))?;

        for hole in &self.holes {
            let contour = match hole {
                CylinderHole::Circular { y, phi, div4 } => self.circular_hole(radius, *y, *phi, *div4)?,
                CylinderHole::Points(points) => points
                    .iter()
                    .map(|&(y, phi)| DVec3::new(radius * phi.cos(), y, -radius * phi.sin()))
                    .collect(),
            };
            tri.add_contour(&contour)?;
        }
        Ok(tri)
    }

    fn circular_hole(&self, radius: f64, y0: f64, phi: f64, div4: u32) -> MeshResult<Vec<DVec3>> {
        check_div4("hole div4", div4)?;
        let count = 4 * div4;
        let r = circumradius(self.d, count);
        if r > radius {
            return Err(MeshError::invalid(format!(
                "hole radius {r:.4} exceeds cylinder radius {radius:.4}"
            )));
        }
        if !(y0 - r > self.bottom && y0 + r < self.top) {
            return Err(MeshError::invalid(format!(
                "hole at y = {y0} with radius {r:.4} crosses a rim"
            )));
        }

        let (sin_phi, cos_phi) = phi.sin_cos();
        Ok((0..count)
            .map(|k| {
                let alpha = FULL_TURN * k as f64 / count as f64;
                let (sin_a, cos_a) = alpha.sin_cos();
                let x0 = (radius * radius - r * r * cos_a * cos_a).sqrt();
                let z0 = r * cos_a;
                DVec3::new(
                    x0 * cos_phi - z0 * sin_phi,
                    y0 + r * sin_a,
                    -x0 * sin_phi - z0 * cos_phi,
                )
            })
            .collect())
    }
}

/// Triangulates an open cylinder with holes.
///
/// # Example
///
/// ```rust
/// use front_mesh::primitives::{create_cylinder_with_holes, CylinderParams};
///
/// let mesh = create_cylinder_with_holes(&CylinderParams::default()).unwrap();
/// assert_eq!(mesh.euler_characteristic(), 0);
/// ```
pub fn create_cylinder_with_holes(params: &CylinderParams) -> MeshResult<Mesh> {
    params.triangulator()?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_on_tube(mesh: &Mesh, params: &CylinderParams) {
        let radius = params.radius();
        for p in mesh.vertices() {
            assert!((p.x.hypot(p.z) - radius).abs() < 1e-6);
            assert!(p.y >= params.bottom - 1e-9 && p.y <= params.top + 1e-9);
        }
    }

    #[test]
    fn test_default_tube() {
        let params = CylinderParams::default();
        let (mesh, stats) = params.triangulator().unwrap().run_with_stats().unwrap();

        assert_eq!(mesh.euler_characteristic(), 0);
        assert_eq!(mesh.boundary_edges().len(), 2 * 24);
        assert!(!mesh.has_non_manifold_edges());
        assert!(mesh.validate());
        assert!(stats.merges >= 1);
        assert_on_tube(&mesh, &params);
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = create_cylinder_with_holes(&CylinderParams::default()).unwrap();
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.vertex(i));
            let mut radial = a + b + c;
            radial.y = 0.0;
            assert!((b - a).cross(c - a).dot(radial) > 0.0);
        }
    }

    #[test]
    fn test_circular_hole() {
        let params = CylinderParams {
            holes: vec![CylinderHole::Circular {
                y: 0.0,
                phi: 1.0,
                div4: 3,
            }],
            ..CylinderParams::default()
        };
        let mesh = create_cylinder_with_holes(&params).unwrap();

        assert_eq!(mesh.euler_characteristic(), -1);
        // the hole outline bends with the wall, so some chords get subdivided
        assert!(mesh.boundary_edges().len() >= 2 * 24 + 12);
        assert!(!mesh.has_non_manifold_edges());
        assert_on_tube(&mesh, &params);
    }

    #[test]
    fn test_points_hole() {
        let params = CylinderParams {
            holes: vec![CylinderHole::Points(vec![
                (-0.2, 0.0),
                (-0.2, 0.4),
                (0.2, 0.4),
                (0.2, 0.0),
            ])],
            ..CylinderParams::default()
        };
        let mesh = create_cylinder_with_holes(&params).unwrap();
        assert_eq!(mesh.euler_characteristic(), -1);
        assert_on_tube(&mesh, &params);
    }

    #[test]
    fn test_rejects_inverted_rims() {
        let params = CylinderParams {
            bottom: 1.0,
            top: -1.0,
            ..CylinderParams::default()
        };
        assert!(matches!(
            create_cylinder_with_holes(&params),
            Err(MeshError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_hole_across_rim() {
        let params = CylinderParams {
            holes: vec![CylinderHole::Circular {
                y: 0.9,
                phi: 0.0,
                div4: 3,
            }],
            ..CylinderParams::default()
        };
        assert!(create_cylinder_with_holes(&params).is_err());
    }
}

//! # Planar Regions
//!
//! Flat region inside an outline, minus holes, on a plane with arbitrary
//! normal. Used for plane caps and flat polygons. Outline and holes are
//! given in plane coordinates `(u, v)` (see [`Plane::point`]) and oriented
//! automatically: the outline clockwise, holes counter-clockwise about the
//! plane normal.

use super::capacity;
use crate::contour::{circle_contour, circle_segments, march_parametric_curve, polygon_contour};
use crate::engine::{MeshingOptions, Triangulator};
use crate::error::{MeshError, MeshResult};
use crate::front::AngleMethod;
use crate::mesh::Mesh;
use crate::surface::Plane;
use config::constants::{MeshingThresholds, FULL_TURN, PLANE_TRIANGLE_FACTOR, PLANE_VERTEX_FACTOR};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A closed curve in plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaneBoundary {
    /// Circle sampled with chords of about `d`.
    Circle { center: [f64; 2], radius: f64 },
    /// Axis-aligned ellipse, marched with steps of about `d`.
    Ellipse { center: [f64; 2], semi_axes: [f64; 2] },
    /// Polygon; long edges are subdivided.
    Polygon(Vec<[f64; 2]>),
}

impl PlaneBoundary {
    /// Axis-aligned rectangle from its lower and upper corners.
    pub fn rectangle(min: [f64; 2], max: [f64; 2]) -> Self {
        Self::Polygon(vec![min, [max[0], min[1]], max, [min[0], max[1]]])
    }

    /// Points of the curve on `plane`, in the curve's own orientation.
    fn points(&self, plane: &Plane, d: f64, thresholds: &MeshingThresholds) -> MeshResult<Vec<DVec3>> {
        match self {
            Self::Circle { center, radius } => {
                if !(*radius > 0.0) {
                    return Err(MeshError::invalid(format!("circle radius must be positive: {radius}")));
                }
                Ok(circle_contour(
                    plane.point(center[0], center[1]),
                    plane.normal,
                    *radius,
                    circle_segments(*radius, d),
                ))
            }
            Self::Ellipse { center, semi_axes } => {
                let [a, b] = *semi_axes;
                if !(a > 0.0 && b > 0.0) {
                    return Err(MeshError::invalid(format!("ellipse semi-axes must be positive: {a}, {b}")));
                }
                let curve = |t: f64| plane.point(center[0] + a * t.cos(), center[1] + b * t.sin());
                Ok(march_parametric_curve(curve, 0.0, FULL_TURN, d, thresholds))
            }
            Self::Polygon(points) => Ok(points.iter().map(|&[u, v]| plane.point(u, v)).collect()),
        }
    }
}

/// Planar region parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneRegionParams {
    /// Origin of the plane coordinates.
    pub origin: DVec3,
    /// Plane normal, the side the triangles face.
    pub normal: DVec3,
    /// Target edge length.
    pub d: f64,
    /// Outer boundary.
    pub outline: PlaneBoundary,
    /// Holes inside the outline.
    pub holes: Vec<PlaneBoundary>,
    /// Front angle evaluation.
    pub angle_method: AngleMethod,
}

impl Default for PlaneRegionParams {
    /// Unit disc on the xy plane facing +z.
    fn default() -> Self {
        Self {
            origin: DVec3::ZERO,
            normal: DVec3::Z,
            d: 0.1,
            outline: PlaneBoundary::Circle {
                center: [0.0, 0.0],
                radius: 1.0,
            },
            holes: Vec::new(),
            angle_method: AngleMethod::default(),
        }
    }
}

impl PlaneRegionParams {
    /// Prepares a run with outline and holes registered.
    ///
    /// Capacities follow `detail = max(3, ⌈outline perimeter / d⌉)`.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidParameter`] for a zero normal or a degenerate
    ///   circle or ellipse
    /// - any error of [`Triangulator::new`] or
    ///   [`Triangulator::add_contour`]
    pub fn triangulator(&self) -> MeshResult<Triangulator<Plane>> {
        if !(self.normal.length_squared() > 0.0 && self.normal.is_finite()) {
            return Err(MeshError::invalid(format!("plane normal must be non-zero: {}", self.normal)));
        }
        let options = MeshingOptions::new(self.d).with_angle_method(self.angle_method);
        options.validate()?;

        let plane = Plane::new(self.origin, self.normal);
        let outline = polygon_contour(&self.outline.points(&plane, self.d, &options.thresholds)?, plane.normal, false);
        let mut holes = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            let points = hole.points(&plane, self.d, &options.thresholds)?;
            holes.push(polygon_contour(&points, plane.normal, true));
        }

        let detail = ((perimeter(&outline) / self.d).ceil() as usize).max(3);
        let options = options.with_capacities(
            capacity(detail, PLANE_VERTEX_FACTOR),
            capacity(detail, PLANE_TRIANGLE_FACTOR),
        );

        let mut tri = Triangulator::new(plane, options)?;
        tri.add_contour(&outline)?;
        for hole in &holes {
            tri.add_contour(hole)?;
        }
        Ok(tri)
    }
}

fn perimeter(points: &[DVec3]) -> f64 {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| p.distance(points[(i + 1) % points.len()]))
        .sum()
}

/// Triangulates a planar region with holes.
///
/// # Example
///
/// ```rust
/// use front_mesh::primitives::{create_plane_region, PlaneBoundary, PlaneRegionParams};
///
/// let params = PlaneRegionParams {
///     d: 0.25,
///     outline: PlaneBoundary::rectangle([0.0, 0.0], [2.0, 1.0]),
///     ..PlaneRegionParams::default()
/// };
/// let mesh = create_plane_region(&params).unwrap();
/// assert_eq!(mesh.euler_characteristic(), 1);
/// ```
pub fn create_plane_region(params: &PlaneRegionParams) -> MeshResult<Mesh> {
    params.triangulator()?.run()
}

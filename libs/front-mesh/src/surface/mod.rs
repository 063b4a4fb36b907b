//! # Surface Projectors
//!
//! Strategy interface that maps an arbitrary point near a surface onto the
//! surface and reports the unit normal there. The front algorithm only talks
//! to the surface through [`SurfaceProjector`].
//!
//! ## Variants
//!
//! | Projector | Surface |
//! |---|---|
//! | [`Sphere`] | sphere, radial rescale |
//! | [`Cylinder`] | infinite cylinder, radial rescale orthogonal to the axis |
//! | [`Plane`] | plane caps and flat outlines |
//! | [`Parametric`] | closure-defined closed-form surface |
//! | [`ImplicitSurface`] | `F(x, y, z) = 0`, Newton iteration |
//! | [`BoundedImplicitSurface`] | implicit surface clipped to a box |

use glam::DVec3;

mod cylinder;
mod implicit;
mod parametric;
mod plane;
mod sphere;

pub use cylinder::Cylinder;
pub use implicit::{
    implicit_fn, implicit_from_partials, BoundedImplicitSurface, FnImplicit, ImplicitFunction,
    ImplicitSurface, PartialsImplicit,
};
pub use parametric::Parametric;
pub use plane::Plane;
pub use sphere::Sphere;

pub(crate) use sphere::direction;

// =============================================================================
// PROJECTOR TRAIT
// =============================================================================

/// Projects candidate points onto a surface.
pub trait SurfaceProjector {
    /// Maps `candidate` onto the surface.
    fn project(&self, candidate: DVec3) -> SurfacePoint;

    /// Whether per-vertex normals belong in the output mesh.
    fn exports_normals(&self) -> bool {
        false
    }
}

impl<T: SurfaceProjector + ?Sized> SurfaceProjector for &T {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        (**self).project(candidate)
    }

    fn exports_normals(&self) -> bool {
        (**self).exports_normals()
    }
}

impl<T: SurfaceProjector + ?Sized> SurfaceProjector for Box<T> {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        (**self).project(candidate)
    }

    fn exports_normals(&self) -> bool {
        (**self).exports_normals()
    }
}

// =============================================================================
// SURFACE POINT
// =============================================================================

/// A point on the surface with its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Position on the surface.
    pub position: DVec3,
    /// Unit outward normal.
    pub normal: DVec3,
    /// The point was pinned to the clipping box of a bounded surface.
    pub clamped: bool,
}

impl SurfacePoint {
    /// Creates an unclamped surface point.
    pub fn new(position: DVec3, normal: DVec3) -> Self {
        Self {
            position,
            normal,
            clamped: false,
        }
    }

    /// Builds the tangent frame at this point whose first axis points
    /// toward `toward` (projected into the tangent plane).
    pub fn frame(&self, toward: DVec3) -> TangentFrame {
        TangentFrame::new(self.normal, toward - self.position)
    }
}

// =============================================================================
// TANGENT FRAME
// =============================================================================

/// Orthonormal frame `(t1, t2, normal)` with `t2 = normal × t1`.
///
/// Angles measured in this frame increase counter-clockwise about the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    /// Surface normal.
    pub normal: DVec3,
    /// First tangent.
    pub t1: DVec3,
    /// Second tangent.
    pub t2: DVec3,
}

impl TangentFrame {
    /// Builds a frame from a normal and a reference direction.
    ///
    /// `t1` is the unit projection of `reference` into the plane orthogonal
    /// to `normal`. A reference parallel to the normal falls back to an
    /// arbitrary orthonormal tangent.
    pub fn new(normal: DVec3, reference: DVec3) -> Self {
        let in_plane = reference - normal * reference.dot(normal);
        let mut t1 = in_plane.normalize_or_zero();
        if t1 == DVec3::ZERO {
            t1 = normal.any_orthonormal_vector();
        }
        Self {
            normal,
            t1,
            t2: normal.cross(t1),
        }
    }

    /// Coordinates of `v` in the tangent plane.
    #[inline]
    pub fn local(&self, v: DVec3) -> (f64, f64) {
        (v.dot(self.t1), v.dot(self.t2))
    }

    /// Point at `angle` on the tangent circle of `radius` around `center`.
    #[inline]
    pub fn point_at(&self, center: DVec3, radius: f64, angle: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        center + radius * (cos * self.t1 + sin * self.t2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_frame_is_right_handed() {
        let frame = TangentFrame::new(DVec3::Z, DVec3::new(2.0, 0.0, 5.0));
        assert_eq!(frame.t1, DVec3::X);
        assert_eq!(frame.t2, DVec3::Y);
        assert_relative_eq!(frame.t1.cross(frame.t2).dot(frame.normal), 1.0);
    }

    #[test]
    fn test_frame_degenerate_reference() {
        let frame = TangentFrame::new(DVec3::Z, DVec3::Z);
        assert_relative_eq!(frame.t1.length(), 1.0);
        assert_relative_eq!(frame.t1.dot(DVec3::Z), 0.0);
    }

    #[test]
    fn test_point_at_quarter_turn() {
        let frame = TangentFrame::new(DVec3::Z, DVec3::X);
        let p = frame.point_at(DVec3::ZERO, 2.0, FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn test_surface_point_frame_points_toward_target() {
        let sp = SurfacePoint::new(DVec3::new(0.0, 0.0, 1.0), DVec3::Z);
        let frame = sp.frame(DVec3::new(0.0, -3.0, 1.0));
        assert_eq!(frame.local(DVec3::new(0.0, -3.0, 0.0)), (3.0, 0.0));
    }

    #[test]
    fn test_projector_through_reference_and_box() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0);
        let boxed: Box<dyn SurfaceProjector> = Box::new(sphere);
        let by_ref = &boxed;
        assert_relative_eq!(by_ref.project(DVec3::new(0.0, 3.0, 0.0)).position.y, 1.0);
        assert!(!by_ref.exports_normals());
    }
}

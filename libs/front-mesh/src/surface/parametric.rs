//! Closure-defined projector for arbitrary closed-form surfaces.

use super::{SurfacePoint, SurfaceProjector};
use glam::DVec3;
use std::fmt;

type PointFn = Box<dyn Fn(DVec3) -> DVec3>;

/// Surface given by a projection closure and a normal closure.
///
/// # Example
///
/// ```rust
/// use front_mesh::surface::{Parametric, SurfaceProjector};
/// use glam::DVec3;
///
/// // paraboloid-like height field projected vertically
/// let surface = Parametric::new(
///     |p| DVec3::new(p.x, 0.1 * (p.x * p.x + p.z * p.z), p.z),
///     |p| DVec3::new(-0.2 * p.x, 1.0, -0.2 * p.z).normalize(),
/// );
/// let sp = surface.project(DVec3::new(1.0, 5.0, 0.0));
/// assert!((sp.position.y - 0.1).abs() < 1e-12);
/// ```
pub struct Parametric {
    project: PointFn,
    normal: PointFn,
}

impl Parametric {
    /// Creates a projector from `project` (maps a candidate onto the
    /// surface) and `normal` (unit normal at a surface point).
    pub fn new<P, N>(project: P, normal: N) -> Self
    where
        P: Fn(DVec3) -> DVec3 + 'static,
        N: Fn(DVec3) -> DVec3 + 'static,
    {
        Self {
            project: Box::new(project),
            normal: Box::new(normal),
        }
    }
}

impl fmt::Debug for Parametric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parametric").finish_non_exhaustive()
    }
}

impl SurfaceProjector for Parametric {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        let position = (self.project)(candidate);
        SurfacePoint::new(position, (self.normal)(position).normalize_or_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closures_are_applied() {
        let surface = Parametric::new(|p| DVec3::new(p.x, p.y, 0.0), |_| DVec3::new(0.0, 0.0, 4.0));
        let sp = surface.project(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(sp.position, DVec3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(sp.normal, DVec3::Z);
        assert!(format!("{surface:?}").starts_with("Parametric"));
    }
}

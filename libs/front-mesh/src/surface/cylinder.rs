//! Cylinder projector.

use super::{SurfacePoint, SurfaceProjector};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Infinite cylinder through `origin` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// A point on the axis.
    pub origin: DVec3,
    /// Unit axis direction.
    pub axis: DVec3,
    /// Radius.
    pub radius: f64,
}

impl Cylinder {
    /// Creates a cylinder. `axis` is normalized.
    pub fn new(origin: DVec3, axis: DVec3, radius: f64) -> Self {
        Self {
            origin,
            axis: axis.normalize(),
            radius,
        }
    }

    /// Cylinder of `radius` around the y axis.
    pub fn y_axis(radius: f64) -> Self {
        Self::new(DVec3::ZERO, DVec3::Y, radius)
    }
}

impl SurfaceProjector for Cylinder {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        let rel = candidate - self.origin;
        let along = self.axis * rel.dot(self.axis);
        let mut normal = (rel - along).normalize_or_zero();
        if normal == DVec3::ZERO {
            normal = self.axis.any_orthonormal_vector();
        }
        SurfacePoint::new(self.origin + along + normal * self.radius, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_keeps_axial_coordinate() {
        let cylinder = Cylinder::y_axis(0.5);
        let sp = cylinder.project(DVec3::new(3.0, 1.25, 4.0));
        assert_relative_eq!(sp.position.y, 1.25);
        assert_relative_eq!(sp.position.x.hypot(sp.position.z), 0.5, epsilon = 1e-12);
        assert_relative_eq!(sp.normal, DVec3::new(0.6, 0.0, 0.8), epsilon = 1e-12);
    }

    #[test]
    fn test_tilted_axis() {
        let cylinder = Cylinder::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 2.0), 2.0);
        assert_eq!(cylinder.axis, DVec3::Z);
        let sp = cylinder.project(DVec3::new(1.0, 0.5, -7.0));
        assert_relative_eq!(sp.position, DVec3::new(1.0, 2.0, -7.0), epsilon = 1e-12);
    }
}

//! Plane projector for caps and flat regions.

use super::{SurfacePoint, SurfaceProjector, TangentFrame};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// A point on the plane.
    pub origin: DVec3,
    /// Unit normal, the side the mesh faces.
    pub normal: DVec3,
}

impl Plane {
    /// Creates a plane. `normal` is normalized.
    pub fn new(origin: DVec3, normal: DVec3) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    /// In-plane axes `(u, v)` with `u × v = normal`.
    pub fn axes(&self) -> (DVec3, DVec3) {
        let frame = TangentFrame::new(self.normal, self.normal.any_orthonormal_vector());
        (frame.t1, frame.t2)
    }

    /// Maps plane coordinates to a point.
    pub fn point(&self, u: f64, v: f64) -> DVec3 {
        let (axis_u, axis_v) = self.axes();
        self.origin + u * axis_u + v * axis_v
    }

    /// Signed distance of `p` from the plane.
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        (p - self.origin).dot(self.normal)
    }
}

impl SurfaceProjector for Plane {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        let position = candidate - self.normal * self.signed_distance(candidate);
        SurfacePoint::new(position, self.normal)
    }
}

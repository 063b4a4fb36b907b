//! Sphere projector.

use super::{SurfacePoint, SurfaceProjector};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Sphere around `center` with `radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center.
    pub center: DVec3,
    /// Radius.
    pub radius: f64,
}

impl Sphere {
    /// Creates a sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Point at polar angle `theta` (from +y) and azimuth `phi`.
    ///
    /// `(θ, φ) ↦ center + r·(sin θ cos φ, cos θ, −sin θ sin φ)`
    pub fn point(&self, theta: f64, phi: f64) -> DVec3 {
        self.center + self.radius * direction(theta, phi)
    }
}

/// Unit direction for polar angle `theta` and azimuth `phi`.
pub(crate) fn direction(theta: f64, phi: f64) -> DVec3 {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    DVec3::new(sin_t * cos_p, cos_t, -sin_t * sin_p)
}

impl SurfaceProjector for Sphere {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        let mut normal = (candidate - self.center).normalize_or_zero();
        if normal == DVec3::ZERO {
            normal = DVec3::Y;
        }
        SurfacePoint::new(self.center + normal * self.radius, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_projection_lands_on_sphere() {
        let sphere = Sphere::new(DVec3::new(1.0, 2.0, 3.0), 2.5);
        for candidate in [DVec3::ZERO, DVec3::new(9.0, -4.0, 0.5), DVec3::new(1.0, 2.1, 3.0)] {
            let sp = sphere.project(candidate);
            assert_relative_eq!(sp.position.distance(sphere.center), 2.5, epsilon = 1e-12);
            assert_relative_eq!(sp.normal.length(), 1.0, epsilon = 1e-12);
            assert!(!sp.clamped);
        }
    }

    #[test]
    fn test_center_candidate_is_defined() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0);
        assert_eq!(sphere.project(DVec3::ZERO).position, DVec3::Y);
    }

    #[test]
    fn test_polar_parametrization() {
        let sphere = Sphere::new(DVec3::ZERO, 2.0);
        assert_relative_eq!(sphere.point(0.0, 0.0).y, 2.0);
        let equator = sphere.point(FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(equator.z, -2.0);
        assert_relative_eq!(equator.y, 0.0, epsilon = 1e-12);
    }
}

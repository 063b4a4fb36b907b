//! # Implicit Surfaces
//!
//! Projection onto `F(x, y, z) = 0` by Newton iteration along the gradient.
//!
//! ## Iteration
//!
//! ```text
//! p ← p − F(p) / |∇F(p)|² · ∇F(p)
//! ```
//!
//! repeated until a step is no longer than `epsilon`. Near a critical point
//! (`|∇F|² ≤ epsilon²`) the step is zero, which ends the iteration with a
//! warning. The normal is the unit gradient at the final point.
//!
//! ## Bounded Variant
//!
//! [`BoundedImplicitSurface`] clips the surface to an [`Aabb`]. A projection
//! that leaves the box is clamped onto the box and re-projected with the
//! gradient components of the faces it touches masked out, so the point
//! slides along the intersection of surface and box face.

use super::{SurfacePoint, SurfaceProjector};
use crate::aabb::Aabb;
use crate::error::{MeshError, MeshResult};
use config::constants::{DEFAULT_NEWTON_EPSILON, NEWTON_MAX_ITERATIONS};
use glam::{BVec3, DVec3};
use tracing::warn;

// =============================================================================
// IMPLICIT FUNCTION
// =============================================================================

/// Scalar field with gradient.
pub trait ImplicitFunction {
    /// `F(p)`.
    fn value(&self, p: DVec3) -> f64;

    /// `∇F(p)`.
    fn gradient(&self, p: DVec3) -> DVec3;
}

impl<T: ImplicitFunction + ?Sized> ImplicitFunction for &T {
    fn value(&self, p: DVec3) -> f64 {
        (**self).value(p)
    }

    fn gradient(&self, p: DVec3) -> DVec3 {
        (**self).gradient(p)
    }
}

/// Implicit function from a value closure and a gradient closure.
#[derive(Debug, Clone, Copy)]
pub struct FnImplicit<F, G> {
    value: F,
    gradient: G,
}

/// Wraps `value` and `gradient` closures as an [`ImplicitFunction`].
///
/// # Example
///
/// ```rust
/// use front_mesh::surface::{implicit_fn, ImplicitFunction};
/// use glam::DVec3;
///
/// let sphere = implicit_fn(|p: DVec3| p.length_squared() - 1.0, |p: DVec3| 2.0 * p);
/// assert_eq!(sphere.value(DVec3::X), 0.0);
/// ```
pub fn implicit_fn<F, G>(value: F, gradient: G) -> FnImplicit<F, G>
where
    F: Fn(DVec3) -> f64,
    G: Fn(DVec3) -> DVec3,
{
    FnImplicit { value, gradient }
}

impl<F, G> ImplicitFunction for FnImplicit<F, G>
where
    F: Fn(DVec3) -> f64,
    G: Fn(DVec3) -> DVec3,
{
    fn value(&self, p: DVec3) -> f64 {
        (self.value)(p)
    }

    fn gradient(&self, p: DVec3) -> DVec3 {
        (self.gradient)(p)
    }
}

/// Implicit function from a value closure and three partial derivatives.
#[derive(Debug, Clone, Copy)]
pub struct PartialsImplicit<F, X, Y, Z> {
    value: F,
    dx: X,
    dy: Y,
    dz: Z,
}

/// Wraps `F(x, y, z)` and its partials `∂F/∂x`, `∂F/∂y`, `∂F/∂z`.
pub fn implicit_from_partials<F, X, Y, Z>(value: F, dx: X, dy: Y, dz: Z) -> PartialsImplicit<F, X, Y, Z>
where
    F: Fn(f64, f64, f64) -> f64,
    X: Fn(f64, f64, f64) -> f64,
    Y: Fn(f64, f64, f64) -> f64,
    Z: Fn(f64, f64, f64) -> f64,
{
    PartialsImplicit { value, dx, dy, dz }
}

impl<F, X, Y, Z> ImplicitFunction for PartialsImplicit<F, X, Y, Z>
where
    F: Fn(f64, f64, f64) -> f64,
    X: Fn(f64, f64, f64) -> f64,
    Y: Fn(f64, f64, f64) -> f64,
    Z: Fn(f64, f64, f64) -> f64,
{
    fn value(&self, p: DVec3) -> f64 {
        (self.value)(p.x, p.y, p.z)
    }

    fn gradient(&self, p: DVec3) -> DVec3 {
        DVec3::new((self.dx)(p.x, p.y, p.z), (self.dy)(p.x, p.y, p.z), (self.dz)(p.x, p.y, p.z))
    }
}

// =============================================================================
// IMPLICIT SURFACE
// =============================================================================

/// Projector onto the zero set of an [`ImplicitFunction`].
#[derive(Debug, Clone)]
pub struct ImplicitSurface<F> {
    function: F,
    epsilon: f64,
    max_iterations: u32,
}

impl<F: ImplicitFunction> ImplicitSurface<F> {
    /// Creates a projector with Newton tolerance `epsilon`.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidEpsilon`] unless `epsilon` is positive and finite.
    pub fn new(function: F, epsilon: f64) -> MeshResult<Self> {
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(MeshError::InvalidEpsilon(epsilon));
        }
        Ok(Self {
            function,
            epsilon,
            max_iterations: NEWTON_MAX_ITERATIONS,
        })
    }

    /// Creates a projector with [`DEFAULT_NEWTON_EPSILON`].
    pub fn with_default_epsilon(function: F) -> Self {
        Self {
            function,
            epsilon: DEFAULT_NEWTON_EPSILON,
            max_iterations: NEWTON_MAX_ITERATIONS,
        }
    }

    /// Sets the Newton iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// The wrapped function.
    pub fn function(&self) -> &F {
        &self.function
    }

    /// Newton tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Runs Newton from `start`, zeroing the gradient components selected by
    /// `frozen` before every step when `frozen` is given.
    fn newton(&self, start: DVec3, frozen: Option<&Aabb>) -> DVec3 {
        let eps_sq = self.epsilon * self.epsilon;
        let mut p = start;

        for _ in 0..self.max_iterations {
            let mut gradient = self.function.gradient(p);
            if let Some(bounds) = frozen {
                gradient = DVec3::select(on_face(bounds, p), DVec3::ZERO, gradient);
            }

            let norm_sq = gradient.length_squared();
            if norm_sq <= eps_sq {
                warn!(point = ?p, "Newton projection hit a near-critical point, step skipped");
                return p;
            }

            let step = gradient * (-self.function.value(p) / norm_sq);
            p += step;
            if step.length() <= self.epsilon {
                return p;
            }
        }

        warn!(
            start = ?start,
            iterations = self.max_iterations,
            "Newton projection did not converge"
        );
        p
    }

    /// Unit normal from the gradient at `p`.
    fn normal_at(&self, p: DVec3) -> DVec3 {
        let normal = self.function.gradient(p).normalize_or_zero();
        if normal == DVec3::ZERO {
            DVec3::Z
        } else {
            normal
        }
    }
}

/// Components of `p` lying exactly on a face of `bounds`.
fn on_face(bounds: &Aabb, p: DVec3) -> BVec3 {
    p.cmpeq(bounds.min) | p.cmpeq(bounds.max)
}

impl<F: ImplicitFunction> SurfaceProjector for ImplicitSurface<F> {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        let position = self.newton(candidate, None);
        SurfacePoint::new(position, self.normal_at(position))
    }

    fn exports_normals(&self) -> bool {
        true
    }
}

// =============================================================================
// BOUNDED IMPLICIT SURFACE
// =============================================================================

/// Implicit surface clipped to a box.
#[derive(Debug, Clone)]
pub struct BoundedImplicitSurface<F> {
    inner: ImplicitSurface<F>,
    bounds: Aabb,
}

impl<F: ImplicitFunction> BoundedImplicitSurface<F> {
    /// Clips `inner` to `bounds`.
    pub fn new(inner: ImplicitSurface<F>, bounds: Aabb) -> Self {
        Self { inner, bounds }
    }

    /// The clipping box.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The unbounded surface.
    pub fn inner(&self) -> &ImplicitSurface<F> {
        &self.inner
    }
}

impl<F: ImplicitFunction> SurfaceProjector for BoundedImplicitSurface<F> {
    fn project(&self, candidate: DVec3) -> SurfacePoint {
        let free = self.inner.newton(candidate, None);
        if self.bounds.contains(free) {
            return SurfacePoint::new(free, self.inner.normal_at(free));
        }

        let position = self.inner.newton(self.bounds.clamp(free), Some(&self.bounds));
        SurfacePoint {
            position,
            normal: self.inner.normal_at(position),
            clamped: true,
        }
    }

    fn exports_normals(&self) -> bool {
        true
    }
}

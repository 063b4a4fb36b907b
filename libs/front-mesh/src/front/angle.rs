//! # Front Angle Evaluator
//!
//! Interior angle at a front vertex, measured counter-clockwise about the
//! surface normal from the previous front vertex to the next one. This is
//! the angle of the not-yet-meshed region and always lies in `(0, 2π)`.

use crate::surface::TangentFrame;
use config::constants::FULL_TURN;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How the front angle is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleMethod {
    /// Polar angles of both neighbours in the tangent plane.
    #[default]
    TangentPlane,
    /// Angle between the chords to the neighbours, corrected for the
    /// curvature of the circle through the previous neighbour.
    ChordCurvature,
}

/// `atan2(y, x)` mapped into `[0, 2π)`.
#[inline]
pub fn atan2_positive(y: f64, x: f64) -> f64 {
    let phi = y.atan2(x);
    if phi < 0.0 {
        phi + FULL_TURN
    } else {
        phi
    }
}

/// Angle at `point` between `prev` and `next` for the surface `normal`.
///
/// # Example
///
/// ```rust
/// use front_mesh::front::{front_angle, AngleMethod};
/// use glam::DVec3;
///
/// // prev on +x, next on +y, normal +z: a quarter turn counter-clockwise
/// let a = front_angle(AngleMethod::TangentPlane, DVec3::X, DVec3::ZERO, DVec3::Y, DVec3::Z);
/// assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn front_angle(method: AngleMethod, prev: DVec3, point: DVec3, next: DVec3, normal: DVec3) -> f64 {
    match method {
        AngleMethod::TangentPlane => tangent_plane_angle(prev, point, next, normal),
        AngleMethod::ChordCurvature => chord_curvature_angle(prev, point, next, normal),
    }
}

fn tangent_plane_angle(prev: DVec3, point: DVec3, next: DVec3, normal: DVec3) -> f64 {
    let frame = TangentFrame::new(normal, prev - point);
    let (x1, y1) = frame.local(prev - point);
    let (x2, y2) = frame.local(next - point);

    let ang1 = atan2_positive(y1, x1);
    let mut ang2 = atan2_positive(y2, x2);
    if ang2 < ang1 {
        ang2 += FULL_TURN;
    }
    ang2 - ang1
}

fn chord_curvature_angle(prev: DVec3, point: DVec3, next: DVec3, normal: DVec3) -> f64 {
    // center of the small circle through prev, orthogonal to the normal
    let center = point + normal * (prev - point).dot(normal);
    let v1 = (center - prev).normalize_or_zero();
    let v2 = (next - center).normalize_or_zero();

    let a = v1.dot(v2).abs().min(1.0).acos();
    let concave = v1.cross(v2).normalize_or_zero().dot(normal) < -0.5;

    let d1 = prev.distance_squared(point);
    let d2 = next.distance_squared(point);
    let d12 = prev.distance_squared(next);
    let acute = d12 < d1 + d2;

    match (concave, acute) {
        (true, true) => a,
        (true, false) => PI - a,
        (false, true) => FULL_TURN - a,
        (false, false) => PI + a,
    }
}

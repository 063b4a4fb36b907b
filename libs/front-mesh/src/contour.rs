//! # Contours
//!
//! Builders for the closed point loops that become initial fronts (holes and
//! outer boundaries).
//!
//! ## Orientation
//!
//! Seen from the outward normal, a hole contour runs counter-clockwise and an
//! outer boundary clockwise, so the region still to be meshed always lies on
//! the right of the walking direction.

use crate::surface::{SurfacePoint, SurfaceProjector, TangentFrame};
use config::constants::{MeshingThresholds, FULL_TURN, MARCH_STEP_FRACTION};
use glam::DVec3;

/// Samples used to estimate the arc length of a marched curve.
const ARC_SAMPLES: usize = 64;

/// Relative slack on `d` before a contour segment counts as too long.
const SPACING_TOLERANCE: f64 = 1e-9;

/// Projects a closed contour and subdivides every segment longer than `d`.
///
/// A segment of length `len > d` is cut into `ceil(len / d)` equal linear
/// pieces, each interior point projected onto the surface. The closing
/// segment from the last point back to the first is treated the same way.
/// Segments exceeding `d` by rounding noise only are kept.
pub fn subdivide_closed<S>(points: &[DVec3], d: f64, surface: &S) -> Vec<SurfacePoint>
where
    S: SurfaceProjector + ?Sized,
{
    let mut out = Vec::with_capacity(points.len());
    for (i, &start) in points.iter().enumerate() {
        out.push(surface.project(start));

        let end = points[(i + 1) % points.len()];
        let len = start.distance(end);
        if len > d * (1.0 + SPACING_TOLERANCE) {
            let count = (len / d).ceil() as usize;
            for k in 1..count {
                let t = k as f64 / count as f64;
                out.push(surface.project(start.lerp(end, t)));
            }
        }
    }
    out
}

/// Marches along `curve(t)` for `t` from `start` to `end`, placing points
/// roughly `d` apart.
///
/// The parameter advances in small steps until the chord to the previous
/// point reaches `sqrt(march_min_step_sq)·d`; the step is then re-derived
/// from the parameter distance just covered. Marching stops once the
/// remaining gap to `curve(end)` falls below `sqrt(march_continue_sq)·d`
/// (after the parameter midpoint), and a midpoint is inserted when the gap
/// still exceeds `sqrt(march_midpoint_sq)·d`.
///
/// The result starts with `curve(start)` and never contains `curve(end)`,
/// so a closed curve yields a closed contour directly.
///
/// # Example
///
/// ```rust
/// use config::constants::MeshingThresholds;
/// use front_mesh::contour::march_parametric_curve;
/// use glam::DVec3;
///
/// let line = |t: f64| DVec3::new(t, 0.0, 0.0);
/// let points = march_parametric_curve(line, 0.0, 10.0, 1.0, &MeshingThresholds::default());
/// assert_eq!(points[0], DVec3::ZERO);
/// assert!(points.len() >= 8 && points.len() <= 12);
/// ```
pub fn march_parametric_curve<C>(curve: C, start: f64, end: f64, d: f64, thresholds: &MeshingThresholds) -> Vec<DVec3>
where
    C: Fn(f64) -> DVec3,
{
    let dd = d * d;
    let sign = if end >= start { 1.0 } else { -1.0 };
    let span = (end - start).abs();
    let midpoint = 0.5 * (start + end);
    let before = |t: f64, limit: f64| if sign > 0.0 { t < limit } else { t > limit };

    let mut points = vec![curve(start)];
    if span == 0.0 {
        return points;
    }

    let arc = estimate_arc_length(&curve, start, end);
    let mut dt = if arc > 0.0 {
        span * (d / arc).min(1.0) * MARCH_STEP_FRACTION
    } else {
        span * MARCH_STEP_FRACTION
    };

    let last = curve(end);
    let mut previous = points[0];
    let mut t = start;
    let mut remaining_sq = previous.distance_squared(last);

    'march: while before(t, end) && (remaining_sq > thresholds.march_continue_sq * dd || before(t, midpoint)) {
        let mut probe = t;
        let mut point = previous;
        let mut chord_sq = 0.0;
        while chord_sq < thresholds.march_min_step_sq * dd {
            probe += sign * dt;
            if !before(probe, end) {
                break 'march;
            }
            point = curve(probe);
            chord_sq = point.distance_squared(previous);
        }

        points.push(point);
        dt = (probe - t).abs() * MARCH_STEP_FRACTION;
        t = probe;
        previous = point;
        remaining_sq = point.distance_squared(last);
    }

    if remaining_sq > thresholds.march_midpoint_sq * dd {
        points.push(curve(t + (end - t) / 2.0));
    }

    points
}

fn estimate_arc_length<C: Fn(f64) -> DVec3>(curve: &C, start: f64, end: f64) -> f64 {
    let mut length = 0.0;
    let mut prev = curve(start);
    for k in 1..=ARC_SAMPLES {
        let p = curve(start + (end - start) * k as f64 / ARC_SAMPLES as f64);
        length += p.distance(prev);
        prev = p;
    }
    length
}

/// Regular polygon of `segments` points on the circle around `center`,
/// counter-clockwise about `axis`.
pub fn circle_contour(center: DVec3, axis: DVec3, radius: f64, segments: usize) -> Vec<DVec3> {
    let axis = axis.normalize();
    let frame = TangentFrame::new(axis, axis.any_orthonormal_vector());
    (0..segments)
        .map(|k| frame.point_at(center, radius, FULL_TURN * k as f64 / segments as f64))
        .collect()
}

/// Number of circle segments giving chords of about `d`, at least three.
pub fn circle_segments(radius: f64, d: f64) -> usize {
    ((FULL_TURN * radius / d).ceil() as usize).max(3)
}

/// Newell normal of a closed polygon; its length is twice the area.
pub fn polygon_normal(points: &[DVec3]) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        normal += a.cross(b);
    }
    normal
}

/// Closed polygon through `points`, reordered if needed so that it runs
/// counter-clockwise about `normal` when `counter_clockwise` is set and
/// clockwise otherwise.
pub fn polygon_contour(points: &[DVec3], normal: DVec3, counter_clockwise: bool) -> Vec<DVec3> {
    let mut contour = points.to_vec();
    let is_ccw = polygon_normal(&contour).dot(normal) > 0.0;
    if is_ccw != counter_clockwise {
        contour.reverse();
    }
    contour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Plane, Sphere};
    use approx::assert_relative_eq;

    #[test]
    fn test_subdivide_short_segments_untouched() {
        let plane = Plane::new(DVec3::ZERO, DVec3::Z);
        let square = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
        assert_eq!(subdivide_closed(&square, 1.0, &plane).len(), 4);
    }

    #[test]
    fn test_subdivide_long_segment_count() {
        let plane = Plane::new(DVec3::ZERO, DVec3::Z);
        let tri = [DVec3::ZERO, DVec3::new(2.5, 0.0, 0.0), DVec3::new(0.0, 0.5, 0.0)];
        let points = subdivide_closed(&tri, 1.0, &plane);
        // 2.5 -> 3 pieces, hypotenuse ~2.55 -> 3 pieces, 0.5 -> 1 piece
        assert_eq!(points.len(), 3 + 2 + 2);
        assert_relative_eq!(points[1].position.x, 2.5 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_subdivide_reprojects_onto_sphere() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0);
        let points = subdivide_closed(&[DVec3::X, DVec3::Y, DVec3::Z], 0.3, &sphere);
        assert!(points.len() > 3);
        for sp in &points {
            assert_relative_eq!(sp.position.length(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_march_circle_is_uniform() {
        let circle = |t: f64| DVec3::new(t.cos(), t.sin(), 0.0);
        let d = 0.2;
        let points = march_parametric_curve(circle, 0.0, FULL_TURN, d, &MeshingThresholds::default());
        let n = points.len();
        assert!(n >= 28 && n <= 36, "got {n} points");
        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % n];
            let len = p.distance(q);
            assert!(len > 0.5 * d && len < 1.8 * d, "segment {i} has length {len}");
        }
    }

    #[test]
    fn test_march_reverse_direction() {
        let line = |t: f64| DVec3::new(t, 0.0, 0.0);
        let points = march_parametric_curve(line, 5.0, 0.0, 1.0, &MeshingThresholds::default());
        assert_eq!(points[0].x, 5.0);
        assert!(points.windows(2).all(|w| w[1].x < w[0].x));
    }

    #[test]
    fn test_circle_contour_is_counter_clockwise() {
        let points = circle_contour(DVec3::ZERO, DVec3::Y, 2.0, 12);
        assert_eq!(points.len(), 12);
        assert!(polygon_normal(&points).dot(DVec3::Y) > 0.0);
        for p in &points {
            assert_relative_eq!(p.length(), 2.0, epsilon = 1e-12);
        }
        assert_eq!(circle_segments(1.0, 0.5), 13);
    }

    #[test]
    fn test_polygon_contour_orientation() {
        let square = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
        let cw = polygon_contour(&square, DVec3::Z, false);
        assert!(polygon_normal(&cw).dot(DVec3::Z) < 0.0);
        let ccw = polygon_contour(&square, DVec3::Z, true);
        assert_eq!(ccw, square.to_vec());
    }
}

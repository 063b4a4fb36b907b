//! Triangle fan emission at a front vertex.

use super::Triangulator;
use crate::error::MeshResult;
use crate::surface::{SurfaceProjector, TangentFrame};
use config::constants::TRIANGLES_PER_HALF_TURN;
use std::f64::consts::PI;
use tracing::trace;

impl<S: SurfaceProjector> Triangulator<S> {
    /// Closes the angle at position `m` of the active front with a fan.
    ///
    /// The fan count follows the cached angle `ang`:
    /// `nT = floor(3·ang/π) + 1`, corrected so that partial angles stay
    /// above `min_partial_angle`, overlong single chords get a second
    /// triangle, and short neighbour edges force a single triangle.
    /// `nT - 1` new points are placed at distance `d` in the tangent plane
    /// and projected; they replace `m` in the front. With no new point `m`
    /// is removed.
    ///
    /// Returns the number of inserted points, which then occupy positions
    /// `m..m + n`.
    pub(super) fn emit_fan(&mut self, m: usize) -> MeshResult<usize> {
        let d = self.options.edge_length;
        let thresholds = self.options.thresholds;

        let front = self.fronts.active();
        let (pi, ni) = (front.prev_index(m), front.next_index(m));
        let (prev, apex, next) = (front.get(pi).vertex, front.get(m).vertex, front.get(ni).vertex);
        let angle = front.get(m).angle;

        let p_prev = self.builder.position(prev);
        let p_apex = self.builder.position(apex);
        let p_next = self.builder.position(next);

        let mut count = (TRIANGLES_PER_HALF_TURN * angle / PI).floor() as usize + 1;
        let partial = angle / count as f64;
        if partial < thresholds.min_partial_angle && count > 1 {
            count -= 1;
        } else if partial > thresholds.min_partial_angle
            && count == 1
            && p_prev.distance(p_next) > thresholds.long_chord_factor * d
        {
            count = 2;
        }
        let short = thresholds.short_edge_factor_sq * d * d;
        if p_prev.distance_squared(p_apex) < short || p_next.distance_squared(p_apex) < short {
            count = 1;
        }
        let partial = angle / count as f64;

        let frame = TangentFrame::new(self.builder.normal(apex), p_prev - p_apex);
        let mut inserted = Vec::with_capacity(count - 1);
        for k in 1..count {
            let target = frame.point_at(p_apex, d, k as f64 * partial);
            let point = self.surface.project(target);
            inserted.push(self.store(point)?);
        }

        let mut last = prev;
        for fv in &inserted {
            self.builder.push_triangle([apex, last, fv.vertex])?;
            last = fv.vertex;
        }
        self.builder.push_triangle([apex, last, next])?;

        trace!(
            "Fan at vertex {}: angle {:.3}, {} triangles, {} new points",
            apex,
            angle,
            count,
            inserted.len()
        );

        let front = self.fronts.active_mut();
        front.get_mut(pi).invalidate();
        front.get_mut(ni).invalidate();
        if inserted.is_empty() {
            front.remove(m);
        } else {
            front.replace(m, &inserted);
        }
        Ok(inserted.len())
    }
}

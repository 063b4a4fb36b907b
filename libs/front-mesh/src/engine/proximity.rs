//! Merge and split detection for freshly inserted front points.
//!
//! A new point closer than `sqrt(merge_distance_sq)·d` to a vertex of
//! another front joins both fronts; a new point that close to a distant part
//! of its own front cuts the front in two. Merges take priority.
//!
//! Joining two positions `A` and `B` leaves a seam: the pair `(A, A + 1)`
//! in the front walks straight from one side of the gap to the other. The
//! seam is zipped by fanning its sharper vertex first, then the other one.

use super::Triangulator;
use crate::error::MeshResult;
use crate::surface::SurfaceProjector;
use tracing::debug;

/// Closest vertex of another front to a new point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct MergeCandidate {
    /// Position of the new point in the active front.
    pub point: usize,
    /// Index of the other front.
    pub front: usize,
    /// Position in the other front.
    pub vertex: usize,
}

/// Closest distant position of the active front to a new point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SplitCandidate {
    /// Position of the new point.
    pub point: usize,
    /// Position it gets joined with.
    pub vertex: usize,
}

impl<S: SurfaceProjector> Triangulator<S> {
    /// Looks for another front near the `inserted` points starting at `m`.
    ///
    /// Fronts whose padded box does not contain the point are skipped;
    /// clamped vertices never take part. The globally closest pair within
    /// the merge radius wins, earlier pairs win ties.
    pub(super) fn find_merge(&self, m: usize, inserted: usize) -> Option<MergeCandidate> {
        let d = self.options.edge_length;
        let padding = self.options.thresholds.bbox_padding * d;
        let mut best_sq = self.options.thresholds.merge_distance_sq * d * d;
        let mut best = None;

        let active = self.fronts.active_index();
        let current = self.fronts.active();
        for point in m..m + inserted {
            let fv = current.get(point);
            if fv.clamped {
                continue;
            }
            let p = self.builder.position(fv.vertex);

            for (index, front) in self.fronts.fronts().iter().enumerate() {
                if index == active || front.is_empty() || !front.bounds().contains_padded(p, padding) {
                    continue;
                }
                for (vertex, other) in front.vertices().iter().enumerate() {
                    if other.clamped {
                        continue;
                    }
                    let dist_sq = p.distance_squared(self.builder.position(other.vertex));
                    if dist_sq < best_sq {
                        best_sq = dist_sq;
                        best = Some(MergeCandidate { point, front: index, vertex });
                    }
                }
            }
        }
        best
    }

    /// Looks for a distant position of the active front near the
    /// `inserted` points starting at `m`.
    ///
    /// Positions within `split_neighbor_exclusion` steps (cyclically) of the
    /// new point are ignored.
    pub(super) fn find_split(&self, m: usize, inserted: usize) -> Option<SplitCandidate> {
        let d = self.options.edge_length;
        let exclusion = self.options.thresholds.split_neighbor_exclusion;
        let mut best_sq = self.options.thresholds.split_distance_sq * d * d;
        let mut best = None;

        let front = self.fronts.active();
        let len = front.len();
        for (vertex, fv) in front.vertices().iter().enumerate() {
            if fv.clamped {
                continue;
            }
            let p = self.builder.position(fv.vertex);
            for point in m..m + inserted {
                let new = front.get(point);
                let gap = vertex.abs_diff(point);
                if new.clamped || gap <= exclusion || gap + exclusion >= len {
                    continue;
                }
                let dist_sq = p.distance_squared(self.builder.position(new.vertex));
                if dist_sq < best_sq {
                    best_sq = dist_sq;
                    best = Some(SplitCandidate { point, vertex });
                }
            }
        }
        best
    }

    /// Splices the candidate's front into the active one and zips both seams.
    pub(super) fn merge(&mut self, candidate: MergeCandidate) -> MeshResult<()> {
        let donor_len = self.fronts.fronts()[candidate.front].len();
        let (first, second) = self
            .fronts
            .merge_into_active(candidate.point, candidate.front, candidate.vertex);
        self.stats.merges += 1;
        debug!(
            "Merged front {} ({} vertices) into front {}, active length {}",
            candidate.front,
            donor_len,
            self.fronts.active_index(),
            self.fronts.active().len()
        );

        let shift = self.seam(first)?;
        let second = second as isize + shift;
        if second >= 0 {
            self.seam(second as usize)?;
        }
        Ok(())
    }

    /// Cuts the active front at the candidate and zips the remaining seam.
    pub(super) fn split(&mut self, candidate: SplitCandidate) -> MeshResult<()> {
        let builder = &self.builder;
        let low = self
            .fronts
            .split_active(candidate.point, candidate.vertex, |v| builder.position(v));
        self.stats.splits += 1;
        debug!(
            "Split front {} between positions {} and {}, {} fronts outstanding",
            self.fronts.active_index(),
            candidate.point.min(candidate.vertex),
            candidate.point.max(candidate.vertex),
            self.fronts.outstanding()
        );

        self.seam(low)?;
        Ok(())
    }

    /// Fans both vertices of the seam `(x, x + 1)`, the smaller angle first.
    ///
    /// Returns how far positions after the seam moved.
    fn seam(&mut self, x: usize) -> MeshResult<isize> {
        let len = self.fronts.active().len();
        if len <= 3 || x + 1 >= len {
            return Ok(0);
        }

        let left = self.seam_angle(x);
        let right = self.seam_angle(x + 1);
        let mut shift = 0;
        if left < right {
            shift += self.seam_fan(x)?;
            let moved = x as isize + 1 + shift;
            if self.fronts.active().len() > 3 && moved >= 0 {
                shift += self.seam_fan(moved as usize)?;
            }
        } else {
            shift += self.seam_fan(x + 1)?;
            if self.fronts.active().len() > 3 {
                shift += self.seam_fan(x)?;
            }
        }
        Ok(shift)
    }

    fn seam_angle(&mut self, i: usize) -> f64 {
        if self.fronts.active().get(i).clamped {
            f64::INFINITY
        } else {
            self.compute_angle(i)
        }
    }

    /// Fans position `i` with a fresh angle; returns the index shift.
    fn seam_fan(&mut self, i: usize) -> MeshResult<isize> {
        if i >= self.fronts.active().len() || self.fronts.active().get(i).clamped {
            return Ok(0);
        }
        self.compute_angle(i);
        Ok(self.emit_fan(i)? as isize - 1)
    }
}

//! # Fronts
//!
//! A front is a closed polygon of mesh vertices separating the meshed part of
//! the surface from the unmeshed part. The unmeshed region lies on the right
//! when walking the front in order (seen from the outward normal).
//!
//! ## Lifecycle
//!
//! ```text
//! Pending ──activate──▶ Active ──close──▶ Closed
//!    ▲                     │
//!    └──────── split ──────┘   (new pending front)
//! ```
//!
//! A merge empties the donor front and closes it without triangles.

mod angle;

pub use angle::{atan2_positive, front_angle, AngleMethod};

use crate::aabb::Aabb;
use glam::DVec3;

// =============================================================================
// FRONT VERTEX
// =============================================================================

/// Entry of a front: a mesh vertex plus its cached front angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontVertex {
    /// Index into the mesh buffer.
    pub vertex: u32,
    /// Cached front angle, `0.0` means stale.
    pub angle: f64,
    /// Pinned to the clipping box of a bounded surface.
    pub clamped: bool,
}

impl FrontVertex {
    /// New entry with a stale angle.
    pub fn new(vertex: u32) -> Self {
        Self {
            vertex,
            angle: 0.0,
            clamped: false,
        }
    }

    /// New entry for a box-pinned vertex.
    pub fn clamped(vertex: u32) -> Self {
        Self {
            clamped: true,
            ..Self::new(vertex)
        }
    }

    /// Marks the cached angle stale.
    #[inline]
    pub fn invalidate(&mut self) {
        self.angle = 0.0;
    }

    /// True if the angle must be recomputed.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.angle == 0.0
    }
}

// =============================================================================
// FRONT
// =============================================================================

/// Processing state of a front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontState {
    /// Waiting to be processed.
    Pending,
    /// Currently advanced by the main loop.
    Active,
    /// Fully triangulated or absorbed by a merge.
    Closed,
}

/// Cyclic sequence of front vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Front {
    vertices: Vec<FrontVertex>,
    bounds: Aabb,
    state: FrontState,
}

impl Front {
    /// Creates a pending front.
    pub fn new(vertices: Vec<FrontVertex>, bounds: Aabb) -> Self {
        Self {
            vertices,
            bounds,
            state: FrontState::Pending,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if no vertex is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Processing state.
    pub fn state(&self) -> FrontState {
        self.state
    }

    /// Cached bounding box.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Vertices in front order.
    pub fn vertices(&self) -> &[FrontVertex] {
        &self.vertices
    }

    /// Mutable access to the vertices (angles, flags).
    pub fn vertices_mut(&mut self) -> &mut [FrontVertex] {
        &mut self.vertices
    }

    /// Entry at `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &FrontVertex {
        &self.vertices[i]
    }

    /// Mutable entry at `i`.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> &mut FrontVertex {
        &mut self.vertices[i]
    }

    /// Cyclic predecessor index.
    #[inline]
    pub fn prev_index(&self, i: usize) -> usize {
        if i == 0 {
            self.vertices.len() - 1
        } else {
            i - 1
        }
    }

    /// Cyclic successor index.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 == self.vertices.len() {
            0
        } else {
            i + 1
        }
    }

    /// Removes the entry at `i`.
    pub fn remove(&mut self, i: usize) -> FrontVertex {
        self.vertices.remove(i)
    }

    /// Replaces the entry at `i` by `inserted`.
    pub fn replace(&mut self, i: usize, inserted: &[FrontVertex]) {
        self.vertices.splice(i..=i, inserted.iter().copied());
    }

    /// Index of the smallest cached angle among unclamped entries.
    ///
    /// Ties resolve to the lowest index. Returns `None` if every entry is
    /// clamped.
    pub fn min_angle_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, fv) in self.vertices.iter().enumerate() {
            if fv.clamped {
                continue;
            }
            if best.map_or(true, |(_, angle)| fv.angle < angle) {
                best = Some((i, fv.angle));
            }
        }
        best.map(|(i, _)| i)
    }

    /// True if at least one entry is not clamped.
    pub fn has_free_vertex(&self) -> bool {
        self.vertices.iter().any(|fv| !fv.clamped)
    }

    /// Recomputes the cached box from vertex positions.
    pub fn update_bounds(&mut self, position: impl Fn(u32) -> DVec3) {
        self.bounds = Aabb::from_points(self.vertices.iter().map(|fv| position(fv.vertex)));
    }

    fn take(&mut self) -> Vec<FrontVertex> {
        std::mem::take(&mut self.vertices)
    }
}

// =============================================================================
// FRONT SET
// =============================================================================

/// Every front of a run, the active index and the outstanding counter.
#[derive(Debug, Clone, Default)]
pub struct FrontSet {
    fronts: Vec<Front>,
    active: usize,
    outstanding: usize,
}

impl FrontSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pending front and returns its index.
    pub fn push(&mut self, front: Front) -> usize {
        self.fronts.push(front);
        self.outstanding += 1;
        self.fronts.len() - 1
    }

    /// Number of fronts not yet closed.
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Every front ever created, in creation order.
    pub fn fronts(&self) -> &[Front] {
        &self.fronts
    }

    /// Index of the active front.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active front.
    pub fn active(&self) -> &Front {
        &self.fronts[self.active]
    }

    /// The active front, mutably.
    pub fn active_mut(&mut self) -> &mut Front {
        &mut self.fronts[self.active]
    }

    /// Makes the first non-empty front (creation order) active.
    ///
    /// Returns its index, or `None` if every front is empty.
    pub fn activate_next(&mut self) -> Option<usize> {
        let next = self.fronts.iter().position(|f| !f.is_empty())?;
        self.active = next;
        self.fronts[next].state = FrontState::Active;
        Some(next)
    }

    /// Empties and closes the active front.
    pub fn close_active(&mut self) {
        let front = &mut self.fronts[self.active];
        front.vertices.clear();
        front.state = FrontState::Closed;
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    /// Splices front `other` into the active front.
    ///
    /// The active entry at `a` is joined with entry `j` of `other`:
    ///
    /// ```text
    /// active[..=a] ++ other[j..] ++ other[..=j] ++ active[a..]
    /// ```
    ///
    /// Both join vertices appear twice afterwards. The donor is emptied and
    /// closed. Returns the two seam positions `(a, a + 1 + |other|)`; each
    /// seam is the pair at that position and the next one.
    pub fn merge_into_active(&mut self, a: usize, other: usize, j: usize) -> (usize, usize) {
        debug_assert_ne!(other, self.active);
        let donor = self.fronts[other].take();
        self.fronts[other].state = FrontState::Closed;
        self.outstanding = self.outstanding.saturating_sub(1);

        let front = &mut self.fronts[self.active];
        let tail = front.vertices.split_off(a);
        let mut merged = std::mem::take(&mut front.vertices);
        merged.reserve(tail.len() + donor.len() + 2);
        merged.push(tail[0]);
        merged.extend_from_slice(&donor[j..]);
        merged.extend_from_slice(&donor[..=j]);
        merged.extend(tail);
        front.vertices = merged;

        (a, a + 1 + donor.len())
    }

    /// Cuts the chain between positions `i` and `j` off the active front.
    ///
    /// With `i < j` (swapped if needed) the chain `active[i..=j]` becomes a
    /// new pending front and the active front keeps `active[..=i] ++
    /// active[j..]`, so both endpoints are duplicated. The new front's box is
    /// computed from `position`. Returns the lower index `i`; the seam is
    /// the pair `(i, i + 1)` of the active front.
    pub fn split_active(&mut self, i: usize, j: usize, position: impl Fn(u32) -> DVec3) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let front = &mut self.fronts[self.active];
        front.vertices[i].invalidate();
        front.vertices[j].invalidate();

        let mut part = Vec::with_capacity(j - i + 1);
        part.push(front.vertices[i]);
        part.extend(front.vertices.drain(i + 1..j));
        part.push(front.vertices[i + 1]);

        let mut cut = Front::new(part, Aabb::empty());
        cut.update_bounds(position);
        self.push(cut);
        i
    }
}

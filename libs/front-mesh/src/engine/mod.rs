//! # Triangulation Engine
//!
//! Advancing-front main loop.
//!
//! ## Iteration
//!
//! 1. Recompute stale front angles, counting small ones
//! 2. Pick the unclamped vertex with the smallest angle
//! 3. Emit a fan of triangles there, inserting new surface points
//! 4. If the front is long and no small angle was seen, look for a merge
//!    with another front, else for a split of the active front
//! 5. Close the front once three vertices are left (or none is free) and
//!    activate the next pending one
//!
//! The run ends when no front is outstanding.
//!
//! ## Example
//!
//! ```rust
//! use front_mesh::surface::Plane;
//! use front_mesh::{MeshingOptions, Triangulator};
//! use glam::DVec3;
//!
//! // unit square, clockwise about +z so the inside gets meshed
//! let outline = [DVec3::ZERO, DVec3::Y, DVec3::new(1.0, 1.0, 0.0), DVec3::X];
//! let mut tri = Triangulator::new(Plane::new(DVec3::ZERO, DVec3::Z), MeshingOptions::new(0.25)).unwrap();
//! tri.add_contour(&outline).unwrap();
//! let mesh = tri.run().unwrap();
//! assert_eq!(mesh.euler_characteristic(), 1);
//! ```

mod emitter;
pub mod options;
mod proximity;


pub use options::MeshingOptions;

use crate::aabb::Aabb;
use crate::buffer::MeshBuilder;
use crate::contour::subdivide_closed;
use crate::error::{MeshError, MeshResult};
use crate::front::{front_angle, Front, FrontSet, FrontVertex};
use crate::mesh::Mesh;
use crate::surface::{SurfacePoint, SurfaceProjector};
use config::constants::SEED_REFERENCE_OFFSET;
use glam::DVec3;
use std::f64::consts::FRAC_PI_3;
use tracing::debug;

// =============================================================================
// RUN STATISTICS
// =============================================================================

/// Counters of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Main loop iterations.
    pub iterations: usize,
    /// Fronts absorbed into the active front.
    pub merges: usize,
    /// Fronts cut off the active front.
    pub splits: usize,
    /// Fronts closed.
    pub fronts_closed: usize,
}

// =============================================================================
// TRIANGULATOR
// =============================================================================

/// Advancing-front triangulator over a surface projector.
///
/// Initial fronts come from [`add_contour`](Self::add_contour) (holes and
/// boundaries) or from a seed triangle. [`run`](Self::run) consumes the
/// triangulator and returns the mesh.
#[derive(Debug)]
pub struct Triangulator<S> {
    surface: S,
    options: MeshingOptions,
    builder: MeshBuilder,
    fronts: FrontSet,
    small_angles: usize,
    contours: usize,
    stats: RunStats,
}

impl<S: SurfaceProjector> Triangulator<S> {
    /// Creates a triangulator with empty buffers sized by `options`.
    ///
    /// # Errors
    ///
    /// Any error of [`MeshingOptions::validate`].
    pub fn new(surface: S, options: MeshingOptions) -> MeshResult<Self> {
        options.validate()?;
        let builder = MeshBuilder::new(options.max_vertices, options.max_triangles);
        Ok(Self {
            surface,
            options,
            builder,
            fronts: FrontSet::new(),
            small_angles: 0,
            contours: 0,
            stats: RunStats::default(),
        })
    }

    /// Target edge length.
    #[inline]
    pub fn edge_length(&self) -> f64 {
        self.options.edge_length
    }

    /// The surface being meshed.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Registers a closed contour as a pending front.
    ///
    /// Points are projected onto the surface and segments longer than `d`
    /// are subdivided. Holes must run counter-clockwise and outer
    /// boundaries clockwise, seen from the outward normal. Returns the
    /// front index.
    ///
    /// # Errors
    ///
    /// - [`MeshError::DegenerateContour`] for fewer than three points
    /// - [`MeshError::CapacityExceeded`] if the vertices do not fit
    pub fn add_contour(&mut self, points: &[DVec3]) -> MeshResult<usize> {
        let index = self.contours;
        self.contours += 1;
        if points.len() < 3 {
            return Err(MeshError::DegenerateContour {
                index,
                len: points.len(),
            });
        }

        let projected = subdivide_closed(points, self.options.edge_length, &self.surface);
        let mut vertices = Vec::with_capacity(projected.len());
        let mut bounds = Aabb::empty();
        for sp in projected {
            bounds.include(sp.position);
            vertices.push(self.store(sp)?);
        }
        Ok(self.fronts.push(Front::new(vertices, bounds)))
    }

    /// Starts from a single triangle.
    ///
    /// The points are projected and must be counter-clockwise about the
    /// outward normal.
    pub fn seed_triangle(&mut self, points: [DVec3; 3]) -> MeshResult<usize> {
        let mut vertices = Vec::with_capacity(3);
        for p in points {
            vertices.push(self.store(self.surface.project(p))?);
        }
        self.builder
            .push_triangle([vertices[0].vertex, vertices[1].vertex, vertices[2].vertex])?;
        let bounds = Aabb::from_points(vertices.iter().map(|fv| self.builder.position(fv.vertex)));
        Ok(self.fronts.push(Front::new(vertices, bounds)))
    }

    /// Starts from a triangle grown at `seed`.
    ///
    /// The seed is projected, then two more points are placed at distance
    /// `d` in the tangent plane at angles `0` and `π/3` from the direction
    /// toward `seed + d·SEED_REFERENCE_OFFSET·(1, 1, 1)`.
    pub fn seed_at(&mut self, seed: DVec3) -> MeshResult<usize> {
        let d = self.options.edge_length;
        let first = self.surface.project(seed);
        let frame = first.frame(seed + DVec3::splat(d * SEED_REFERENCE_OFFSET));
        let points = [
            first.position,
            frame.point_at(first.position, d, 0.0),
            frame.point_at(first.position, d, FRAC_PI_3),
        ];

        let mut vertices = vec![self.store(first)?];
        for p in &points[1..] {
            vertices.push(self.store(self.surface.project(*p))?);
        }
        self.builder
            .push_triangle([vertices[0].vertex, vertices[1].vertex, vertices[2].vertex])?;
        let bounds = Aabb::from_points(vertices.iter().map(|fv| self.builder.position(fv.vertex)));
        Ok(self.fronts.push(Front::new(vertices, bounds)))
    }

    /// Runs the front algorithm to completion.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidParameter`] if no front was registered
    /// - [`MeshError::CapacityExceeded`] if a buffer overflows
    /// - [`MeshError::NoProgress`] if the progress guard trips
    pub fn run(self) -> MeshResult<Mesh> {
        self.run_with_stats().map(|(mesh, _)| mesh)
    }

    /// Like [`run`](Self::run), also returning the run counters.
    pub fn run_with_stats(mut self) -> MeshResult<(Mesh, RunStats)> {
        if self.fronts.activate_next().is_none() {
            return Err(MeshError::invalid("no contour or seed triangle registered"));
        }
        self.refresh_all_angles();

        debug!(
            "Starting front triangulation: {} fronts, d = {:.4}, capacities {} vertices / {} triangles",
            self.fronts.outstanding(),
            self.options.edge_length,
            self.builder.max_vertices(),
            self.builder.max_triangles()
        );

        let mut progress = Progress::new(self.fronts.active().len());
        while self.fronts.outstanding() > 0 {
            self.advance()?;
            self.stats.iterations += 1;

            let front = self.fronts.active();
            if front.len() <= 3 || !front.has_free_vertex() {
                self.close_active_front()?;
                if self.fronts.outstanding() == 0 || self.fronts.activate_next().is_none() {
                    break;
                }
                self.refresh_all_angles();
                progress = Progress::new(self.fronts.active().len());
                continue;
            }

            if progress.stalled(front.len(), self.options.progress_window) {
                return Err(MeshError::NoProgress {
                    iterations: self.stats.iterations,
                    front_len: front.len(),
                });
            }
        }

        debug!(
            "Front triangulation done: {} vertices, {} triangles, {} iterations, {} merges, {} splits",
            self.builder.vertex_count(),
            self.builder.triangle_count(),
            self.stats.iterations,
            self.stats.merges,
            self.stats.splits
        );

        let export_normals = self.surface.exports_normals();
        Ok((self.builder.finish(export_normals), self.stats))
    }

    /// One main loop iteration on the active front.
    fn advance(&mut self) -> MeshResult<()> {
        self.refresh_stale_angles();
        let Some(m) = self.fronts.active().min_angle_index() else {
            return Ok(());
        };

        let inserted = self.emit_fan(m)?;
        let thresholds = &self.options.thresholds;
        if inserted > 0 && self.fronts.active().len() > thresholds.min_front_len_for_scan && self.small_angles == 0 {
            if let Some(candidate) = self.find_merge(m, inserted) {
                self.merge(candidate)?;
            } else if let Some(candidate) = self.find_split(m, inserted) {
                self.split(candidate)?;
            }
        }
        Ok(())
    }

    /// Emits the closing triangle of a three-vertex front and closes it.
    fn close_active_front(&mut self) -> MeshResult<()> {
        let front = self.fronts.active();
        if front.len() == 3 {
            let [f0, f1, f2] = [0, 1, 2].map(|i| front.get(i).vertex);
            self.builder.push_triangle([f2, f1, f0])?;
        }
        self.fronts.close_active();
        self.stats.fronts_closed += 1;
        Ok(())
    }

    // =========================================================================
    // ANGLES
    // =========================================================================

    /// Recomputes the angle at position `i` of the active front.
    fn compute_angle(&mut self, i: usize) -> f64 {
        let front = self.fronts.active();
        let prev = self.builder.position(front.get(front.prev_index(i)).vertex);
        let next = self.builder.position(front.get(front.next_index(i)).vertex);
        let vertex = front.get(i).vertex;
        let angle = front_angle(
            self.options.angle_method,
            prev,
            self.builder.position(vertex),
            next,
            self.builder.normal(vertex),
        );
        self.fronts.active_mut().get_mut(i).angle = angle;
        angle
    }

    /// Recomputes stale angles of unclamped vertices, counting small ones.
    fn refresh_stale_angles(&mut self) {
        self.small_angles = 0;
        for i in 0..self.fronts.active().len() {
            let fv = *self.fronts.active().get(i);
            if fv.is_stale() && !fv.clamped && self.compute_angle(i) < self.options.thresholds.small_angle {
                self.small_angles += 1;
            }
        }
    }

    /// Recomputes every unclamped angle of a newly activated front.
    fn refresh_all_angles(&mut self) {
        for i in 0..self.fronts.active().len() {
            if !self.fronts.active().get(i).clamped {
                self.compute_angle(i);
            }
        }
    }

    /// Writes a projected point to the buffer.
    fn store(&mut self, point: SurfacePoint) -> MeshResult<FrontVertex> {
        let vertex = self.builder.push_vertex(point.position, point.normal)?;
        Ok(if point.clamped {
            FrontVertex::clamped(vertex)
        } else {
            FrontVertex::new(vertex)
        })
    }
}

// =============================================================================
// PROGRESS GUARD
// =============================================================================

/// Tracks the extremes of the active front length.
///
/// A front that keeps growing or keeps shrinking makes progress; a front
/// whose length stays strictly between its running minimum and maximum for
/// a whole window is considered stuck.
#[derive(Debug, Clone, Copy)]
struct Progress {
    min: usize,
    max: usize,
    stall: usize,
}

impl Progress {
    fn new(len: usize) -> Self {
        Self {
            min: len,
            max: len,
            stall: 0,
        }
    }

    fn stalled(&mut self, len: usize, window: usize) -> bool {
        if len < self.min {
            self.min = len;
            self.stall = 0;
        } else if len > self.max {
            self.max = len;
            self.stall = 0;
        } else {
            self.stall += 1;
        }
        self.stall >= window
    }
}

//! Triangulation options.

use crate::error::{MeshError, MeshResult};
use crate::front::AngleMethod;
use config::constants::{MeshingThresholds, DEFAULT_MAX_TRIANGLES, DEFAULT_MAX_VERTICES, PROGRESS_WINDOW};

/// Options of a single triangulation run.
///
/// # Example
///
/// ```rust
/// use front_mesh::{AngleMethod, MeshingOptions};
///
/// let options = MeshingOptions::new(0.1)
///     .with_capacities(5_000, 10_000)
///     .with_angle_method(AngleMethod::ChordCurvature);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshingOptions {
    /// Target edge length `d`.
    pub edge_length: f64,

    /// Vertex capacity of the output buffer.
    pub max_vertices: usize,

    /// Triangle capacity of the output buffer.
    pub max_triangles: usize,

    /// Front angle evaluation.
    pub angle_method: AngleMethod,

    /// Heuristic thresholds.
    pub thresholds: MeshingThresholds,

    /// Iterations without front progress before a run is aborted.
    pub progress_window: usize,
}

impl MeshingOptions {
    /// Options for edge length `d` with default capacities and thresholds.
    #[must_use]
    pub fn new(edge_length: f64) -> Self {
        Self {
            edge_length,
            max_vertices: DEFAULT_MAX_VERTICES,
            max_triangles: DEFAULT_MAX_TRIANGLES,
            angle_method: AngleMethod::default(),
            thresholds: MeshingThresholds::default(),
            progress_window: PROGRESS_WINDOW,
        }
    }

    /// Sets both buffer capacities.
    #[must_use]
    pub fn with_capacities(mut self, max_vertices: usize, max_triangles: usize) -> Self {
        self.max_vertices = max_vertices;
        self.max_triangles = max_triangles;
        self
    }

    /// Sets the angle evaluation method.
    #[must_use]
    pub fn with_angle_method(mut self, angle_method: AngleMethod) -> Self {
        self.angle_method = angle_method;
        self
    }

    /// Replaces the heuristic thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: MeshingThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the stall window of the progress guard.
    #[must_use]
    pub fn with_progress_window(mut self, progress_window: usize) -> Self {
        self.progress_window = progress_window;
        self
    }

    /// Checks every option.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidEdgeLength`] for a non-positive or non-finite `d`
    /// - [`MeshError::Config`] for rejected thresholds
    /// - [`MeshError::InvalidParameter`] for zero capacities or window
    pub fn validate(&self) -> MeshResult<()> {
        if !(self.edge_length > 0.0 && self.edge_length.is_finite()) {
            return Err(MeshError::InvalidEdgeLength(self.edge_length));
        }
        self.thresholds.validate()?;
        if self.max_vertices < 3 || self.max_triangles == 0 {
            return Err(MeshError::invalid(format!(
                "capacities too small: {} vertices, {} triangles",
                self.max_vertices, self.max_triangles
            )));
        }
        if self.progress_window == 0 {
            return Err(MeshError::invalid("progress window must be at least 1"));
        }
        Ok(())
    }
}

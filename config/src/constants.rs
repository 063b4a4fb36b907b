//! # Configuration Constants
//!
//! Centralized constants for the advancing-front mesher. All front-angle
//! limits, proximity thresholds, Newton iteration bounds and capacity
//! defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Front Angles**: Limits steering how many triangles a vertex receives
//! - **Proximity**: Gates and radii for front merge / split detection
//! - **Contours**: Curve marching thresholds for boundary generation
//! - **Limits**: Capacity and iteration defaults

use std::f64::consts::PI;
use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Smallest triangle area (twice the area, as a cross product length)
/// accepted by mesh validation.
///
/// # Example
///
/// ```rust
/// use config::constants::DEGENERATE_AREA_EPSILON;
/// assert!(DEGENERATE_AREA_EPSILON < 1e-6);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Default Newton convergence epsilon for implicit surfaces.
///
/// Iteration stops once a Newton step is shorter than this value.
pub const DEFAULT_NEWTON_EPSILON: f64 = 1e-9;

/// Upper bound on Newton steps for a single projection.
///
/// The iteration normally converges in a handful of steps; the cap only
/// guards against oscillation near badly conditioned regions.
///
/// # Example
///
/// ```rust
/// use config::constants::NEWTON_MAX_ITERATIONS;
/// assert!(NEWTON_MAX_ITERATIONS >= 10);
/// ```
pub const NEWTON_MAX_ITERATIONS: u32 = 100;

// =============================================================================
// FRONT ANGLE CONSTANTS
// =============================================================================

/// Front angles below this value (radians) are "small".
///
/// Any small angle found while refreshing the front suppresses the
/// merge / split scans for that iteration.
///
/// # Example
///
/// ```rust
/// use config::constants::SMALL_ANGLE;
/// assert!(SMALL_ANGLE < std::f64::consts::FRAC_PI_2);
/// ```
pub const SMALL_ANGLE: f64 = 1.5;

/// Minimum partial angle (radians) of a fan triangle at the apex.
///
/// When the partial angle `angle / nT` falls below this and more than one
/// triangle is planned, one triangle is dropped. When it exceeds this and a
/// single triangle would span an overlong chord, a second one is forced.
pub const MIN_PARTIAL_ANGLE: f64 = 0.8;

/// Chord length (in multiples of `d`) above which a single fan triangle is
/// split in two.
pub const LONG_CHORD_FACTOR: f64 = 1.25;

/// Squared neighbour distance (in multiples of `d²`) below which the apex
/// receives exactly one triangle.
pub const SHORT_EDGE_FACTOR_SQ: f64 = 0.2;

/// Number of triangles per half turn used for the raw fan count
/// `nT = floor(TRIANGLES_PER_HALF_TURN * angle / π) + 1`.
pub const TRIANGLES_PER_HALF_TURN: f64 = 3.0;

/// Full turn in radians.
pub const FULL_TURN: f64 = 2.0 * PI;

// =============================================================================
// PROXIMITY CONSTANTS
// =============================================================================

/// Fronts must be strictly longer than this before merge / split scans run.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_FRONT_LEN_FOR_SCAN;
/// assert_eq!(MIN_FRONT_LEN_FOR_SCAN, 9);
/// ```
pub const MIN_FRONT_LEN_FOR_SCAN: usize = 9;

/// Front positions closer than this (cyclic index distance) to a new point
/// are ignored by the split scan.
pub const SPLIT_NEIGHBOR_EXCLUSION: usize = 3;

/// Squared merge radius in multiples of `d²`.
pub const MERGE_DISTANCE_SQ: f64 = 1.0;

/// Squared split radius in multiples of `d²`.
pub const SPLIT_DISTANCE_SQ: f64 = 1.0;

/// Padding (in multiples of `d`) applied to cached front bounding boxes
/// before testing a new point against them.
pub const BBOX_PADDING: f64 = 1.0;

// =============================================================================
// CONTOUR MARCHING CONSTANTS
// =============================================================================

/// Minimum squared chord (in multiples of `d²`) between consecutive marched
/// contour points.
pub const MARCH_MIN_STEP_SQ: f64 = 0.81;

/// Marching continues while the squared distance to the curve end exceeds
/// this multiple of `d²` (or the parameter has not passed the midpoint).
pub const MARCH_CONTINUE_SQ: f64 = 5.76;

/// When the remaining squared gap exceeds this multiple of `d²` after
/// marching, an intermediate point is inserted.
pub const MARCH_MIDPOINT_SQ: f64 = 1.44;

/// Initial parameter step of the marcher, as a fraction of one
/// `2π / divisions` sector.
pub const MARCH_STEP_FRACTION: f64 = 1.0 / 16.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Default triangle capacity for implicit surfaces.
pub const DEFAULT_MAX_TRIANGLES: usize = 320_000;

/// Default vertex capacity for implicit surfaces.
pub const DEFAULT_MAX_VERTICES: usize = 160_000;

/// Triangle capacity factor for spheres: `detail² * factor`.
pub const SPHERE_TRIANGLE_FACTOR: usize = 8;

/// Vertex capacity factor for spheres: `detail² * factor`.
pub const SPHERE_VERTEX_FACTOR: usize = 6;

/// Triangle capacity factor for cylinders: `detail² * factor`.
pub const CYLINDER_TRIANGLE_FACTOR: usize = 15;

/// Vertex capacity factor for cylinders: `detail² * factor`.
pub const CYLINDER_VERTEX_FACTOR: usize = 10;

/// Triangle capacity factor for planar regions: `detail² * factor`.
pub const PLANE_TRIANGLE_FACTOR: usize = 30;

/// Vertex capacity factor for planar regions: `detail² * factor`.
pub const PLANE_VERTEX_FACTOR: usize = 20;

/// Default quarter-circle division of primitives (24 divisions per turn).
pub const DEFAULT_DIV4: u32 = 6;

/// Offset of the auxiliary reference point used to orient the first
/// triangle of an implicit surface, as a fraction of `d`.
pub const SEED_REFERENCE_OFFSET: f64 = 1.0 / 32.0;

/// Iterations without a new front-length minimum or maximum (and without a
/// closed front) after which a run is declared stuck.
///
/// # Example
///
/// ```rust
/// use config::constants::PROGRESS_WINDOW;
/// assert!(PROGRESS_WINDOW >= 1000);
/// ```
pub const PROGRESS_WINDOW: usize = 20_000;

// =============================================================================
// THRESHOLD SNAPSHOT
// =============================================================================

/// Overridable snapshot of every heuristic threshold of the front algorithm.
///
/// All distance values are relative to the target edge length `d`
/// (squared where the name says so).
///
/// # Examples
/// ```
/// use config::constants::MeshingThresholds;
/// let thresholds = MeshingThresholds {
///     merge_distance_sq: 0.81,
///     ..MeshingThresholds::default()
/// };
/// assert!(thresholds.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshingThresholds {
    /// See [`SMALL_ANGLE`].
    pub small_angle: f64,
    /// See [`MIN_PARTIAL_ANGLE`].
    pub min_partial_angle: f64,
    /// See [`LONG_CHORD_FACTOR`].
    pub long_chord_factor: f64,
    /// See [`SHORT_EDGE_FACTOR_SQ`].
    pub short_edge_factor_sq: f64,
    /// See [`MIN_FRONT_LEN_FOR_SCAN`].
    pub min_front_len_for_scan: usize,
    /// See [`SPLIT_NEIGHBOR_EXCLUSION`].
    pub split_neighbor_exclusion: usize,
    /// See [`MERGE_DISTANCE_SQ`].
    pub merge_distance_sq: f64,
    /// See [`SPLIT_DISTANCE_SQ`].
    pub split_distance_sq: f64,
    /// See [`BBOX_PADDING`].
    pub bbox_padding: f64,
    /// See [`MARCH_MIN_STEP_SQ`].
    pub march_min_step_sq: f64,
    /// See [`MARCH_CONTINUE_SQ`].
    pub march_continue_sq: f64,
    /// See [`MARCH_MIDPOINT_SQ`].
    pub march_midpoint_sq: f64,
}

impl Default for MeshingThresholds {
    fn default() -> Self {
        Self {
            small_angle: SMALL_ANGLE,
            min_partial_angle: MIN_PARTIAL_ANGLE,
            long_chord_factor: LONG_CHORD_FACTOR,
            short_edge_factor_sq: SHORT_EDGE_FACTOR_SQ,
            min_front_len_for_scan: MIN_FRONT_LEN_FOR_SCAN,
            split_neighbor_exclusion: SPLIT_NEIGHBOR_EXCLUSION,
            merge_distance_sq: MERGE_DISTANCE_SQ,
            split_distance_sq: SPLIT_DISTANCE_SQ,
            bbox_padding: BBOX_PADDING,
            march_min_step_sq: MARCH_MIN_STEP_SQ,
            march_continue_sq: MARCH_CONTINUE_SQ,
            march_midpoint_sq: MARCH_MIDPOINT_SQ,
        }
    }
}

impl MeshingThresholds {
    /// Checks that every threshold lies in its meaningful range.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, MeshingThresholds};
    /// let bad = MeshingThresholds { small_angle: 0.0, ..Default::default() };
    /// assert_eq!(bad.validate(), Err(ConfigError::OutOfRange { name: "small_angle", value: 0.0 }));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let angles = [
            ("small_angle", self.small_angle),
            ("min_partial_angle", self.min_partial_angle),
        ];
        for (name, value) in angles {
            if !(value > 0.0 && value < FULL_TURN) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        let factors = [
            ("long_chord_factor", self.long_chord_factor),
            ("short_edge_factor_sq", self.short_edge_factor_sq),
            ("merge_distance_sq", self.merge_distance_sq),
            ("split_distance_sq", self.split_distance_sq),
            ("march_min_step_sq", self.march_min_step_sq),
            ("march_continue_sq", self.march_continue_sq),
            ("march_midpoint_sq", self.march_midpoint_sq),
        ];
        for (name, value) in factors {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        if !(self.bbox_padding >= 0.0 && self.bbox_padding.is_finite()) {
            return Err(ConfigError::OutOfRange {
                name: "bbox_padding",
                value: self.bbox_padding,
            });
        }

        // A front of three vertices is closed immediately, scanning it is pointless.
        if self.min_front_len_for_scan < 3 {
            return Err(ConfigError::InvalidCount {
                name: "min_front_len_for_scan",
                value: self.min_front_len_for_scan,
            });
        }

        Ok(())
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A floating-point threshold is zero, negative, non-finite or too large.
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A count threshold is too small.
    InvalidCount {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange { name, value } => {
                write!(f, "threshold `{name}` out of range: {value}")
            }
            ConfigError::InvalidCount { name, value } => {
                write!(f, "count `{name}` too small: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Edge length of a regular polygon with `divisions` sides inscribed in a
/// circle of `radius`: `2 r sin(π / divisions)`.
///
/// # Example
///
/// ```rust
/// use config::constants::chord_length;
/// let d = chord_length(1.0, 24);
/// assert!((d - 2.0 * (std::f64::consts::PI / 24.0).sin()).abs() < 1e-15);
/// ```
pub fn chord_length(radius: f64, divisions: u32) -> f64 {
    2.0 * radius * (PI / divisions as f64).sin()
}

/// Inverse of [`chord_length`]: radius of the circle whose inscribed
/// `divisions`-gon has edges of length `d`.
///
/// # Example
///
/// ```rust
/// use config::constants::circumradius;
/// let d = 2.0 * (std::f64::consts::PI / 24.0).sin();
/// assert!((circumradius(d, 24) - 1.0).abs() < 1e-12);
/// ```
pub fn circumradius(d: f64, divisions: u32) -> f64 {
    d / (PI / divisions as f64).sin() / 2.0
}

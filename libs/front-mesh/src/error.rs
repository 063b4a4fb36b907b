//! # Mesh Errors
//!
//! Error types for the advancing-front mesher.
//!
//! ## Error Policy
//!
//! - Capacity exhaustion aborts the run, the mesh is never truncated
//! - A run that stops shrinking its fronts aborts with `NoProgress`
//! - Newton degeneracy is not an error (it is logged and skipped)

use config::constants::ConfigError;
use std::fmt;
use thiserror::Error;

/// Which pre-sized buffer overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Vertex positions (and normals).
    Vertices,
    /// Triangle index triples.
    Triangles,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Vertices => write!(f, "vertex"),
            BufferKind::Triangles => write!(f, "triangle"),
        }
    }
}

/// Errors that can occur during triangulation.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// A mesh buffer cursor would pass its pre-declared maximum.
    #[error("{buffer} buffer capacity exceeded (max: {max})")]
    CapacityExceeded {
        /// Buffer that overflowed
        buffer: BufferKind,
        /// Declared capacity
        max: usize,
    },

    /// The active front stopped shrinking.
    #[error("No progress after {iterations} iterations (active front length: {front_len})")]
    NoProgress { iterations: usize, front_len: usize },

    /// Target edge length is not a positive finite number.
    #[error("Invalid target edge length: {0} (must be > 0)")]
    InvalidEdgeLength(f64),

    /// Newton epsilon is not a positive finite number.
    #[error("Invalid Newton epsilon: {0} (must be > 0)")]
    InvalidEpsilon(f64),

    /// A supplied contour has fewer than three points.
    #[error("Contour {index} is degenerate: {len} points (need at least 3)")]
    DegenerateContour { index: usize, len: usize },

    /// Any other invalid primitive parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Rejected threshold configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

/// Result type alias for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_names_buffer() {
        let err = MeshError::CapacityExceeded {
            buffer: BufferKind::Triangles,
            max: 12,
        };
        let text = err.to_string();
        assert!(text.contains("triangle"));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: MeshError = ConfigError::InvalidCount {
            name: "min_front_len_for_scan",
            value: 1,
        }
        .into();
        assert!(matches!(err, MeshError::Config(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}

//! # Config Crate
//!
//! Centralized tuning constants for the advancing-front surface mesher.
//! Every empirically tuned threshold of the front algorithm lives here so
//! that the engine never hard-codes a literal and callers can override the
//! defaults through [`constants::MeshingThresholds`].
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MeshingThresholds, SMALL_ANGLE};
//!
//! let thresholds = MeshingThresholds::default();
//! assert_eq!(thresholds.small_angle, SMALL_ANGLE);
//! assert!(thresholds.validate().is_ok());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Overridable**: Heuristic thresholds are defaults, not hard limits
//! - **Well-Documented**: Every constant states what it gates

pub mod constants;

#[cfg(test)]
mod tests;

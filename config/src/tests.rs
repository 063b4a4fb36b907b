//! # Tests for Config Constants
//!
//! Unit tests verifying the consistency of the tuning constants and the
//! threshold snapshot.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_newton_epsilon_is_small() {
    assert!(DEFAULT_NEWTON_EPSILON > 0.0);
    assert!(DEFAULT_NEWTON_EPSILON < 1e-6);
}

// =============================================================================
// FRONT ANGLE TESTS
// =============================================================================

#[test]
fn test_small_angle_below_right_angle() {
    assert!(SMALL_ANGLE < std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_partial_angle_below_small_angle() {
    // The partial angle correction must act on angles the scan gate already treats as small.
    assert!(MIN_PARTIAL_ANGLE < SMALL_ANGLE);
}

#[test]
fn test_short_edge_factor_below_one() {
    assert!(SHORT_EDGE_FACTOR_SQ < 1.0);
    assert!(LONG_CHORD_FACTOR > 1.0);
}

// =============================================================================
// MARCHING TESTS
// =============================================================================

#[test]
fn test_march_thresholds_ordered() {
    assert!(MARCH_MIN_STEP_SQ < 1.0);
    assert!(MARCH_MIDPOINT_SQ > 1.0);
    assert!(MARCH_CONTINUE_SQ > MARCH_MIDPOINT_SQ);
}

// =============================================================================
// THRESHOLD SNAPSHOT TESTS
// =============================================================================

#[test]
fn test_default_thresholds_match_constants() {
    let t = MeshingThresholds::default();
    assert_eq!(t.small_angle, SMALL_ANGLE);
    assert_eq!(t.min_front_len_for_scan, MIN_FRONT_LEN_FOR_SCAN);
    assert_eq!(t.split_neighbor_exclusion, SPLIT_NEIGHBOR_EXCLUSION);
    assert_eq!(t.merge_distance_sq, MERGE_DISTANCE_SQ);
    assert_eq!(t.bbox_padding, BBOX_PADDING);
    assert!(t.validate().is_ok());
}

#[test]
fn test_thresholds_reject_negative_factor() {
    let t = MeshingThresholds {
        merge_distance_sq: -1.0,
        ..MeshingThresholds::default()
    };
    assert_eq!(
        t.validate(),
        Err(ConfigError::OutOfRange {
            name: "merge_distance_sq",
            value: -1.0
        })
    );
}

#[test]
fn test_thresholds_reject_nan() {
    let t = MeshingThresholds {
        long_chord_factor: f64::NAN,
        ..MeshingThresholds::default()
    };
    assert!(t.validate().is_err());
}

#[test]
fn test_thresholds_reject_tiny_scan_length() {
    let t = MeshingThresholds {
        min_front_len_for_scan: 2,
        ..MeshingThresholds::default()
    };
    assert_eq!(
        t.validate(),
        Err(ConfigError::InvalidCount {
            name: "min_front_len_for_scan",
            value: 2
        })
    );
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::OutOfRange {
        name: "small_angle",
        value: 7.0,
    };
    assert!(err.to_string().contains("small_angle"));
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_chord_and_circumradius_are_inverse() {
    for divisions in [3_u32, 12, 24, 96] {
        let d = chord_length(2.5, divisions);
        assert!((circumradius(d, divisions) - 2.5).abs() < 1e-12);
    }
}

#[test]
fn test_default_sphere_has_unit_radius() {
    let detail = DEFAULT_DIV4 * 4;
    let d = 2.0 * (std::f64::consts::PI / 24.0).sin();
    assert!((circumradius(d, detail) - 1.0).abs() < 1e-12);
}

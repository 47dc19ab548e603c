//! Tests for the five engines on hand-built point sets.

use super::config::EngineConfig;
use super::engine::partitioned::fork_join;
use super::engine::{compute, compute_into, vectorized, Variant};
use super::error::{ConfigError, Error};
use super::kernel::SimdLevel;
use super::lanes::LaneBuffer;
use super::point_set::{PointSet, SENTINEL};

/// Points on a horizontal line whose gaps widen by 0.0004 per step, so every
/// nearest neighbour is known.
fn widening_line(n: usize) -> PointSet {
    let mut x = Vec::with_capacity(n);
    let mut acc = -1.0_f32;
    for i in 0..n {
        x.push(acc);
        acc += 0.0004 * (i + 1) as f32;
    }
    PointSet::from_coords(&x, &vec![0.25; n]).unwrap()
}

// ---------------------------------------------------------------------------
// Variant selector
// ---------------------------------------------------------------------------

#[test]
fn test_variant_round_trips_through_str() {
    for variant in Variant::ALL {
        assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
    }
    assert_eq!(" Tiled ".parse::<Variant>().unwrap(), Variant::Tiled);
    assert!(matches!(
        "simd".parse::<Variant>(),
        Err(ConfigError::UnknownVariant(_))
    ));
}

#[test]
fn test_variant_order_escalates() {
    assert_eq!(Variant::ALL[0], Variant::Naive);
    assert_eq!(Variant::ALL[4], Variant::Vectorized);
}

// ---------------------------------------------------------------------------
// Known answers
// ---------------------------------------------------------------------------

#[test]
fn test_two_points_see_each_other() {
    let points = PointSet::from_coords(&[0.0, 0.3], &[0.0, 0.4]).unwrap();
    let config = EngineConfig::new(2, 1);
    let expected = (0.3_f32 * 0.3 + 0.4 * 0.4).sqrt();
    for variant in [
        Variant::Naive,
        Variant::Partitioned,
        Variant::Tiled,
        Variant::Branchless,
    ] {
        let result = compute(&points, variant, &config).unwrap();
        assert_eq!(result.to_vec(), vec![expected, expected], "{variant}");
    }
}

#[test]
fn test_identical_points_are_at_distance_zero() {
    let points = PointSet::from_coords(&[0.5; 32], &[-0.5; 32]).unwrap();
    let config = EngineConfig::new(2, 8);
    for variant in Variant::ALL {
        let result = compute(&points, variant, &config).unwrap();
        assert!(result.iter().all(|&d| d == 0.0), "{variant}");
    }
}

#[test]
fn test_single_point_keeps_sentinel() {
    let points = PointSet::from_coords(&[0.1], &[0.2]).unwrap();
    let result = compute(&points, Variant::Naive, &EngineConfig::new(1, 1)).unwrap();
    assert_eq!(result.to_vec(), vec![SENTINEL]);
}

#[test]
fn test_line_nearest_is_left_gap() {
    let points = widening_line(64);
    let config = EngineConfig::new(4, 8);
    let naive = compute(&points, Variant::Naive, &config).unwrap();
    let x: &[f32] = points.x();
    // Gaps grow to the right, so each point's nearest neighbour is on its
    // left, except point 0 whose only side is the right.
    assert_eq!(naive[0], x[1] - x[0]);
    for i in 1..64 {
        assert_eq!(naive[i], x[i] - x[i - 1], "point {i}");
    }
    for variant in Variant::ALL {
        assert_eq!(compute(&points, variant, &config).unwrap(), naive, "{variant}");
    }
}

#[test]
fn test_every_variant_is_exact_on_random_points() {
    let points = PointSet::random(512, Some(2024)).unwrap();
    let config = EngineConfig::new(4, 32);
    let naive = compute(&points, Variant::Naive, &config).unwrap();
    assert!(naive.iter().all(|&d| d >= 0.0 && d < SENTINEL));
    for variant in Variant::ALL {
        // The vector kernel performs the same IEEE-754 operations, so even
        // it matches bit-for-bit.
        assert_eq!(compute(&points, variant, &config).unwrap(), naive, "{variant}");
    }
}

#[test]
fn test_ties_keep_the_first_minimum() {
    // Point 1 sits exactly between points 0 and 2: both neighbours tie.
    let points = PointSet::from_coords(&[0.0, 0.5, 1.0, -1.0], &[0.0; 4]).unwrap();
    let config = EngineConfig::new(2, 2);
    let naive = compute(&points, Variant::Naive, &config).unwrap();
    assert_eq!(naive[1], 0.5);
    for variant in [Variant::Partitioned, Variant::Tiled, Variant::Branchless] {
        assert_eq!(compute(&points, variant, &config).unwrap(), naive, "{variant}");
    }
}

#[test]
fn test_vectorized_backends_agree() {
    let points = PointSet::random(256, Some(8)).unwrap();
    let config = EngineConfig::new(2, 16);
    let mut portable = LaneBuffer::filled(256, 0.0).unwrap();
    let mut native = LaneBuffer::filled(256, 0.0).unwrap();
    vectorized::run_with_level(&points, &config, SimdLevel::Portable, &mut portable).unwrap();
    vectorized::run_with_level(&points, &config, SimdLevel::Avx2, &mut native).unwrap();
    assert_eq!(portable, native);
    assert_eq!(portable, compute(&points, Variant::Naive, &config).unwrap());
}

// ---------------------------------------------------------------------------
// Invocation surface
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_geometry_is_rejected_before_running() {
    let points = PointSet::random(60, Some(1)).unwrap();
    let err = compute(&points, Variant::Partitioned, &EngineConfig::new(8, 1)).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::WorkersDoNotDivide { n: 60, workers: 8 })
    ));

    let mut results = LaneBuffer::filled(60, -3.0).unwrap();
    let err = compute_into(
        &points,
        Variant::Vectorized,
        &EngineConfig::new(2, 10),
        &mut results,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::TileNotLaneMultiple { .. })
    ));
    // Rejected calls leave the buffer untouched.
    assert!(results.iter().all(|&v| v == -3.0));
}

#[test]
fn test_compute_into_ignores_previous_contents() {
    let points = PointSet::random(128, Some(77)).unwrap();
    let config = EngineConfig::new(2, 16);
    let expected = compute(&points, Variant::Naive, &config).unwrap();

    for variant in Variant::ALL {
        let mut results = LaneBuffer::filled(128, 0.0).unwrap();
        compute_into(&points, variant, &config, &mut results).unwrap();
        assert_eq!(results, expected, "{variant}");

        let mut wrong_size = LaneBuffer::filled(3, 0.0).unwrap();
        compute_into(&points, variant, &config, &mut wrong_size).unwrap();
        assert_eq!(wrong_size, expected, "{variant}");
    }
}

#[test]
fn test_compute_into_resets_lane_padding() {
    let points = PointSet::from_coords(&[0.0, 0.3, 0.9], &[0.0; 3]).unwrap();
    let mut results = LaneBuffer::filled(3, -1.0).unwrap();
    compute_into(&points, Variant::Naive, &EngineConfig::new(1, 1), &mut results).unwrap();

    let expected = compute(&points, Variant::Naive, &EngineConfig::new(1, 1)).unwrap();
    assert_eq!(results, expected);
    assert!(results.lanes()[0].0[3..].iter().all(|&v| v == SENTINEL));
}

#[test]
fn test_repeated_calls_are_identical() {
    let points = PointSet::random(256, Some(31)).unwrap();
    let config = EngineConfig::new(8, 8);
    for variant in Variant::ALL {
        let first = compute(&points, variant, &config).unwrap();
        let second = compute(&points, variant, &config).unwrap();
        assert_eq!(first, second, "{variant}");
    }
}

// ---------------------------------------------------------------------------
// Fork-join driver
// ---------------------------------------------------------------------------

#[test]
fn test_fork_join_hands_each_worker_its_own_chunk() {
    let mut out = vec![0_usize; 12];
    fork_join(&mut out, 3, |worker, chunk| chunk.fill(worker + 1)).unwrap();
    assert_eq!(out, [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
}

#[test]
fn test_fork_join_reports_panicking_worker_after_joining_all() {
    let mut out = vec![0_usize; 12];
    let err = fork_join(&mut out, 3, |worker, chunk| {
        assert!(worker != 1, "worker 1 fails");
        chunk.fill(worker + 10);
    })
    .unwrap_err();

    assert!(matches!(err, Error::WorkerPanicked { worker: 1 }));
    assert_eq!(out[0..3], [10, 10, 10]);
    assert_eq!(out[3..6], [0, 0, 0]);
    assert_eq!(out[6..9], [12, 12, 12]);
    assert_eq!(out[9..12], [13, 13, 13]);
}

#[test]
fn test_fork_join_reports_lowest_failed_worker() {
    let mut out = vec![0_u8; 8];
    let err = fork_join(&mut out, 2, |worker, _| {
        assert!(worker < 2, "worker {worker} fails");
    })
    .unwrap_err();
    assert!(matches!(err, Error::WorkerPanicked { worker: 2 }));
}

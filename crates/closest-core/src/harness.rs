//! Cross-variant validation harness.
//!
//! Runs every requested engine on the same point set, times each run and
//! checks the output against the `Naive` baseline. Repeated runs of a variant
//! must also reproduce their first result bit-for-bit.

use std::time::Instant;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::engine::{compute, ResultVector, Variant};
use crate::error::Result;
use crate::kernel::{simd_level, SimdLevel};
use crate::latency::{compute_latency_stats, LatencyStats};
use crate::point_set::PointSet;

/// Default absolute tolerance for the vectorized engine.
pub const DEFAULT_VECTOR_TOLERANCE: f32 = 1e-5;

/// How closely a candidate must match the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Tolerance {
    /// Values must compare equal.
    Exact,
    /// Values may differ by at most this absolute amount.
    Abs(f32),
}

impl Tolerance {
    #[inline]
    fn accepts(self, expected: f32, actual: f32) -> bool {
        match self {
            Tolerance::Exact => expected == actual,
            Tolerance::Abs(eps) => (expected - actual).abs() <= eps,
        }
    }
}

/// Outcome of comparing a candidate result against a baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Indices outside tolerance, plus any length difference.
    pub mismatches: usize,
    /// Largest absolute deviation over the common indices.
    pub max_abs_diff: f32,
    /// First index outside tolerance.
    pub first_mismatch: Option<usize>,
}

impl Comparison {
    /// `true` when nothing was outside tolerance.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches == 0
    }
}

/// Compares `candidate` against `baseline` index by index.
#[must_use]
pub fn compare(baseline: &[f32], candidate: &[f32], tolerance: Tolerance) -> Comparison {
    let mut comparison = Comparison {
        mismatches: baseline.len().abs_diff(candidate.len()),
        ..Comparison::default()
    };
    for (i, (&expected, &actual)) in baseline.iter().zip(candidate).enumerate() {
        comparison.max_abs_diff = comparison.max_abs_diff.max((expected - actual).abs());
        if !tolerance.accepts(expected, actual) {
            comparison.mismatches += 1;
            comparison.first_mismatch.get_or_insert(i);
        }
    }
    if comparison.first_mismatch.is_none() && comparison.mismatches > 0 {
        comparison.first_mismatch = Some(baseline.len().min(candidate.len()));
    }
    comparison
}

/// Result of one variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    /// Engine variant.
    pub variant: Variant,
    /// Run time statistics.
    pub latency: LatencyStats,
    /// Mean speed-up over the naive baseline.
    pub speedup: Option<f64>,
    /// Agreement with the naive baseline.
    pub comparison: Comparison,
    /// Every repetition reproduced the first result bit-for-bit.
    pub idempotent: bool,
    /// Matched the baseline and was idempotent.
    pub passed: bool,
}

/// Result of a harness run.
#[derive(Debug, Clone, Serialize)]
pub struct HarnessReport {
    /// Number of points.
    pub points: usize,
    /// Engine geometry used for every variant.
    pub engine: EngineConfig,
    /// Vector backend used by the vectorized variant.
    pub simd_level: SimdLevel,
    /// Timed runs per variant.
    pub repetitions: usize,
    /// One entry per variant, baseline first.
    pub variants: Vec<VariantReport>,
}

impl HarnessReport {
    /// `true` when every variant passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.variants.iter().all(|report| report.passed)
    }

    /// Report for `variant`, if it was run.
    #[must_use]
    pub fn get(&self, variant: Variant) -> Option<&VariantReport> {
        self.variants.iter().find(|report| report.variant == variant)
    }
}

/// Drives every engine over one shared point set.
#[derive(Debug)]
pub struct Harness<'a> {
    points: &'a PointSet,
    config: EngineConfig,
    vector_tolerance: Tolerance,
}

impl<'a> Harness<'a> {
    /// Creates a harness over `points` with the given engine geometry.
    #[must_use]
    pub fn new(points: &'a PointSet, config: EngineConfig) -> Self {
        Self {
            points,
            config,
            vector_tolerance: Tolerance::Abs(DEFAULT_VECTOR_TOLERANCE),
        }
    }

    /// Overrides the tolerance applied to the vectorized engine.
    #[must_use]
    pub fn with_vector_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.vector_tolerance = tolerance;
        self
    }

    fn tolerance_for(&self, variant: Variant) -> Tolerance {
        match variant {
            Variant::Vectorized => self.vector_tolerance,
            _ => Tolerance::Exact,
        }
    }

    /// Runs the baseline and each of `variants` `repetitions` times.
    ///
    /// The geometry is validated for every variant before anything runs.
    /// A `Naive` entry in `variants` is folded into the baseline.
    pub fn run(&self, variants: &[Variant], repetitions: usize) -> Result<HarnessReport> {
        let n = self.points.len();
        self.config.validate(n, Variant::Naive)?;
        for &variant in variants {
            self.config.validate(n, variant)?;
        }
        let repetitions = repetitions.max(1);

        let (baseline, baseline_report) = self.run_variant(Variant::Naive, repetitions, None)?;
        let mut reports = vec![baseline_report];

        for &variant in variants {
            if reports.iter().any(|report| report.variant == variant) {
                continue;
            }
            let (_, report) = self.run_variant(variant, repetitions, Some(&baseline))?;
            reports.push(report);
        }

        let baseline_latency = reports[0].latency;
        for report in &mut reports[1..] {
            report.speedup = report.latency.speedup_over(&baseline_latency);
        }

        Ok(HarnessReport {
            points: n,
            engine: self.config,
            simd_level: simd_level(),
            repetitions,
            variants: reports,
        })
    }

    fn run_variant(
        &self,
        variant: Variant,
        repetitions: usize,
        baseline: Option<&ResultVector>,
    ) -> Result<(ResultVector, VariantReport)> {
        let mut samples = Vec::with_capacity(repetitions);

        let start = Instant::now();
        let result = compute(self.points, variant, &self.config)?;
        samples.push(start.elapsed());

        let mut idempotent = true;
        for _ in 1..repetitions {
            let start = Instant::now();
            let again = compute(self.points, variant, &self.config)?;
            samples.push(start.elapsed());
            idempotent &= compare(&result, &again, Tolerance::Exact).is_match();
        }

        let comparison = match baseline {
            Some(baseline) => compare(baseline, &result, self.tolerance_for(variant)),
            None => Comparison::default(),
        };
        let latency = compute_latency_stats(&samples);
        let passed = comparison.is_match() && idempotent;

        tracing::info!(
            %variant,
            mean_ms = latency.mean.as_secs_f64() * 1e3,
            min_ms = latency.min.as_secs_f64() * 1e3,
            max_abs_diff = comparison.max_abs_diff,
            passed,
            "variant finished"
        );
        if !passed {
            tracing::warn!(
                %variant,
                mismatches = comparison.mismatches,
                first_mismatch = ?comparison.first_mismatch,
                idempotent,
                "variant disagrees with the naive baseline"
            );
        }

        Ok((
            result,
            VariantReport {
                variant,
                latency,
                speedup: None,
                comparison,
                idempotent,
                passed,
            },
        ))
    }
}

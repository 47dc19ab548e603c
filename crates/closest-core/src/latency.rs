//! Timing statistics over repeated engine runs.

use std::time::Duration;

use serde::Serialize;

/// Statistics for repeated run times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencyStats {
    /// Number of samples.
    pub samples: usize,
    /// Fastest run.
    pub min: Duration,
    /// Slowest run.
    pub max: Duration,
    /// Mean run time.
    pub mean: Duration,
    /// Median run time.
    pub p50: Duration,
    /// 95th percentile run time.
    pub p95: Duration,
}

impl LatencyStats {
    /// How many times faster `self` is than `baseline`, by mean.
    ///
    /// Returns `None` when either mean is zero.
    #[must_use]
    pub fn speedup_over(&self, baseline: &LatencyStats) -> Option<f64> {
        if self.mean.is_zero() || baseline.mean.is_zero() {
            return None;
        }
        Some(baseline.mean.as_secs_f64() / self.mean.as_secs_f64())
    }
}

/// Computes latency statistics from duration samples.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use closest_core::latency::compute_latency_stats;
///
/// let samples: Vec<Duration> = (1..=100).map(|i| Duration::from_micros(i * 10)).collect();
/// let stats = compute_latency_stats(&samples);
/// assert_eq!(stats.min, Duration::from_micros(10));
/// ```
#[must_use]
pub fn compute_latency_stats(samples: &[Duration]) -> LatencyStats {
    if samples.is_empty() {
        return LatencyStats::default();
    }

    let mut sorted: Vec<Duration> = samples.to_vec();
    sorted.sort();

    let n = sorted.len();
    let sum: Duration = sorted.iter().sum();

    // SAFETY: The mean of durations cannot exceed the maximum duration, which
    // fits in u64 nanoseconds.
    #[allow(clippy::cast_possible_truncation)]
    let mean = Duration::from_nanos((sum.as_nanos() / n as u128) as u64);

    LatencyStats {
        samples: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        p50: percentile(&sorted, 50),
        p95: percentile(&sorted, 95),
    }
}

/// Nearest-rank percentile of a non-empty sorted list.
fn percentile(sorted: &[Duration], p: usize) -> Duration {
    let n = sorted.len();
    // SAFETY: p is in [0, 100], so the rounded index is in [0, n - 1].
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let idx = ((p as f64 / 100.0) * (n - 1) as f64).round() as usize;
    sorted[idx.min(n - 1)]
}

//! Nearest-neighbour distance engines.
//!
//! Five implementations of the same computation, each adding one layer on
//! top of the previous one:
//!
//! | Variant       | Adds                                              |
//! |---------------|---------------------------------------------------|
//! | `Naive`       | reference O(N²) scan, single thread               |
//! | `Partitioned` | outer loop split across fork-join workers         |
//! | `Tiled`       | block iteration over both loops for cache reuse   |
//! | `Branchless`  | arithmetic masking instead of the `if` update     |
//! | `Vectorized`  | 8-lane kernel with lane rotation for self-pairs   |
//!
//! Every variant writes `result[i] = min_{j != i} distance(i, j)` and must
//! agree with `Naive`. No engine keeps state between calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ConfigError, Result};
use crate::kernel::simd_level;
use crate::lanes::LaneBuffer;
use crate::point_set::{PointSet, SENTINEL};

pub mod branchless;
pub mod partitioned;
pub mod sequential;
pub mod tiled;
pub mod vectorized;

/// Per-point nearest-neighbour distances, index-aligned with the point set.
pub type ResultVector = LaneBuffer;

/// Optimization level selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single-threaded reference scan.
    Naive,
    /// Multi-threaded partitioning of the outer loop.
    Partitioned,
    /// Partitioning plus tiling of both loops.
    Tiled,
    /// Tiling plus branch-free minimum update.
    Branchless,
    /// Branch-free tiling on 8-wide vector lanes.
    Vectorized,
}

impl Variant {
    /// All variants in escalation order.
    pub const ALL: [Variant; 5] = [
        Variant::Naive,
        Variant::Partitioned,
        Variant::Tiled,
        Variant::Branchless,
        Variant::Vectorized,
    ];

    /// Lowercase name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Naive => "naive",
            Variant::Partitioned => "partitioned",
            Variant::Tiled => "tiled",
            Variant::Branchless => "branchless",
            Variant::Vectorized => "vectorized",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}

/// Computes every point's nearest-neighbour distance with `variant`.
///
/// # Errors
///
/// - [`ConfigError`] if `config` does not fit `points.len()` for `variant`;
///   nothing is computed in that case
/// - [`crate::Error::Allocation`] if the result buffer cannot be reserved
/// - [`crate::Error::WorkerSpawn`] / [`crate::Error::WorkerPanicked`] from
///   the fork-join driver
///
/// # Example
///
/// ```
/// use closest_core::{compute, EngineConfig, PointSet, Variant};
///
/// let points = PointSet::random(64, Some(7))?;
/// let config = EngineConfig::new(2, 8);
/// let naive = compute(&points, Variant::Naive, &config)?;
/// let simd = compute(&points, Variant::Vectorized, &config)?;
/// assert_eq!(naive, simd);
/// # Ok::<(), closest_core::Error>(())
/// ```
pub fn compute(points: &PointSet, variant: Variant, config: &EngineConfig) -> Result<ResultVector> {
    config.validate(points.len(), variant)?;
    let mut results = LaneBuffer::filled(points.len(), SENTINEL)?;
    run(points, variant, config, &mut results)?;
    Ok(results)
}

/// Like [`compute`], but writes into an existing buffer.
///
/// `results` is reset to [`SENTINEL`], or reallocated if its length differs
/// from the point count; its previous contents never influence the output.
pub fn compute_into(
    points: &PointSet,
    variant: Variant,
    config: &EngineConfig,
    results: &mut ResultVector,
) -> Result<()> {
    config.validate(points.len(), variant)?;
    if results.len() == points.len() {
        results.fill_all(SENTINEL);
    } else {
        *results = LaneBuffer::filled(points.len(), SENTINEL)?;
    }
    run(points, variant, config, results)
}

fn run(
    points: &PointSet,
    variant: Variant,
    config: &EngineConfig,
    results: &mut ResultVector,
) -> Result<()> {
    tracing::debug!(
        %variant,
        n = points.len(),
        workers = config.workers,
        tile_size = config.tile_size,
        "computing nearest distances"
    );
    match variant {
        Variant::Naive => {
            sequential::run(points, results);
            Ok(())
        }
        Variant::Partitioned => partitioned::run(points, config, results),
        Variant::Tiled => tiled::run(points, config, results),
        Variant::Branchless => branchless::run(points, config, results),
        Variant::Vectorized => vectorized::run_with_level(points, config, simd_level(), results),
    }
}

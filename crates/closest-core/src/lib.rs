//! # Closest Core
//!
//! All-pairs nearest-neighbour distances for 2-D points, computed five ways.
//!
//! For N points, every point's distance to its nearest other point is found
//! with a brute-force O(N²) scan. The same numerical contract is implemented
//! with escalating optimization layers, and every layer must reproduce the
//! naive baseline:
//!
//! - **Naive**: single-threaded reference scan
//! - **Partitioned**: fork-join workers over disjoint row partitions
//! - **Tiled**: cache tiling of both loops
//! - **Branchless**: arithmetic masking instead of the conditional update
//! - **Vectorized**: 8-lane kernel (AVX2 when available) with lane rotation
//!
//! ## Quick Start
//!
//! ```rust
//! use closest_core::{EngineConfig, Harness, PointSet, Variant};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let points = PointSet::random(64, Some(42))?;
//!     let config = EngineConfig::new(2, 8);
//!
//!     let report = Harness::new(&points, config).run(&Variant::ALL, 1)?;
//!     assert!(report.all_passed());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )
)]

pub mod config;
pub mod engine;
#[cfg(test)]
mod engine_tests;
pub mod error;
pub mod harness;
pub mod kernel;
pub mod lanes;
#[cfg(test)]
mod lanes_tests;
pub mod latency;
pub mod point_set;

pub use config::{ClosestConfig, EngineConfig, LoggingConfig};
pub use engine::{compute, compute_into, ResultVector, Variant};
pub use error::{ConfigError, Error, Result};
pub use harness::{compare, Comparison, Harness, HarnessReport, Tolerance, VariantReport};
pub use kernel::{distance, simd_level, SimdLevel};
pub use lanes::{F32x8, LaneBuffer, LANES};
pub use latency::LatencyStats;
pub use point_set::{generate_coordinates, PointSet, COORD_MAX, COORD_MIN, SENTINEL};

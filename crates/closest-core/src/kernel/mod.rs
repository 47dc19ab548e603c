//! Euclidean distance kernels.
//!
//! # Module Structure
//!
//! - `portable`: 8-lane kernels on plain arrays, used on every target
//! - `x86_avx2`: AVX2 intrinsics kernels (x86_64 only)
//! - `dispatch`: runtime SIMD level detection and backend selection
//!
//! The scalar [`distance`] and the 8-lane forms perform the same IEEE-754
//! operations in the same order (sub, mul, mul, add, sqrt; no FMA), so a lane
//! result is bit-identical to the scalar result for the same inputs.
#![allow(clippy::doc_markdown)] // ISA nomenclature in docs.

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for SIMD unsafe blocks in this module tree.
// - Condition 1: Loads and stores go through `F32x8` references, which are
//   32-byte aligned by type, so aligned 256-bit intrinsics are always valid.
// - Condition 2: Target-featured functions are called only after the runtime
//   feature check in `dispatch`.
// Reason: Intrinsics are required for the lane-rotation kernel.

pub mod portable;

#[cfg(target_arch = "x86_64")]
mod x86_avx2;

#[cfg(target_arch = "x86_64")]
pub(crate) use x86_avx2::fold_tile_avx2;

mod dispatch;

pub use dispatch::{fold_tile, simd_level, SimdLevel};
pub use portable::{blend_lt, distance8, rotate_lanes};

use crate::lanes::LANES;

/// Euclidean distance between `(x_i, y_i)` and `(x_j, y_j)`.
#[inline]
#[must_use]
pub fn distance(x_i: f32, y_i: f32, x_j: f32, y_j: f32) -> f32 {
    let dx = x_i - x_j;
    let dy = y_i - y_j;
    (dx * dx + dy * dy).sqrt()
}

/// Lane rotations needed to compare one i-group against one j-group.
///
/// A full cycle of [`LANES`] rotations pairs every i-lane with every j-lane.
/// When both groups are the same lane group, the last rotation would line
/// every lane up with itself, so it is skipped.
#[inline]
#[must_use]
pub const fn rotation_count(same_group: bool) -> usize {
    if same_group {
        LANES - 1
    } else {
        LANES
    }
}

//! Portable 8-lane kernels.
//!
//! These serve as:
//! - The vector backend on targets without AVX2
//! - Reference implementations for testing the intrinsics kernels

use std::array;

use super::{distance, rotation_count};
use crate::lanes::{F32x8, LANES};

/// Lane-wise Euclidean distance for eight independent point pairs.
#[inline]
#[must_use]
pub fn distance8(x_i: &F32x8, y_i: &F32x8, x_j: &F32x8, y_j: &F32x8) -> F32x8 {
    F32x8(array::from_fn(|k| {
        distance(x_i.0[k], y_i.0[k], x_j.0[k], y_j.0[k])
    }))
}

/// Rotates lanes down by one: lane `k` takes lane `k + 1`, lane 0 wraps
/// around to the last slot.
#[inline]
#[must_use]
pub fn rotate_lanes<T: Copy>(lanes: [T; LANES]) -> [T; LANES] {
    array::from_fn(|k| lanes[(k + 1) % LANES])
}

/// Per lane, picks `candidate` where `candidate < current` and keeps
/// `current` otherwise (ties keep `current`).
///
/// Selection is done on the bit patterns through an all-ones/all-zeros mask,
/// the same way a hardware blend does.
#[inline]
#[must_use]
pub fn blend_lt(current: &F32x8, candidate: &F32x8) -> F32x8 {
    F32x8(array::from_fn(|k| {
        let mask = 0_u32.wrapping_sub(u32::from(candidate.0[k] < current.0[k]));
        f32::from_bits((candidate.0[k].to_bits() & mask) | (current.0[k].to_bits() & !mask))
    }))
}

/// Folds an i-tile against a j-tile, lowering `results` in place.
///
/// `x_i`, `y_i` and `results` cover the same lane groups; `x_j`, `y_j` cover
/// the j-tile. `diagonal` marks the i-tile and the j-tile as the same tile,
/// in which case group `g` of one is group `g` of the other.
pub fn fold_tile_portable(
    x_i: &[F32x8],
    y_i: &[F32x8],
    results: &mut [F32x8],
    x_j: &[F32x8],
    y_j: &[F32x8],
    diagonal: bool,
) {
    for (g, result) in results.iter_mut().enumerate() {
        let mut current = *result;
        for (h, (xj, yj)) in x_j.iter().zip(y_j).enumerate() {
            let mut xj = *xj;
            let mut yj = *yj;
            for _ in 0..rotation_count(diagonal && g == h) {
                xj = F32x8(rotate_lanes(xj.0));
                yj = F32x8(rotate_lanes(yj.0));
                let d = distance8(&x_i[g], &y_i[g], &xj, &yj);
                current = blend_lt(&current, &d);
            }
        }
        *result = current;
    }
}

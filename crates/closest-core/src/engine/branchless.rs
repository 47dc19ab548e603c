//! Tiled engine with a branch-free minimum update.
//!
//! The `if d < nearest` update and the `i != j` exclusion both become
//! arithmetic on 0/1 masks:
//!
//! ```text
//! lt      = (d < nearest) as f32      ge   = 1 - lt
//! other   = (i != j) as f32           same = 1 - other
//! nearest = other * (lt * d + ge * nearest) + same * nearest
//! ```
//!
//! Every term is finite and non-negative, so multiplying by 0 or 1 and
//! adding 0 is exact: the selected value passes through bit-for-bit and a
//! tie (`d == nearest`) keeps the old value, as the branching form does.

use super::partitioned::fork_join;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::kernel::distance;
use crate::point_set::{PointSet, SENTINEL};

/// Runs the branch-free tiled scan on every worker's rows.
///
/// `config` must already be validated for `points.len()` and
/// `Variant::Branchless`.
pub fn run(points: &PointSet, config: &EngineConfig, results: &mut [f32]) -> Result<()> {
    let partition_len = config.partition_len(points.len());
    let tile = config.tile_size;
    fork_join(results, partition_len, |worker, out| {
        fill_rows_branchless(points, worker * partition_len, tile, out);
    })
}

/// Branch-free minimum update.
///
/// Returns `d` when `apply` and `d < nearest`, otherwise `nearest`.
#[inline]
#[must_use]
pub fn masked_min(nearest: f32, d: f32, apply: bool) -> f32 {
    let lt = f32::from(u8::from(d < nearest));
    let ge = 1.0 - lt;
    let other = f32::from(u8::from(apply));
    let same = 1.0 - other;
    other * (lt * d + ge * nearest) + same * nearest
}

/// Computes rows `begin..begin + out.len()` tile by tile without branches in
/// the inner loop.
///
/// `out.len()` and `points.len()` must be multiples of `tile`.
pub fn fill_rows_branchless(points: &PointSet, begin: usize, tile: usize, out: &mut [f32]) {
    let x: &[f32] = points.x();
    let y: &[f32] = points.y();
    out.fill(SENTINEL);

    for (row_tile, out_tile) in out.chunks_exact_mut(tile).enumerate() {
        let i0 = begin + row_tile * tile;
        for j0 in (0..points.len()).step_by(tile) {
            for (di, nearest) in out_tile.iter_mut().enumerate() {
                let i = i0 + di;
                for j in j0..j0 + tile {
                    let d = distance(x[i], y[i], x[j], y[j]);
                    *nearest = masked_min(*nearest, d, i != j);
                }
            }
        }
    }
}

//! Branch-free tiled engine on 8-wide vector lanes.
//!
//! Coordinates and results are viewed as lane groups of [`LANES`] points.
//! For each pair of groups, one vector compare only matches lane `k` of the
//! i-group with lane `k` of the j-group, so the j-group is rotated by one
//! lane before each compare. Eight rotations pair every i-lane with every
//! j-lane exactly once. When the two groups are the same group the eighth
//! rotation would pair every lane with itself, so only seven are run; that
//! is the only place a point can meet itself, and it is removed without a
//! per-lane branch.
//!
//! The running minimum is updated with a compare-less-than mask and a blend,
//! so ties keep the old value exactly like the scalar engines.

use super::partitioned::fork_join;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::kernel::{fold_tile, SimdLevel};
use crate::lanes::{F32x8, LaneBuffer, LANES};
use crate::point_set::{PointSet, SENTINEL};

/// Runs the vector scan with an explicit backend.
///
/// `config` must already be validated for `points.len()` and
/// `Variant::Vectorized`, which guarantees whole lane groups per tile and
/// per partition.
pub fn run_with_level(
    points: &PointSet,
    config: &EngineConfig,
    level: SimdLevel,
    results: &mut LaneBuffer,
) -> Result<()> {
    let partition_groups = config.partition_len(points.len()) / LANES;
    let tile_groups = config.tile_size / LANES;
    fork_join(results.lanes_mut(), partition_groups, |worker, out| {
        fill_groups(
            points,
            worker * partition_groups,
            tile_groups,
            level,
            out,
        );
    })
}

/// Computes lane groups `begin..begin + out.len()`.
///
/// `out.len()` and the point set's group count must be multiples of
/// `tile_groups`.
pub fn fill_groups(
    points: &PointSet,
    begin: usize,
    tile_groups: usize,
    level: SimdLevel,
    out: &mut [F32x8],
) {
    let x = points.x().lanes();
    let y = points.y().lanes();
    out.fill(F32x8::splat(SENTINEL));

    for (row_tile, out_tile) in out.chunks_exact_mut(tile_groups).enumerate() {
        let i0 = begin + row_tile * tile_groups;
        let i_range = i0..i0 + tile_groups;
        for j0 in (0..x.len()).step_by(tile_groups) {
            let j_range = j0..j0 + tile_groups;
            fold_tile(
                level,
                &x[i_range.clone()],
                &y[i_range.clone()],
                out_tile,
                &x[j_range.clone()],
                &y[j_range],
                i0 == j0,
            );
        }
    }
}

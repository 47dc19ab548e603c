//! Partitioned engine with cache tiling.
//!
//! Both loops walk fixed-size tiles: for every i-tile of the worker's rows,
//! every j-tile of the whole set is visited and the full `tile × tile`
//! sub-grid is scanned. The same candidates reach each row as in the
//! sequential scan, only in a different order, and a strict minimum does not
//! depend on order.

use super::partitioned::fork_join;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::kernel::distance;
use crate::point_set::{PointSet, SENTINEL};

/// Runs the tiled scan on every worker's rows.
///
/// `config` must already be validated for `points.len()` and `Variant::Tiled`.
pub fn run(points: &PointSet, config: &EngineConfig, results: &mut [f32]) -> Result<()> {
    let partition_len = config.partition_len(points.len());
    let tile = config.tile_size;
    fork_join(results, partition_len, |worker, out| {
        fill_rows_tiled(points, worker * partition_len, tile, out);
    })
}

/// Computes rows `begin..begin + out.len()` tile by tile.
///
/// `out.len()` and `points.len()` must be multiples of `tile`.
pub fn fill_rows_tiled(points: &PointSet, begin: usize, tile: usize, out: &mut [f32]) {
    let x: &[f32] = points.x();
    let y: &[f32] = points.y();
    out.fill(SENTINEL);

    for (row_tile, out_tile) in out.chunks_exact_mut(tile).enumerate() {
        let i0 = begin + row_tile * tile;
        for j0 in (0..points.len()).step_by(tile) {
            for (di, nearest) in out_tile.iter_mut().enumerate() {
                let i = i0 + di;
                for j in j0..j0 + tile {
                    if i != j {
                        let d = distance(x[i], y[i], x[j], y[j]);
                        if d < *nearest {
                            *nearest = d;
                        }
                    }
                }
            }
        }
    }
}

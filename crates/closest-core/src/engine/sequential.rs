//! Reference O(N²) scan, the correctness oracle for every other engine.

use crate::kernel::distance;
use crate::point_set::{PointSet, SENTINEL};

/// Fills `results` (one slot per point) with nearest-neighbour distances.
pub fn run(points: &PointSet, results: &mut [f32]) {
    fill_rows(points, 0, results);
}

/// Computes rows `begin..begin + out.len()` into `out`.
///
/// Each row starts at [`SENTINEL`] and keeps the strict running minimum over
/// every other point.
pub fn fill_rows(points: &PointSet, begin: usize, out: &mut [f32]) {
    let x: &[f32] = points.x();
    let y: &[f32] = points.y();
    for (offset, nearest) in out.iter_mut().enumerate() {
        let i = begin + offset;
        *nearest = SENTINEL;
        for j in 0..points.len() {
            if i != j {
                let d = distance(x[i], y[i], x[j], y[j]);
                if d < *nearest {
                    *nearest = d;
                }
            }
        }
    }
}

//! Multi-threaded engine and the fork-join driver shared by every
//! partitioned variant.
//!
//! The outer index range is cut into `workers` equal, contiguous partitions.
//! Each worker owns the matching slice of the output exclusively and only
//! reads the shared point set, so workers never synchronise; the driver
//! joins all of them before returning.

use std::thread;

use super::sequential;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::point_set::PointSet;

/// Splits `out` into chunks of `partition_len` and runs `work` on each chunk
/// in its own scoped thread, passing the worker index.
///
/// Threads are created per call and joined before returning. Every worker is
/// joined even if an earlier one failed; the first failure is reported.
///
/// # Panics
///
/// Panics if `partition_len` is zero.
pub fn fork_join<T, F>(out: &mut [T], partition_len: usize, work: F) -> Result<()>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    assert!(partition_len > 0, "partition length must be non-zero");
    let work = &work;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(out.len().div_ceil(partition_len));
        for (worker, slice) in out.chunks_mut(partition_len).enumerate() {
            let handle = thread::Builder::new()
                .name(format!("closest-worker-{worker}"))
                .spawn_scoped(scope, move || work(worker, slice))
                .map_err(|source| Error::WorkerSpawn { worker, source })?;
            handles.push(handle);
        }

        let mut failed = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(worker);
            }
        }
        match failed {
            Some(worker) => Err(Error::WorkerPanicked { worker }),
            None => Ok(()),
        }
    })
}

/// Runs the sequential scan on each worker's own rows.
///
/// `config` must already be validated for `points.len()`.
pub fn run(points: &PointSet, config: &EngineConfig, results: &mut [f32]) -> Result<()> {
    let partition_len = config.partition_len(points.len());
    fork_join(results, partition_len, |worker, out| {
        sequential::fill_rows(points, worker * partition_len, out);
    })
}

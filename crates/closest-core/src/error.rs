//! Error types for closest-core.
//!
//! Every failure is detected before any worker thread starts: geometry
//! problems surface as [`ConfigError`], buffer reservation failures as
//! [`Error::Allocation`]. The arithmetic itself has no error cases.

use thiserror::Error;

/// Rejected run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The point set has no points.
    #[error("point count must be greater than zero")]
    EmptyPointSet,

    /// Zero worker threads requested.
    #[error("worker count must be greater than zero")]
    ZeroWorkers,

    /// Zero-sized tiles requested.
    #[error("tile size must be greater than zero")]
    ZeroTileSize,

    /// The outer index range cannot be split into equal partitions.
    #[error("{n} points cannot be split evenly across {workers} workers")]
    WorkersDoNotDivide {
        /// Number of points.
        n: usize,
        /// Requested worker count.
        workers: usize,
    },

    /// A partition is not a whole number of tiles.
    #[error("partition of {partition} points is not a multiple of tile size {tile_size}")]
    TileDoesNotDividePartition {
        /// Points per worker.
        partition: usize,
        /// Requested tile size.
        tile_size: usize,
    },

    /// Tiles must hold whole lane groups for the vectorized engine.
    #[error("tile size {tile_size} is not a multiple of the {lanes}-lane vector width")]
    TileNotLaneMultiple {
        /// Requested tile size.
        tile_size: usize,
        /// Vector lane width.
        lanes: usize,
    },

    /// Unrecognised engine variant name.
    #[error("unknown variant '{0}' (expected naive, partitioned, tiled, branchless or vectorized)")]
    UnknownVariant(String),

    /// The configuration file or environment could not be read.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Errors returned by the engines, the point source and the harness.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid run configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A coordinate or result buffer could not be reserved.
    #[error("failed to allocate a buffer of {elements} f32 values")]
    Allocation {
        /// Requested element count.
        elements: usize,
    },

    /// `x` and `y` were given with different lengths.
    #[error("coordinate length mismatch: x has {x} values, y has {y}")]
    CoordinateLengthMismatch {
        /// Length of `x`.
        x: usize,
        /// Length of `y`.
        y: usize,
    },

    /// A supplied coordinate is NaN or outside `[-1, 1]`.
    #[error("coordinate {axis}[{index}] = {value} is outside [-1, 1]")]
    CoordinateOutOfRange {
        /// `'x'` or `'y'`.
        axis: char,
        /// Point index.
        index: usize,
        /// Offending value.
        value: f32,
    },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {source}")]
    WorkerSpawn {
        /// Index of the worker that could not start.
        worker: usize,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// A worker thread panicked before finishing its partition.
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the failed worker.
        worker: usize,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Result type alias for closest-core operations.
pub type Result<T> = std::result::Result<T, Error>;

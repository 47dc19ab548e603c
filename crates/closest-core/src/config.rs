//! Run configuration.
//!
//! [`EngineConfig`] is the per-call geometry (worker count, tile size) that
//! every engine invocation receives explicitly. [`ClosestConfig`] is the
//! whole harness run, loaded with `figment` from defaults, an optional TOML
//! file and `CLOSEST_`-prefixed environment variables, in that order.
//!
//! ```toml
//! points = 32768
//! seed = 7
//! repetitions = 5
//! variants = ["naive", "vectorized"]
//!
//! [engine]
//! workers = 8
//! tile_size = 32
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::engine::Variant;
use crate::error::ConfigError;
use crate::lanes::LANES;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "closest.toml";

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "CLOSEST_";

/// Partition and tile geometry for one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads; must divide the point count.
    pub workers: usize,
    /// Block edge for the tiled variants; must divide the partition size.
    pub tile_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            tile_size: 32,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the given geometry.
    #[must_use]
    pub const fn new(workers: usize, tile_size: usize) -> Self {
        Self { workers, tile_size }
    }

    /// Points owned by each worker. Only meaningful after [`Self::validate`].
    #[inline]
    #[must_use]
    pub fn partition_len(&self, n: usize) -> usize {
        n / self.workers
    }

    /// Checks that `variant` can run on `n` points with this geometry.
    ///
    /// `Naive` only needs a non-empty set. The other variants need an exact
    /// split into worker partitions; the tiled ones additionally need whole
    /// tiles per partition, and `Vectorized` needs tiles of whole lane groups.
    pub fn validate(&self, n: usize, variant: Variant) -> Result<(), ConfigError> {
        if n == 0 {
            return Err(ConfigError::EmptyPointSet);
        }
        if variant == Variant::Naive {
            return Ok(());
        }

        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if n % self.workers != 0 {
            return Err(ConfigError::WorkersDoNotDivide {
                n,
                workers: self.workers,
            });
        }
        if variant == Variant::Partitioned {
            return Ok(());
        }

        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        let partition = self.partition_len(n);
        if partition % self.tile_size != 0 {
            return Err(ConfigError::TileDoesNotDividePartition {
                partition,
                tile_size: self.tile_size,
            });
        }
        if variant == Variant::Vectorized && self.tile_size % LANES != 0 {
            return Err(ConfigError::TileNotLaneMultiple {
                tile_size: self.tile_size,
                lanes: LANES,
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Full harness run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosestConfig {
    /// Number of generated points.
    pub points: usize,
    /// Generator seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Timed runs per variant.
    pub repetitions: usize,
    /// Variants to run against the naive baseline.
    pub variants: Vec<Variant>,
    /// Engine geometry.
    pub engine: EngineConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Default for ClosestConfig {
    fn default() -> Self {
        Self {
            points: 32_768,
            seed: None,
            repetitions: 5,
            variants: Variant::ALL.to_vec(),
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClosestConfig {
    /// Loads the configuration.
    ///
    /// Layers, lowest priority first: built-in defaults, the TOML file at
    /// `path` (or [`DEFAULT_CONFIG_FILE`]; a missing file is skipped), then
    /// `CLOSEST_*` environment variables such as `CLOSEST_ENGINE__WORKERS=4`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::figment(path).extract().map_err(ConfigError::from)
    }

    /// The layered provider used by [`Self::load`].
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks the engine geometry against `points` for every configured
    /// variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate(self.points, Variant::Naive)?;
        for &variant in &self.variants {
            self.engine.validate(self.points, variant)?;
        }
        Ok(())
    }
}

//! Input points: random generation and the immutable [`PointSet`].

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ConfigError, Error, Result};
use crate::lanes::LaneBuffer;

/// Lower bound of generated coordinates.
pub const COORD_MIN: f32 = -1.0;
/// Upper bound of generated coordinates.
pub const COORD_MAX: f32 = 1.0;

/// Initial running-minimum value, larger than any distance inside
/// `[COORD_MIN, COORD_MAX]²` (the diagonal is 2·√2).
pub const SENTINEL: f32 = 999.0;

/// Draws `n` coordinates independently and uniformly from
/// `[COORD_MIN, COORD_MAX]`.
///
/// # Errors
///
/// - [`ConfigError::EmptyPointSet`] if `n == 0`
/// - [`Error::Allocation`] if the buffer cannot be reserved
pub fn generate_coordinates<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<LaneBuffer> {
    if n == 0 {
        return Err(ConfigError::EmptyPointSet.into());
    }
    let dist = Uniform::new_inclusive(COORD_MIN, COORD_MAX);
    let mut coords = LaneBuffer::filled(n, 0.0)?;
    for value in coords.iter_mut() {
        *value = dist.sample(rng);
    }
    Ok(coords)
}

/// N points as two index-aligned coordinate arrays.
///
/// Immutable once built; engines only ever borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    x: LaneBuffer,
    y: LaneBuffer,
}

impl PointSet {
    /// Generates `n` uniformly distributed points.
    ///
    /// With `Some(seed)` the points are reproducible across runs; with `None`
    /// the generator is seeded from OS entropy.
    pub fn random(n: usize, seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let x = generate_coordinates(n, &mut rng)?;
        let y = generate_coordinates(n, &mut rng)?;
        tracing::debug!(n, ?seed, "generated point set");
        Ok(Self { x, y })
    }

    /// Builds a point set from caller-supplied coordinates.
    ///
    /// # Errors
    ///
    /// - [`Error::CoordinateLengthMismatch`] if `x.len() != y.len()`
    /// - [`ConfigError::EmptyPointSet`] if there are no points
    /// - [`Error::CoordinateOutOfRange`] if a value is NaN or outside
    ///   `[COORD_MIN, COORD_MAX]`, where [`SENTINEL`] would no longer bound
    ///   every distance
    pub fn from_coords(x: &[f32], y: &[f32]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::CoordinateLengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ConfigError::EmptyPointSet.into());
        }
        for (axis, values) in [('x', x), ('y', y)] {
            if let Some((index, &value)) = values
                .iter()
                .enumerate()
                .find(|(_, value)| !(COORD_MIN..=COORD_MAX).contains(*value))
            {
                return Err(Error::CoordinateOutOfRange { axis, index, value });
            }
        }
        Ok(Self {
            x: LaneBuffer::from_slice(x)?,
            y: LaneBuffer::from_slice(y)?,
        })
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`: construction rejects empty sets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// X coordinates.
    #[inline]
    #[must_use]
    pub fn x(&self) -> &LaneBuffer {
        &self.x
    }

    /// Y coordinates.
    #[inline]
    #[must_use]
    pub fn y(&self) -> &LaneBuffer {
        &self.y
    }
}

//! Lane-group storage for the coordinate and result arrays.
//!
//! A [`LaneBuffer`] owns its values as whole groups of [`LANES`] `f32`s in
//! 32-byte aligned [`F32x8`] blocks, so the vectorized engine can view the
//! same memory either as a flat `&[f32]` or as `&[F32x8]` and use aligned
//! 256-bit loads. The alignment comes from the element type, so it holds for
//! every allocation instead of being assumed at the use site.

use std::ops::{Deref, DerefMut};

use bytemuck::{Pod, Zeroable};

use crate::error::{Error, Result};

/// Number of `f32` lanes in one vector register.
pub const LANES: usize = 8;

/// One lane group: eight `f32`s aligned for a 256-bit load.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C, align(32))]
pub struct F32x8(pub [f32; LANES]);

impl F32x8 {
    /// Broadcasts `value` to every lane.
    #[inline]
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self([value; LANES])
    }
}

/// Growable-once buffer of `f32` values stored in aligned lane groups.
///
/// The visible length is exact; the final lane group may carry padding that
/// is never exposed through the `f32` view.
#[derive(Debug, Clone)]
pub struct LaneBuffer {
    lanes: Vec<F32x8>,
    len: usize,
}

impl LaneBuffer {
    /// Allocates `len` values, all set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the backing storage cannot be reserved.
    pub fn filled(len: usize, value: f32) -> Result<Self> {
        let groups = len.div_ceil(LANES);
        let mut lanes = Vec::new();
        lanes
            .try_reserve_exact(groups)
            .map_err(|_| Error::Allocation { elements: len })?;
        lanes.resize(groups, F32x8::splat(value));
        Ok(Self { lanes, len })
    }

    /// Copies `values` into a new aligned buffer.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let mut buffer = Self::filled(values.len(), 0.0)?;
        buffer.copy_from_slice(values);
        Ok(buffer)
    }

    /// Number of visible values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the buffer holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets every value, padding included.
    pub fn fill_all(&mut self, value: f32) {
        self.lanes.fill(F32x8::splat(value));
    }

    /// Lane-group view of the storage, padding included.
    #[inline]
    #[must_use]
    pub fn lanes(&self) -> &[F32x8] {
        &self.lanes
    }

    /// Mutable lane-group view of the storage, padding included.
    #[inline]
    pub fn lanes_mut(&mut self) -> &mut [F32x8] {
        &mut self.lanes
    }

    /// Copies the visible values into a plain `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.deref().to_vec()
    }
}

impl Deref for LaneBuffer {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        &bytemuck::cast_slice(&self.lanes)[..self.len]
    }
}

impl DerefMut for LaneBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut bytemuck::cast_slice_mut(&mut self.lanes)[..self.len]
    }
}

impl PartialEq for LaneBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.deref() == other.deref()
    }
}

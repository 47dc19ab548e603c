//! Runtime SIMD level detection and dispatch wiring.

use serde::Serialize;

use super::portable::fold_tile_portable;
use crate::lanes::F32x8;

/// Vector backend available at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimdLevel {
    /// AVX2 available (x86_64 only).
    Avx2,
    /// Portable array kernel.
    Portable,
}

/// Cached SIMD level - detected once at first use.
static SIMD_LEVEL: std::sync::OnceLock<SimdLevel> = std::sync::OnceLock::new();

fn detect_simd_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return SimdLevel::Avx2;
        }
    }

    SimdLevel::Portable
}

/// Returns the cached SIMD capability level.
#[inline]
#[must_use]
pub fn simd_level() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(detect_simd_level)
}

/// Folds an i-tile against a j-tile with the requested backend.
///
/// Asking for [`SimdLevel::Avx2`] on a CPU without it runs the portable
/// kernel instead.
///
/// # Panics
///
/// Panics if `x_i`, `y_i`, `results` or `x_j`, `y_j` differ in length.
#[inline]
pub fn fold_tile(
    level: SimdLevel,
    x_i: &[F32x8],
    y_i: &[F32x8],
    results: &mut [F32x8],
    x_j: &[F32x8],
    y_j: &[F32x8],
    diagonal: bool,
) {
    assert!(
        x_i.len() == results.len() && y_i.len() == results.len(),
        "i-tile lane groups must match"
    );
    assert_eq!(x_j.len(), y_j.len(), "j-tile lane groups must match");

    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 if simd_level() == SimdLevel::Avx2 => unsafe {
            super::fold_tile_avx2(x_i, y_i, results, x_j, y_j, diagonal);
        },
        _ => fold_tile_portable(x_i, y_i, results, x_j, y_j, diagonal),
    }
}

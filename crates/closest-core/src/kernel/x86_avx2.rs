//! AVX2 kernel for x86_64.
//!
//! Requires runtime AVX2 detection before calling.

use super::rotation_count;
use crate::lanes::F32x8;

/// AVX2 version of [`super::portable::fold_tile_portable`].
///
/// The running minimum of each i-group stays in a register for the whole
/// j-tile and is stored once at the end.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2 (enforced by `#[target_feature]` and runtime detection)
/// - `x_i`, `y_i`, `results` have the same length, as do `x_j`, `y_j`
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn fold_tile_avx2(
    x_i: &[F32x8],
    y_i: &[F32x8],
    results: &mut [F32x8],
    x_j: &[F32x8],
    y_j: &[F32x8],
    diagonal: bool,
) {
    // SAFETY: This function is only called after runtime feature detection confirms AVX2.
    // - Every load/store goes through an `F32x8`, which is 32-byte aligned, so
    //   `_mm256_load_ps`/`_mm256_store_ps` are valid
    // - Indexing is bounds-checked slice indexing
    use std::arch::x86_64::*;

    // Lane k takes lane k + 1; lane 0 wraps to lane 7.
    let rotate = _mm256_setr_epi32(1, 2, 3, 4, 5, 6, 7, 0);

    for (g, result) in results.iter_mut().enumerate() {
        let xi = _mm256_load_ps(x_i[g].0.as_ptr());
        let yi = _mm256_load_ps(y_i[g].0.as_ptr());
        let mut current = _mm256_load_ps(result.0.as_ptr());

        for (h, (xj_lanes, yj_lanes)) in x_j.iter().zip(y_j).enumerate() {
            let mut xj = _mm256_load_ps(xj_lanes.0.as_ptr());
            let mut yj = _mm256_load_ps(yj_lanes.0.as_ptr());

            for _ in 0..rotation_count(diagonal && g == h) {
                xj = _mm256_permutevar8x32_ps(xj, rotate);
                yj = _mm256_permutevar8x32_ps(yj, rotate);

                let dx = _mm256_sub_ps(xi, xj);
                let dy = _mm256_sub_ps(yi, yj);
                let d = _mm256_sqrt_ps(_mm256_add_ps(
                    _mm256_mul_ps(dx, dx),
                    _mm256_mul_ps(dy, dy),
                ));

                let closer = _mm256_cmp_ps::<_CMP_LT_OQ>(d, current);
                current = _mm256_blendv_ps(current, d, closer);
            }
        }

        _mm256_store_ps(result.0.as_mut_ptr(), current);
    }
}

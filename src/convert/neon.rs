use archmage::prelude::*;

use super::{duplicate_texels, swap_br_texels};

// ===========================================================================
// ARM NEON — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn copy_swap_br_row_neon(_token: NeonToken, src: &[u8], dst: &mut [u8]) {
    use core::arch::aarch64::vqtbl1q_u8;
    let mask_bytes: [u8; 16] = [2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14, 13, 12, 15];
    let mask = safe_unaligned_simd::aarch64::vld1q_u8(&mask_bytes);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u8(s);
        let shuffled = vqtbl1q_u8(v, mask);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d, shuffled);
        i += 16;
    }
    swap_br_texels(&src[i..n], &mut dst[i..n]);
}

#[rite]
pub(super) fn duplicate_bytes_row_neon(_token: NeonToken, src: &[u8], dst: &mut [u8]) {
    use core::arch::aarch64::{vzip1q_u8, vzip2q_u8};
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 32 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_u8(s);
        let d0: &mut [u8; 16] = (&mut dst[id..id + 16]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d0, vzip1q_u8(v, v));
        let d1: &mut [u8; 16] = (&mut dst[id + 16..id + 32]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(d1, vzip2q_u8(v, v));
        is += 16;
        id += 32;
    }
    duplicate_texels(&src[is..], &mut dst[id..]);
}

// ===========================================================================
// ARM arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn copy_swap_br_strided_neon(
    t: NeonToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        copy_swap_br_row_neon(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}

#[arcane]
pub(super) fn duplicate_bytes_strided_neon(
    t: NeonToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        duplicate_bytes_row_neon(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 2]);
    }
}

use core::arch::x86_64::{_mm256_permute2x128_si256, _mm256_unpackhi_epi8, _mm256_unpacklo_epi8};

use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::{duplicate_texels, swap_br_texels};

// ===========================================================================
// SIMD constants
// ===========================================================================

const BR_SHUF_MASK_AVX: [i8; 32] = [
    2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14, 13, 12, 15, 2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14,
    13, 12, 15,
];

// ===========================================================================
// x86-64 AVX2 — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn copy_swap_br_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm256_loadu_si256(&BR_SHUF_MASK_AVX);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 32 <= n {
        let s: &[u8; 32] = src[i..i + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let shuffled = _mm256_shuffle_epi8(v, mask);
        let d: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, shuffled);
        i += 32;
    }
    swap_br_texels(&src[i..n], &mut dst[i..n]);
}

// 32 source bytes → 64 destination bytes. unpack works per 128-bit lane, so
// the halves are re-paired with permute2x128 to restore memory order.
#[rite]
pub(super) fn duplicate_bytes_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 32 <= slen && id + 64 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let lo = _mm256_unpacklo_epi8(v, v);
        let hi = _mm256_unpackhi_epi8(v, v);
        let d0: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d0, _mm256_permute2x128_si256::<0x20>(lo, hi));
        let d1: &mut [u8; 32] = (&mut dst[id + 32..id + 64]).try_into().unwrap();
        _mm256_storeu_si256(d1, _mm256_permute2x128_si256::<0x31>(lo, hi));
        is += 32;
        id += 64;
    }
    duplicate_texels(&src[is..], &mut dst[id..]);
}

// ===========================================================================
// x86-64 arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn copy_swap_br_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        copy_swap_br_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}

#[arcane]
pub(super) fn duplicate_bytes_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        duplicate_bytes_row_v3(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 2]);
    }
}

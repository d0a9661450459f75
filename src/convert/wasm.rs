use core::arch::wasm32::{i8x16, i8x16_swizzle};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::{duplicate_texels, swap_br_texels};

// ===========================================================================
// WASM SIMD128 — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn copy_swap_br_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8]) {
    let mask = i8x16(2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14, 13, 12, 15);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = v128_load(s);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(d, i8x16_swizzle(v, mask));
        i += 16;
    }
    swap_br_texels(&src[i..n], &mut dst[i..n]);
}

#[rite]
pub(super) fn duplicate_bytes_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8]) {
    let m0 = i8x16(0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7);
    let m1 = i8x16(8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 32 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = v128_load(s);
        let d0: &mut [u8; 16] = (&mut dst[id..id + 16]).try_into().unwrap();
        v128_store(d0, i8x16_swizzle(v, m0));
        let d1: &mut [u8; 16] = (&mut dst[id + 16..id + 32]).try_into().unwrap();
        v128_store(d1, i8x16_swizzle(v, m1));
        is += 16;
        id += 32;
    }
    duplicate_texels(&src[is..], &mut dst[id..]);
}

// ===========================================================================
// WASM arcane strided wrappers
// ===========================================================================

#[arcane]
pub(super) fn copy_swap_br_strided_wasm128(
    t: Wasm128Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        copy_swap_br_row_wasm128(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}

#[arcane]
pub(super) fn duplicate_bytes_strided_wasm128(
    t: Wasm128Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        duplicate_bytes_row_wasm128(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 2]);
    }
}

use archmage::prelude::*;

use super::{duplicate_texels, swap_br_texels};

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn copy_swap_br_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    swap_br_texels(src, dst);
}

pub(super) fn duplicate_bytes_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    duplicate_texels(src, dst);
}

// ===========================================================================
// Scalar strided wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn copy_swap_br_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        copy_swap_br_row_scalar(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}

pub(super) fn duplicate_bytes_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        duplicate_bytes_row_scalar(t, &src[y * ss..][..w], &mut dst[y * ds..][..w * 2]);
    }
}

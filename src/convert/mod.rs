// ---------------------------------------------------------------------------
// Row/block conversion from a caller's buffer into a locked texture level.
//
// Architecture: a `RowPlan` validates every addressed byte up front, then a
// routine from `ROUTINES` moves the rows. The two rows that do per-texel
// work (red/blue swap, byte duplication) have #[rite] SIMD loops behind
// #[arcane] strided wrappers, dispatched once per image via incant!.
// ---------------------------------------------------------------------------

use archmage::incant;

use crate::UploadError;
use crate::format::{FormatCode, FormatDescriptor};

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;


// ===========================================================================
// Source and destination views
// ===========================================================================

/// A caller-owned image waiting to be uploaded.
///
/// `stride` is the distance between the starts of consecutive rows, counted
/// in source texels (bytes for the 8-bit formats, 16-bit words for the
/// 16-bit formats, and so on). It may exceed `width` for padded or
/// atlas-packed buffers. Block-compressed sources are one contiguous block
/// stream and ignore it.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub format: FormatCode,
}

impl<'a> SourceImage<'a> {
    /// A tightly packed image (`stride == width`).
    pub fn new(data: &'a [u8], width: u32, height: u32, format: FormatCode) -> Self {
        Self {
            data,
            width,
            height,
            stride: width,
            format,
        }
    }

    pub fn with_stride(self, stride: u32) -> Self {
        Self { stride, ..self }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Exclusive write view into one locked texture level.
///
/// `stride` is chosen by the device and is unrelated to the source stride;
/// bytes past `width × texel size` in a row are padding and never written.
#[derive(Debug)]
pub struct MappedRegion<'a> {
    bytes: &'a mut [u8],
    stride: usize,
}

impl<'a> MappedRegion<'a> {
    pub fn new(bytes: &'a mut [u8], stride: usize) -> Self {
        Self { bytes, stride }
    }

    /// Distance in bytes between the starts of consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.bytes
    }
}

// ===========================================================================
// Planning and validation
// ===========================================================================

/// The routine that moves one source format into its destination layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Row-by-row copy of `width × texel size` bytes.
    CopyRows,
    /// Row copy writing `{b2, b1, b0, b3}` for each 4-byte texel.
    SwapRedBlueRows,
    /// Row copy writing each source byte twice.
    DuplicateBytes,
    /// One contiguous copy of the whole block stream.
    CopyBlocks,
}

/// Fully resolved byte addressing for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowPlan {
    conversion: Conversion,
    /// Texels per row.
    width: usize,
    rows: usize,
    src_row_bytes: usize,
    src_stride: usize,
    dst_row_bytes: usize,
    dst_stride: usize,
}

impl RowPlan {
    fn new(
        source: &SourceImage<'_>,
        descriptor: &FormatDescriptor,
        dst_stride: usize,
        swap_red_blue: bool,
    ) -> Result<Self, UploadError> {
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            return Err(UploadError::InvalidDimensions { width, height });
        }
        let conversion = descriptor.conversion(swap_red_blue);

        if let Some(block) = descriptor.block {
            let len = block.stream_len(width, height);
            return Ok(Self {
                conversion,
                width: len,
                rows: 1,
                src_row_bytes: len,
                src_stride: len,
                dst_row_bytes: len,
                dst_stride: len,
            });
        }

        if source.stride < width {
            return Err(UploadError::InvalidStride {
                width,
                stride: source.stride,
            });
        }
        let src_texel = descriptor.source_texel_size();
        let width = width as usize;
        Ok(Self {
            conversion,
            width,
            rows: height as usize,
            src_row_bytes: width * src_texel,
            src_stride: (source.stride as usize).saturating_mul(src_texel),
            dst_row_bytes: width * descriptor.texel_size,
            dst_stride,
        })
    }

    fn check(&self, src_len: usize, dst_len: usize) -> Result<(), UploadError> {
        let required = span(self.rows, self.src_stride, self.src_row_bytes);
        if src_len < required {
            return Err(UploadError::SourceTooSmall {
                required,
                actual: src_len,
            });
        }
        if self.dst_stride < self.dst_row_bytes {
            return Err(UploadError::DestinationTooSmall {
                required: self.dst_row_bytes,
                actual: self.dst_stride,
            });
        }
        let required = span(self.rows, self.dst_stride, self.dst_row_bytes);
        if dst_len < required {
            return Err(UploadError::DestinationTooSmall {
                required,
                actual: dst_len,
            });
        }
        Ok(())
    }
}

/// Bytes from the first row start to the end of the last row.
#[inline]
fn span(rows: usize, stride: usize, row_bytes: usize) -> usize {
    (rows - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row_bytes))
        .unwrap_or(usize::MAX)
}

// ===========================================================================
// Routines
// ===========================================================================

type Routine = fn(&[u8], &mut [u8], &RowPlan);

// Indexed by `Conversion as usize`.
static ROUTINES: [Routine; 4] = [copy_rows, swap_red_blue_rows, duplicate_rows, copy_blocks];

fn copy_rows(src: &[u8], dst: &mut [u8], plan: &RowPlan) {
    for y in 0..plan.rows {
        dst[y * plan.dst_stride..][..plan.dst_row_bytes]
            .copy_from_slice(&src[y * plan.src_stride..][..plan.src_row_bytes]);
    }
}

fn swap_red_blue_rows(src: &[u8], dst: &mut [u8], plan: &RowPlan) {
    let (w, h, ss, ds) = (plan.width, plan.rows, plan.src_stride, plan.dst_stride);
    incant!(
        copy_swap_br_strided(src, dst, w, h, ss, ds),
        [v3, neon, wasm128, scalar]
    );
}

fn duplicate_rows(src: &[u8], dst: &mut [u8], plan: &RowPlan) {
    let (w, h, ss, ds) = (plan.width, plan.rows, plan.src_stride, plan.dst_stride);
    incant!(
        duplicate_bytes_strided(src, dst, w, h, ss, ds),
        [v3, neon, wasm128, scalar]
    );
}

fn copy_blocks(src: &[u8], dst: &mut [u8], plan: &RowPlan) {
    dst[..plan.dst_row_bytes].copy_from_slice(&src[..plan.src_row_bytes]);
}

// ===========================================================================
// Texel helpers shared by the scalar rows and the SIMD tails
// ===========================================================================

#[inline(always)]
fn swap_br_u32(v: u32) -> u32 {
    (v & 0xFF00_FF00) | (v.rotate_left(16) & 0x00FF_00FF)
}

#[inline(always)]
fn swap_br_texels(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let v = u32::from_le_bytes([s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&swap_br_u32(v).to_le_bytes());
    }
}

#[inline(always)]
fn duplicate_texels(src: &[u8], dst: &mut [u8]) {
    for (&v, d) in src.iter().zip(dst.chunks_exact_mut(2)) {
        d[0] = v;
        d[1] = v;
    }
}

// ===========================================================================
// Public API
// ===========================================================================

/// Convert `source` into a mapped texture level, resolving the format from
/// `source.format`.
///
/// An unsupported format code fails before anything is written, as does any
/// stride or size problem on either side.
pub fn convert(
    source: &SourceImage<'_>,
    destination: &mut MappedRegion<'_>,
    swap_red_blue: bool,
) -> Result<(), UploadError> {
    let descriptor = FormatDescriptor::lookup(source.format)?;
    convert_with(source, destination, descriptor, swap_red_blue)
}

/// Like [`convert`], but with an already resolved descriptor.
///
/// `source.format` is not consulted.
pub fn convert_with(
    source: &SourceImage<'_>,
    destination: &mut MappedRegion<'_>,
    descriptor: &FormatDescriptor,
    swap_red_blue: bool,
) -> Result<(), UploadError> {
    let plan = RowPlan::new(source, descriptor, destination.stride, swap_red_blue)?;
    plan.check(source.data.len(), destination.bytes.len())?;
    tracing::trace!(
        format = ?descriptor.source,
        conversion = ?plan.conversion,
        rows = plan.rows,
        src_stride = plan.src_stride,
        dst_stride = plan.dst_stride,
        "converting"
    );
    ROUTINES[plan.conversion as usize](source.data, destination.bytes, &plan);
    Ok(())
}

//! Build [`SourceImage`]s from [`rgb`] pixel types via bytemuck.
//!
//! The pixel type picks the format, so a typed buffer can never be uploaded
//! under the wrong format code:
//!
//! | Pixel | Format |
//! |---|---|
//! | `Bgra<u8>` | `A8R8G8B8` (memory order B, G, R, A) |
//! | `Gray<u8>` | `L8` |
//! | `GrayAlpha<u8>` | `A8L8` (memory order L, A) |
//! | `u16` | `R5G6B5` |
//!
//! ```rust
//! use rgb::Bgra;
//! use texpack::{MemoryDevice, create_and_upload, typed};
//!
//! let pixels = vec![Bgra { b: 10u8, g: 20, r: 30, a: 255 }; 8 * 8];
//! let source = typed::bgra(&pixels, 8, 8);
//! let mut device = MemoryDevice::new();
//! let texture = create_and_upload(&mut device, &source, false).unwrap();
//! assert_eq!(texture.level(0).unwrap().row(0)[..4], [10, 20, 30, 255]);
//! ```
//!
//! With the `imgref` feature, strided `ImgRef` views carry their stride into
//! the source image (see `gray_image` and friends).

use bytemuck::Pod;
use rgb::{Bgra, Gray, GrayAlpha};

use crate::convert::SourceImage;
use crate::format::FormatCode;

fn from_pixels<P: Pod>(pixels: &[P], width: u32, height: u32, format: FormatCode) -> SourceImage<'_> {
    SourceImage::new(bytemuck::cast_slice(pixels), width, height, format)
}

/// 32-bit color, tightly packed.
pub fn bgra(pixels: &[Bgra<u8>], width: u32, height: u32) -> SourceImage<'_> {
    from_pixels(pixels, width, height, FormatCode::A8R8G8B8)
}

/// 8-bit luminance, tightly packed.
pub fn gray(pixels: &[Gray<u8>], width: u32, height: u32) -> SourceImage<'_> {
    from_pixels(pixels, width, height, FormatCode::L8)
}

/// 8-bit luminance with 8-bit alpha, tightly packed.
pub fn gray_alpha(pixels: &[GrayAlpha<u8>], width: u32, height: u32) -> SourceImage<'_> {
    from_pixels(pixels, width, height, FormatCode::A8L8)
}

/// 5:6:5 color. The texels are reinterpreted in host byte order, which
/// matches the device layout on little-endian hosts only.
pub fn rgb565(pixels: &[u16], width: u32, height: u32) -> SourceImage<'_> {
    from_pixels(pixels, width, height, FormatCode::R5G6B5)
}

#[cfg(feature = "imgref")]
mod images {
    use bytemuck::Pod;
    use imgref::ImgRef;
    use rgb::{Bgra, Gray, GrayAlpha};

    use crate::convert::SourceImage;
    use crate::format::FormatCode;

    // Out-of-range dimensions saturate and are rejected by validation.
    fn clamp(v: usize) -> u32 {
        u32::try_from(v).unwrap_or(u32::MAX)
    }

    fn from_image<P: Pod>(img: ImgRef<'_, P>, format: FormatCode) -> SourceImage<'_> {
        let (width, height, stride) = (clamp(img.width()), clamp(img.height()), clamp(img.stride()));
        SourceImage::new(bytemuck::cast_slice(img.into_buf()), width, height, format)
            .with_stride(stride)
    }

    /// 32-bit color image, keeping its stride.
    pub fn bgra_image(img: ImgRef<'_, Bgra<u8>>) -> SourceImage<'_> {
        from_image(img, FormatCode::A8R8G8B8)
    }

    /// Luminance image, keeping its stride.
    ///
    /// ```rust
    /// use imgref::ImgVec;
    /// use rgb::Gray;
    /// use texpack::typed;
    ///
    /// let img = ImgVec::new_stride(vec![Gray::new(7u8); 6 * 4], 5, 4, 6);
    /// let source = typed::gray_image(img.as_ref());
    /// assert_eq!(source.stride, 6);
    /// ```
    pub fn gray_image(img: ImgRef<'_, Gray<u8>>) -> SourceImage<'_> {
        from_image(img, FormatCode::L8)
    }

    /// Luminance plus alpha image, keeping its stride.
    pub fn gray_alpha_image(img: ImgRef<'_, GrayAlpha<u8>>) -> SourceImage<'_> {
        from_image(img, FormatCode::A8L8)
    }

    /// 5:6:5 image in host byte order, keeping its stride.
    pub fn rgb565_image(img: ImgRef<'_, u16>) -> SourceImage<'_> {
        from_image(img, FormatCode::R5G6B5)
    }
}

#[cfg(feature = "imgref")]
pub use images::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn pixel_types_pick_formats() {
        let px = vec![Bgra { b: 1u8, g: 2, r: 3, a: 4 }; 6];
        let s = bgra(&px, 3, 2);
        assert_eq!(s.format, FormatCode::A8R8G8B8);
        assert_eq!(s.data, [1, 2, 3, 4].repeat(6).as_slice());
        assert_eq!(s.stride, 3);

        let px = vec![GrayAlpha::new(9u8, 200); 4];
        let s = gray_alpha(&px, 2, 2);
        assert_eq!(s.format, FormatCode::A8L8);
        assert_eq!(&s.data[..2], &[9, 200]);

        assert_eq!(gray(&[Gray::new(0u8); 4], 2, 2).format, FormatCode::L8);
        assert_eq!(rgb565(&[0u16; 4], 2, 2).data.len(), 8);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn images_keep_their_stride() {
        use imgref::ImgVec;

        let img = ImgVec::new_stride(vec![Bgra::default(); 10 * 3], 7, 3, 10);
        let s = bgra_image(img.as_ref());
        assert_eq!((s.width, s.height, s.stride), (7, 3, 10));
        assert_eq!(s.data.len(), 120);
    }
}

//! The fixed set of pixel encodings the emulated hardware hands us, and what
//! each one looks like once it lands in a device texture.
//!
//! Format codes follow the Direct3D 9 `D3DFORMAT` numbering, with block
//! formats identified by their FourCC.

use core::fmt;

use crate::UploadError;
use crate::convert::Conversion;

/// A raw device format code, as passed in by the emulator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct FormatCode(pub u32);

impl FormatCode {
    pub const A8R8G8B8: Self = Self(21);
    pub const R5G6B5: Self = Self(23);
    pub const A8: Self = Self(28);
    pub const A8P8: Self = Self(40);
    pub const L8: Self = Self(50);
    pub const A8L8: Self = Self(51);
    pub const A4L4: Self = Self(52);
    pub const DXT1: Self = Self::fourcc(*b"DXT1");

    /// Build a FourCC code (`MAKEFOURCC`): first byte in the low bits.
    pub const fn fourcc(tag: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(tag))
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.0.to_le_bytes();
        if tag.iter().all(u8::is_ascii_alphanumeric) {
            let [a, b, c, d] = tag.map(char::from);
            write!(f, "'{a}{b}{c}{d}'")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatCode({self})")
    }
}

/// Encodings a source image may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SourceFormat {
    /// 32-bit BGRA in memory order.
    A8R8G8B8,
    /// 16-bit packed 5:6:5 color.
    R5G6B5,
    /// 8-bit alpha.
    A8,
    /// 8-bit palette index. Always uploaded as [`TextureFormat::A8L8`].
    A8P8,
    /// 8-bit luminance.
    L8,
    /// 16-bit luminance + alpha.
    A8L8,
    /// 4-bit luminance + 4-bit alpha in one byte.
    A4L4,
    /// 4×4 blocks, 8 bytes each.
    Dxt1,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 8] = [
        Self::A8R8G8B8,
        Self::R5G6B5,
        Self::A8,
        Self::A8P8,
        Self::L8,
        Self::A8L8,
        Self::A4L4,
        Self::Dxt1,
    ];

    pub const fn code(self) -> FormatCode {
        match self {
            Self::A8R8G8B8 => FormatCode::A8R8G8B8,
            Self::R5G6B5 => FormatCode::R5G6B5,
            Self::A8 => FormatCode::A8,
            Self::A8P8 => FormatCode::A8P8,
            Self::L8 => FormatCode::L8,
            Self::A8L8 => FormatCode::A8L8,
            Self::A4L4 => FormatCode::A4L4,
            Self::Dxt1 => FormatCode::DXT1,
        }
    }

    #[inline]
    pub fn descriptor(self) -> &'static FormatDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// The format the device texture is created with.
    #[inline]
    pub fn destination(self) -> TextureFormat {
        self.descriptor().destination
    }
}

impl TryFrom<FormatCode> for SourceFormat {
    type Error = UploadError;

    fn try_from(code: FormatCode) -> Result<Self, UploadError> {
        Self::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or(UploadError::UnsupportedFormat(code))
    }
}

/// Formats a device texture is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    A8R8G8B8,
    R5G6B5,
    A8,
    L8,
    A8L8,
    A4L4,
    Dxt1,
}

impl TextureFormat {
    pub const fn code(self) -> FormatCode {
        match self {
            Self::A8R8G8B8 => FormatCode::A8R8G8B8,
            Self::R5G6B5 => FormatCode::R5G6B5,
            Self::A8 => FormatCode::A8,
            Self::L8 => FormatCode::L8,
            Self::A8L8 => FormatCode::A8L8,
            Self::A4L4 => FormatCode::A4L4,
            Self::Dxt1 => FormatCode::DXT1,
        }
    }

    /// Bytes per texel, 0 for block-compressed formats.
    pub const fn texel_size(self) -> usize {
        match self {
            Self::A8R8G8B8 => 4,
            Self::R5G6B5 | Self::A8L8 => 2,
            Self::A8 | Self::L8 | Self::A4L4 => 1,
            Self::Dxt1 => 0,
        }
    }

    pub const fn block(self) -> Option<BlockLayout> {
        match self {
            Self::Dxt1 => Some(BlockLayout::DXT1),
            _ => None,
        }
    }

    /// Tightly packed `(bytes per row, rows)` of a `width × height` level.
    ///
    /// For block formats a "row" is one row of blocks.
    pub fn packed_extent(self, width: u32, height: u32) -> (usize, usize) {
        match self.block() {
            Some(block) => {
                let (across, down) = block.blocks(width, height);
                (across * block.bytes, down)
            }
            None => (width as usize * self.texel_size(), height as usize),
        }
    }
}

/// Geometry of a block-compressed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Texels per block edge.
    pub dim: u32,
    /// Encoded bytes per block.
    pub bytes: usize,
}

impl BlockLayout {
    pub const DXT1: Self = Self { dim: 4, bytes: 8 };

    /// Blocks across and down. Partial blocks at the edges count as whole ones.
    #[inline]
    pub fn blocks(&self, width: u32, height: u32) -> (usize, usize) {
        (
            width.div_ceil(self.dim) as usize,
            height.div_ceil(self.dim) as usize,
        )
    }

    /// Length of the whole block stream for a `width × height` image.
    #[inline]
    pub fn stream_len(&self, width: u32, height: u32) -> usize {
        let (across, down) = self.blocks(width, height);
        across * down * self.bytes
    }
}

/// How source texels turn into destination texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Bytes are copied as-is.
    Identity,
    /// Every source byte is written twice.
    Duplicate,
    /// Opaque block data, relocated without per-texel work.
    None,
}

/// Static knowledge about one source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub source: SourceFormat,
    pub destination: TextureFormat,
    /// Destination bytes per texel, 0 for block formats.
    pub texel_size: usize,
    pub block: Option<BlockLayout>,
    pub expansion: Expansion,
    /// Whether a red/blue channel swap can be applied.
    pub swappable: bool,
}

impl FormatDescriptor {
    const fn plain(source: SourceFormat, destination: TextureFormat) -> Self {
        Self {
            source,
            destination,
            texel_size: destination.texel_size(),
            block: None,
            expansion: Expansion::Identity,
            swappable: false,
        }
    }

    /// Resolve a raw code, applying the palette-index promotion.
    pub fn lookup(code: FormatCode) -> Result<&'static Self, UploadError> {
        SourceFormat::try_from(code).map(SourceFormat::descriptor)
    }

    /// Bytes per source texel; this is the unit source strides are measured in.
    pub const fn source_texel_size(&self) -> usize {
        match self.expansion {
            Expansion::Duplicate => self.texel_size / 2,
            Expansion::Identity | Expansion::None => self.texel_size,
        }
    }

    pub const fn is_block_compressed(&self) -> bool {
        self.block.is_some()
    }

    /// The routine that moves this format, honoring `swap_red_blue` only
    /// where the format has red and blue channels to swap.
    pub fn conversion(&self, swap_red_blue: bool) -> Conversion {
        match self.expansion {
            Expansion::None => Conversion::CopyBlocks,
            Expansion::Duplicate => Conversion::DuplicateBytes,
            Expansion::Identity if swap_red_blue && self.swappable => Conversion::SwapRedBlueRows,
            Expansion::Identity => Conversion::CopyRows,
        }
    }
}

// Indexed by `SourceFormat as usize`.
static DESCRIPTORS: [FormatDescriptor; 8] = [
    FormatDescriptor {
        swappable: true,
        ..FormatDescriptor::plain(SourceFormat::A8R8G8B8, TextureFormat::A8R8G8B8)
    },
    FormatDescriptor::plain(SourceFormat::R5G6B5, TextureFormat::R5G6B5),
    FormatDescriptor::plain(SourceFormat::A8, TextureFormat::A8),
    FormatDescriptor {
        expansion: Expansion::Duplicate,
        ..FormatDescriptor::plain(SourceFormat::A8P8, TextureFormat::A8L8)
    },
    FormatDescriptor::plain(SourceFormat::L8, TextureFormat::L8),
    FormatDescriptor::plain(SourceFormat::A8L8, TextureFormat::A8L8),
    FormatDescriptor::plain(SourceFormat::A4L4, TextureFormat::A4L4),
    FormatDescriptor {
        texel_size: 0,
        block: Some(BlockLayout::DXT1),
        expansion: Expansion::None,
        ..FormatDescriptor::plain(SourceFormat::Dxt1, TextureFormat::Dxt1)
    },
];

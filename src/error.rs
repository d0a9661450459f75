use crate::format::{FormatCode, TextureFormat};

/// Failure reported by a [`TextureDevice`](crate::TextureDevice) or one of its textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// The device ran out of texture memory.
    #[error("device is out of texture memory")]
    OutOfMemory,
    /// The device cannot create textures of this format.
    #[error("device does not support {0:?} textures")]
    UnsupportedFormat(TextureFormat),
    /// Requested dimensions exceed what the device can allocate.
    #[error("{width}x{height} exceeds the device limit of {max}")]
    TooLarge { width: u32, height: u32, max: u32 },
    /// The level is already locked for writing.
    #[error("mip level {0} is already locked")]
    AlreadyLocked(u32),
    /// The texture has no such mip level.
    #[error("mip level {0} does not exist")]
    InvalidLevel(u32),
}

/// Why an upload did not produce a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UploadError {
    /// The device refused to create the texture.
    #[error("texture allocation failed: {0}")]
    Allocation(#[source] DeviceError),
    /// The device refused to map the destination level.
    #[error("could not lock texture level: {0}")]
    Lock(#[source] DeviceError),
    /// The format code is not one of the supported encodings.
    #[error("unsupported texture format {0}")]
    UnsupportedFormat(FormatCode),
    /// A replace upload does not match the existing texture's size.
    #[error("source is {actual:?} but the texture is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// A replace upload resolves to a different destination format.
    #[error("source uploads as {actual:?} but the texture is {expected:?}")]
    FormatMismatch {
        expected: TextureFormat,
        actual: TextureFormat,
    },
    /// Width or height is zero.
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// Source stride is smaller than the row width.
    #[error("source stride {stride} is smaller than width {width}")]
    InvalidStride { width: u32, stride: u32 },
    /// The source buffer does not cover every addressed row.
    #[error("source buffer holds {actual} bytes, {required} required")]
    SourceTooSmall { required: usize, actual: usize },
    /// The mapped destination does not cover every addressed row.
    #[error("destination holds {actual} bytes, {required} required")]
    DestinationTooSmall { required: usize, actual: usize },
}

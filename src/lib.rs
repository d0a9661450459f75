//! # texpack
//!
//! *Pack emulated pixels into device textures.*
//!
//! Takes a raw pixel buffer in one of the fixed encodings used by emulated
//! graphics hardware and writes it into a device texture exactly as the
//! device lays it out: independent source and destination strides, mip-chain
//! eligibility, palette promotion, optional red/blue swap, and DXT1 block
//! streams. The red/blue swap and byte duplication rows are SIMD-optimized
//! for x86-64 AVX2, ARM NEON, and WASM SIMD128 with automatic fallback to
//! scalar code.
//!
//! ## Core operations (always available)
//!
//! - [`create_and_upload`] allocates a texture for a [`SourceImage`] and
//!   fills its base level. On failure nothing is left allocated.
//! - [`replace_upload`] overwrites the base level of an existing texture.
//! - [`allocate_only`] creates a texture without filling it.
//! - [`convert`] runs the conversion engine on any [`MappedRegion`].
//!
//! The device is abstracted by [`TextureDevice`] and [`LockableTexture`].
//! [`MemoryDevice`] is a heap-backed implementation.
//!
//! ## Feature flags
//!
//! - **`rgb`** — build [`SourceImage`]s from [`rgb`] pixel slices via
//!   bytemuck (the `typed` module).
//! - **`imgref`** — also build them from strided `imgref` images. Implies
//!   `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod convert;
mod device;
mod error;
mod format;
mod memory;
mod policy;
mod upload;

pub use convert::{Conversion, MappedRegion, SourceImage, convert, convert_with};
pub use device::{LockableTexture, ScopedLock, TextureDevice};
pub use error::{DeviceError, UploadError};
pub use format::{BlockLayout, Expansion, FormatCode, FormatDescriptor, SourceFormat, TextureFormat};
pub use memory::{MemoryDevice, MemoryLevel, MemoryTexture};
pub use policy::{MipPolicy, TextureDescriptor, allocate, full_chain_len};
pub use upload::{UploadConfig, Uploader, allocate_only, create_and_upload, replace_upload};

#[cfg(feature = "rgb")]
pub mod typed;

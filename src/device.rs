//! The seam between the upload engine and whatever actually owns GPU memory.
//!
//! Nothing here holds a global device: every operation receives the device
//! (or the texture) it works on, so a software implementation such as
//! [`MemoryDevice`](crate::MemoryDevice) can stand in for a real one.

use crate::convert::MappedRegion;
use crate::error::{DeviceError, UploadError};
use crate::policy::TextureDescriptor;

/// Creates and destroys textures.
pub trait TextureDevice {
    type Texture: LockableTexture;

    /// Allocate a texture exactly as described. Must not return a partially
    /// created texture on failure.
    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<Self::Texture, DeviceError>;

    /// Release a texture and its memory.
    fn destroy_texture(&mut self, texture: Self::Texture);
}

/// A texture whose mip levels can be locked for CPU writes.
///
/// Only one lock per level may be open at a time. Callers outside this crate
/// normally go through [`ScopedLock`], which pairs every successful
/// [`lock_level`](Self::lock_level) with an [`unlock_level`](Self::unlock_level).
pub trait LockableTexture {
    fn descriptor(&self) -> &TextureDescriptor;

    /// Begin an exclusive write of `level`. Returns the row stride in bytes.
    fn lock_level(&mut self, level: u32) -> Result<usize, DeviceError>;

    /// Writable memory of a locked level, starting at its first row.
    ///
    /// Only called between a successful `lock_level` and the matching
    /// `unlock_level`.
    fn locked_bytes(&mut self, level: u32) -> &mut [u8];

    fn unlock_level(&mut self, level: u32);
}

/// An open lock on one texture level, released when dropped.
pub struct ScopedLock<'t, T: LockableTexture + ?Sized> {
    texture: &'t mut T,
    level: u32,
    stride: usize,
}

impl<'t, T: LockableTexture + ?Sized> ScopedLock<'t, T> {
    pub fn acquire(texture: &'t mut T, level: u32) -> Result<Self, UploadError> {
        let stride = texture.lock_level(level).map_err(UploadError::Lock)?;
        Ok(Self {
            texture,
            level,
            stride,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// The locked memory as a conversion destination.
    pub fn region(&mut self) -> MappedRegion<'_> {
        MappedRegion::new(self.texture.locked_bytes(self.level), self.stride)
    }
}

impl<T: LockableTexture + ?Sized> Drop for ScopedLock<'_, T> {
    fn drop(&mut self) {
        self.texture.unlock_level(self.level);
    }
}

//! Create, fill and refill textures from caller-owned images.
//!
//! Every path that locks a level releases it through [`ScopedLock`], and a
//! texture allocated by [`Uploader::create_and_upload`] is destroyed again
//! if filling it fails, so no half-initialized texture escapes.

use crate::convert::{SourceImage, convert_with};
use crate::device::{LockableTexture, ScopedLock, TextureDevice};
use crate::error::UploadError;
use crate::format::{FormatDescriptor, TextureFormat};
use crate::policy::{self, MipPolicy};

/// Knobs shared by every upload an [`Uploader`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadConfig {
    pub mip_policy: MipPolicy,
}

impl UploadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mip_policy(self, mip_policy: MipPolicy) -> Self {
        Self { mip_policy }
    }
}

/// Upload entry points bound to one [`UploadConfig`].
///
/// The device is passed to each call; the uploader itself holds no device
/// state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uploader {
    config: UploadConfig,
}

impl Uploader {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Allocate a texture sized and formatted for `source` and fill level 0.
    ///
    /// The palette-index format is resolved to its promoted destination
    /// before allocation, so the texture is created with the format the
    /// conversion actually writes.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        err(level = "debug"),
        fields(format = %source.format, width = source.width, height = source.height)
    )]
    pub fn create_and_upload<D: TextureDevice + ?Sized>(
        &self,
        device: &mut D,
        source: &SourceImage<'_>,
        swap_red_blue: bool,
    ) -> Result<D::Texture, UploadError> {
        let descriptor = FormatDescriptor::lookup(source.format)?;
        let texture = policy::allocate(
            device,
            source.width,
            source.height,
            descriptor.destination,
            self.config.mip_policy,
        )?;
        let mut pending = PendingTexture::new(device, texture);
        fill_base_level(pending.texture_mut(), source, descriptor, swap_red_blue)?;
        Ok(pending.keep())
    }

    /// Overwrite level 0 of an existing texture.
    ///
    /// `source` must have the texture's dimensions and resolve to the
    /// texture's format.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        err(level = "debug"),
        fields(format = %source.format, width = source.width, height = source.height)
    )]
    pub fn replace_upload<T: LockableTexture + ?Sized>(
        &self,
        texture: &mut T,
        source: &SourceImage<'_>,
        swap_red_blue: bool,
    ) -> Result<(), UploadError> {
        let descriptor = FormatDescriptor::lookup(source.format)?;
        let target = texture.descriptor();
        if target.dimensions() != source.dimensions() {
            return Err(UploadError::DimensionMismatch {
                expected: target.dimensions(),
                actual: source.dimensions(),
            });
        }
        if target.format != descriptor.destination {
            return Err(UploadError::FormatMismatch {
                expected: target.format,
                actual: descriptor.destination,
            });
        }
        fill_base_level(texture, source, descriptor, swap_red_blue)
    }

    /// Allocate without uploading anything.
    pub fn allocate_only<D: TextureDevice + ?Sized>(
        &self,
        device: &mut D,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Result<D::Texture, UploadError> {
        policy::allocate(device, width, height, format, self.config.mip_policy)
    }
}

/// [`Uploader::create_and_upload`] with the default configuration.
pub fn create_and_upload<D: TextureDevice + ?Sized>(
    device: &mut D,
    source: &SourceImage<'_>,
    swap_red_blue: bool,
) -> Result<D::Texture, UploadError> {
    Uploader::default().create_and_upload(device, source, swap_red_blue)
}

/// [`Uploader::replace_upload`] with the default configuration.
pub fn replace_upload<T: LockableTexture + ?Sized>(
    texture: &mut T,
    source: &SourceImage<'_>,
    swap_red_blue: bool,
) -> Result<(), UploadError> {
    Uploader::default().replace_upload(texture, source, swap_red_blue)
}

/// [`Uploader::allocate_only`] with the default configuration.
pub fn allocate_only<D: TextureDevice + ?Sized>(
    device: &mut D,
    width: u32,
    height: u32,
    format: TextureFormat,
) -> Result<D::Texture, UploadError> {
    Uploader::default().allocate_only(device, width, height, format)
}

fn fill_base_level<T: LockableTexture + ?Sized>(
    texture: &mut T,
    source: &SourceImage<'_>,
    descriptor: &FormatDescriptor,
    swap_red_blue: bool,
) -> Result<(), UploadError> {
    let mut lock = ScopedLock::acquire(texture, 0)?;
    convert_with(source, &mut lock.region(), descriptor, swap_red_blue)?;
    Ok(())
}

/// A freshly allocated texture that is destroyed on drop unless kept.
struct PendingTexture<'d, D: TextureDevice + ?Sized> {
    device: &'d mut D,
    texture: Option<D::Texture>,
}

impl<'d, D: TextureDevice + ?Sized> PendingTexture<'d, D> {
    fn new(device: &'d mut D, texture: D::Texture) -> Self {
        Self {
            device,
            texture: Some(texture),
        }
    }

    fn texture_mut(&mut self) -> &mut D::Texture {
        self.texture.as_mut().expect("texture is only taken by keep or drop")
    }

    fn keep(mut self) -> D::Texture {
        self.texture.take().expect("texture is only taken by keep or drop")
    }
}

impl<D: TextureDevice + ?Sized> Drop for PendingTexture<'_, D> {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            tracing::debug!("destroying partially uploaded texture");
            self.device.destroy_texture(texture);
        }
    }
}

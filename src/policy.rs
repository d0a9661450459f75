//! Mip-chain eligibility and texture allocation.
//!
//! Older fixed-function hardware refuses mip chains on non-power-of-two
//! textures, so by default only power-of-two textures get a full chain (with
//! automatic generation) and everything else gets exactly one level.

use crate::device::TextureDevice;
use crate::error::UploadError;
use crate::format::TextureFormat;

/// Which textures receive a full mip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MipPolicy {
    /// Only when both dimensions are powers of two.
    #[default]
    PowerOfTwo,
    /// Every texture. Needs hardware with non-power-of-two mip support.
    Always,
    /// Never; one level only.
    Never,
}

impl MipPolicy {
    pub fn wants_chain(self, width: u32, height: u32) -> bool {
        match self {
            Self::PowerOfTwo => width.is_power_of_two() && height.is_power_of_two(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Everything a device needs to create a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Either 1 or the full chain down to 1×1.
    pub mip_level_count: u32,
    pub auto_generate_mips: bool,
}

impl TextureDescriptor {
    /// Describe a texture, deciding its mip chain from the dimensions alone.
    pub fn new(
        width: u32,
        height: u32,
        format: TextureFormat,
        policy: MipPolicy,
    ) -> Result<Self, UploadError> {
        if width == 0 || height == 0 {
            return Err(UploadError::InvalidDimensions { width, height });
        }
        let chain = policy.wants_chain(width, height);
        Ok(Self {
            width,
            height,
            format,
            mip_level_count: if chain { full_chain_len(width, height) } else { 1 },
            auto_generate_mips: chain,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn has_mip_chain(&self) -> bool {
        self.mip_level_count > 1
    }

    /// Size of `level`, or `None` past the end of the chain.
    pub fn level_dimensions(&self, level: u32) -> Option<(u32, u32)> {
        (level < self.mip_level_count)
            .then(|| ((self.width >> level).max(1), (self.height >> level).max(1)))
    }
}

/// Levels from `width × height` down to 1×1.
pub fn full_chain_len(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).leading_zeros()
}

/// Create a texture with the mip chain `policy` allows for its dimensions.
pub fn allocate<D: TextureDevice + ?Sized>(
    device: &mut D,
    width: u32,
    height: u32,
    format: TextureFormat,
    policy: MipPolicy,
) -> Result<D::Texture, UploadError> {
    let descriptor = TextureDescriptor::new(width, height, format, policy)?;
    tracing::debug!(
        width,
        height,
        ?format,
        levels = descriptor.mip_level_count,
        autogen = descriptor.auto_generate_mips,
        "allocating texture"
    );
    device.create_texture(&descriptor).map_err(|err| {
        tracing::debug!(%err, "texture allocation refused");
        UploadError::Allocation(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_gets_full_chain() {
        let d = TextureDescriptor::new(256, 256, TextureFormat::A8R8G8B8, MipPolicy::PowerOfTwo)
            .unwrap();
        assert_eq!(d.mip_level_count, 9);
        assert!(d.auto_generate_mips);

        let d = TextureDescriptor::new(256, 16, TextureFormat::L8, MipPolicy::PowerOfTwo).unwrap();
        assert_eq!(d.mip_level_count, 9);
        assert_eq!(d.level_dimensions(8), Some((1, 1)));
        assert_eq!(d.level_dimensions(5), Some((8, 1)));
        assert_eq!(d.level_dimensions(9), None);
    }

    #[test]
    fn non_power_of_two_gets_one_level() {
        let d = TextureDescriptor::new(200, 150, TextureFormat::A8R8G8B8, MipPolicy::PowerOfTwo)
            .unwrap();
        assert_eq!(d.mip_level_count, 1);
        assert!(!d.auto_generate_mips);

        // One power-of-two side is not enough.
        let d = TextureDescriptor::new(256, 100, TextureFormat::A8, MipPolicy::PowerOfTwo).unwrap();
        assert_eq!(d.mip_level_count, 1);
    }

    #[test]
    fn explicit_policies() {
        let d = TextureDescriptor::new(200, 150, TextureFormat::L8, MipPolicy::Always).unwrap();
        assert_eq!(d.mip_level_count, 8);
        assert!(d.auto_generate_mips);

        let d = TextureDescriptor::new(64, 64, TextureFormat::L8, MipPolicy::Never).unwrap();
        assert_eq!(d.mip_level_count, 1);
        assert!(!d.auto_generate_mips);
    }

    #[test]
    fn one_by_one_is_a_single_level_chain() {
        let d = TextureDescriptor::new(1, 1, TextureFormat::Dxt1, MipPolicy::PowerOfTwo).unwrap();
        assert_eq!(d.mip_level_count, 1);
        assert!(d.auto_generate_mips);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            TextureDescriptor::new(0, 4, TextureFormat::L8, MipPolicy::PowerOfTwo),
            Err(UploadError::InvalidDimensions { width: 0, height: 4 })
        );
    }
}

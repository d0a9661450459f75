//! A [`TextureDevice`] backed by plain heap memory.
//!
//! Useful wherever a real device is unavailable: tests, headless tools,
//! or a software renderer sampling the uploaded bytes directly. Row strides
//! are padded to a configurable alignment the way a driver pads pitches.

use alloc::vec;
use alloc::vec::Vec;

use crate::device::{LockableTexture, TextureDevice};
use crate::error::DeviceError;
use crate::format::TextureFormat;
use crate::policy::TextureDescriptor;

/// Software texture device.
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    row_alignment: usize,
    max_dimension: u32,
    fail_next: Option<DeviceError>,
    live: usize,
    destroyed: usize,
}

impl Default for MemoryDevice {
    fn default() -> Self {
        Self {
            row_alignment: 4,
            max_dimension: 4096,
            fail_next: None,
            live: 0,
            destroyed: 0,
        }
    }
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pad uncompressed row strides to a multiple of `alignment` bytes.
    pub fn with_row_alignment(self, alignment: usize) -> Self {
        Self {
            row_alignment: alignment.max(1),
            ..self
        }
    }

    /// Refuse textures wider or taller than `max`.
    pub fn with_max_dimension(self, max: u32) -> Self {
        Self {
            max_dimension: max,
            ..self
        }
    }

    /// Make the next `create_texture` call fail with `err`.
    pub fn fail_next_allocation(&mut self, err: DeviceError) {
        self.fail_next = Some(err);
    }

    /// Textures created and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.live
    }

    pub fn destroyed_textures(&self) -> usize {
        self.destroyed
    }
}

impl TextureDevice for MemoryDevice {
    type Texture = MemoryTexture;

    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<MemoryTexture, DeviceError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        if descriptor.width > self.max_dimension || descriptor.height > self.max_dimension {
            return Err(DeviceError::TooLarge {
                width: descriptor.width,
                height: descriptor.height,
                max: self.max_dimension,
            });
        }
        let levels = (0..descriptor.mip_level_count)
            .filter_map(|level| descriptor.level_dimensions(level))
            .map(|(w, h)| MemoryLevel::new(descriptor.format, w, h, self.row_alignment))
            .collect();
        self.live += 1;
        Ok(MemoryTexture {
            descriptor: *descriptor,
            levels,
        })
    }

    fn destroy_texture(&mut self, texture: MemoryTexture) {
        drop(texture);
        self.live = self.live.saturating_sub(1);
        self.destroyed += 1;
    }
}

/// One mip level of a [`MemoryTexture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLevel {
    width: u32,
    height: u32,
    row_bytes: usize,
    stride: usize,
    bytes: Vec<u8>,
    locked: bool,
}

impl MemoryLevel {
    fn new(format: TextureFormat, width: u32, height: u32, row_alignment: usize) -> Self {
        let (row_bytes, rows) = format.packed_extent(width, height);
        // Block formats are handed out as one contiguous stream.
        let stride = match format.block() {
            Some(_) => row_bytes,
            None => row_bytes.next_multiple_of(row_alignment),
        };
        Self {
            width,
            height,
            row_bytes,
            stride,
            bytes: vec![0; stride * rows],
            locked: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between row starts, padding included.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Row `y` without its padding. For block formats, row `y` of blocks.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.bytes[y * self.stride..][..self.row_bytes]
    }
}

/// Texture created by [`MemoryDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTexture {
    descriptor: TextureDescriptor,
    levels: Vec<MemoryLevel>,
}

impl MemoryTexture {
    pub fn level(&self, level: u32) -> Option<&MemoryLevel> {
        self.levels.get(level as usize)
    }

    pub fn is_locked(&self, level: u32) -> bool {
        self.level(level).is_some_and(|l| l.locked)
    }

    pub fn any_locked(&self) -> bool {
        self.levels.iter().any(|l| l.locked)
    }
}

impl LockableTexture for MemoryTexture {
    fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    fn lock_level(&mut self, level: u32) -> Result<usize, DeviceError> {
        let l = self
            .levels
            .get_mut(level as usize)
            .ok_or(DeviceError::InvalidLevel(level))?;
        if l.locked {
            return Err(DeviceError::AlreadyLocked(level));
        }
        l.locked = true;
        Ok(l.stride)
    }

    fn locked_bytes(&mut self, level: u32) -> &mut [u8] {
        match self.levels.get_mut(level as usize) {
            Some(l) if l.locked => &mut l.bytes,
            _ => &mut [],
        }
    }

    fn unlock_level(&mut self, level: u32) {
        if let Some(l) = self.levels.get_mut(level as usize) {
            l.locked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ScopedLock;
    use crate::policy::MipPolicy;

    fn descriptor(w: u32, h: u32, format: TextureFormat) -> TextureDescriptor {
        TextureDescriptor::new(w, h, format, MipPolicy::PowerOfTwo).unwrap()
    }

    #[test]
    fn levels_follow_the_chain() {
        let mut device = MemoryDevice::new();
        let tex = device.create_texture(&descriptor(16, 4, TextureFormat::A8L8)).unwrap();
        assert_eq!(tex.levels.len(), 5);
        assert_eq!(tex.level(0).unwrap().stride(), 32);
        assert_eq!(tex.level(2).unwrap().width(), 4);
        assert_eq!(tex.level(4).unwrap().height(), 1);
        assert_eq!(device.live_textures(), 1);
    }

    #[test]
    fn strides_are_padded_but_blocks_are_not() {
        let mut device = MemoryDevice::new().with_row_alignment(64);
        let tex = device.create_texture(&descriptor(10, 3, TextureFormat::L8)).unwrap();
        assert_eq!(tex.level(0).unwrap().stride(), 64);
        assert_eq!(tex.level(0).unwrap().bytes().len(), 192);

        let tex = device.create_texture(&descriptor(10, 3, TextureFormat::Dxt1)).unwrap();
        assert_eq!(tex.level(0).unwrap().stride(), 24);
        assert_eq!(tex.level(0).unwrap().bytes().len(), 24);
    }

    #[test]
    fn locks_are_exclusive_and_scoped() {
        let mut device = MemoryDevice::new();
        let mut tex = device.create_texture(&descriptor(4, 4, TextureFormat::L8)).unwrap();
        {
            let mut lock = ScopedLock::acquire(&mut tex, 0).unwrap();
            assert_eq!(lock.region().as_bytes().len(), 16);
        }
        assert!(!tex.any_locked());

        assert_eq!(tex.lock_level(0), Ok(4));
        assert_eq!(tex.lock_level(0), Err(DeviceError::AlreadyLocked(0)));
        tex.unlock_level(0);
        assert_eq!(tex.lock_level(7), Err(DeviceError::InvalidLevel(7)));
        assert!(tex.locked_bytes(0).is_empty());
    }

    #[test]
    fn allocation_limits() {
        let mut device = MemoryDevice::new().with_max_dimension(256);
        assert_eq!(
            device.create_texture(&descriptor(512, 4, TextureFormat::L8)),
            Err(DeviceError::TooLarge {
                width: 512,
                height: 4,
                max: 256
            })
        );
        device.fail_next_allocation(DeviceError::OutOfMemory);
        assert_eq!(
            device.create_texture(&descriptor(4, 4, TextureFormat::L8)),
            Err(DeviceError::OutOfMemory)
        );
        assert!(device.create_texture(&descriptor(4, 4, TextureFormat::L8)).is_ok());
        assert_eq!(device.live_textures(), 1);
    }
}

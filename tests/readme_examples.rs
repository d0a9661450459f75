//! Validates the code examples from README.md compile and behave correctly.

#[test]
fn readme_usage() {
    use texpack::{FormatCode, MemoryDevice, SourceImage, create_and_upload};

    let pixels = vec![0x11u8, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
    let image = SourceImage::new(&pixels, 2, 1, FormatCode::A8R8G8B8);
    let mut device = MemoryDevice::new();
    let texture = create_and_upload(&mut device, &image, true).unwrap();
    assert_eq!(
        texture.level(0).unwrap().row(0),
        [0x33, 0x22, 0x11, 0x44, 0x77, 0x66, 0x55, 0x88]
    );
}

#[test]
fn readme_strided() {
    use texpack::{FormatCode, MemoryDevice, SourceImage, TextureFormat, allocate_only, replace_upload};

    let mut device = MemoryDevice::new().with_row_alignment(64);
    let mut texture = allocate_only(&mut device, 60, 100, TextureFormat::L8).unwrap();

    let frame = vec![0u8; 64 * 100];
    let image = SourceImage::new(&frame, 60, 100, FormatCode::L8).with_stride(64);
    replace_upload(&mut texture, &image, false).unwrap();
    assert_eq!(texture.level(0).unwrap().stride(), 64);
}

#[test]
fn readme_mip_policy() {
    use texpack::{FormatCode, MemoryDevice, MipPolicy, SourceImage, UploadConfig, Uploader};

    let uploader = Uploader::new(UploadConfig::new().with_mip_policy(MipPolicy::Never));
    let mut device = MemoryDevice::new();
    let pixels = vec![0u8; 64 * 64];
    let image = SourceImage::new(&pixels, 64, 64, FormatCode::A8);
    let texture = uploader.create_and_upload(&mut device, &image, false).unwrap();
    assert!(texture.level(1).is_none());
}

#[cfg(feature = "rgb")]
#[test]
fn readme_typed_rgb() {
    use rgb::Bgra;
    use texpack::{MemoryDevice, create_and_upload, typed};

    let pixels = vec![Bgra { b: 10u8, g: 20, r: 30, a: 255 }; 8 * 8];
    let source = typed::bgra(&pixels, 8, 8);
    let mut device = MemoryDevice::new();
    let texture = create_and_upload(&mut device, &source, false).unwrap();
    assert_eq!(texture.level(0).unwrap().row(7)[28..], [10, 20, 30, 255]);
}

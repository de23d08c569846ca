use std::collections::BTreeSet;

use anyhow::anyhow;
use desk_scene::{
    context::RenderContext,
    data_structures::texture::{PixelFormat, Sampling, TextureHandle, WrapMode},
    resources::{
        DecodedImage,
        texture::{DeviceOp, MemoryTextureDevice, TextureDevice, TextureError, TextureRegistry},
    },
};

use crate::common::test_utils::{FakeAssets, solid_decoder};

mod common;

#[test]
fn registered_texture_is_found_by_tag() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let decoder = solid_decoder(4, 2, 4);

    let slot = registry
        .register_repeating(&mut device, &decoder, "textures/glass.jpg", "glass")
        .unwrap();

    assert_eq!(slot, 0);
    assert_eq!(registry.lookup_slot("glass"), Some(0));
    assert!(registry.lookup_handle("glass").is_some());
    assert_eq!(registry.aspect_ratio("glass"), Some(2.0));
    assert_eq!(registry.lookup_handle("unknown"), None);
    assert_eq!(registry.lookup_slot("unknown"), None);
}

#[test]
fn channel_count_selects_the_pixel_format() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let assets = FakeAssets::new()
        .with("gray.png", 2, 2, 1)
        .with("rgb.jpg", 2, 2, 3)
        .with("rgba.png", 2, 2, 4);

    for (file, tag) in [("gray.png", "gray"), ("rgb.jpg", "rgb"), ("rgba.png", "rgba")] {
        registry.register_repeating(&mut device, &assets, file, tag).unwrap();
    }

    let formats: Vec<_> = registry.entries().map(|entry| entry.format).collect();
    assert_eq!(formats, [PixelFormat::Red, PixelFormat::Rgb, PixelFormat::Rgba]);
}

#[test]
fn two_channel_image_is_rejected() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let assets = FakeAssets::new().with("luma_alpha.png", 4, 4, 2);

    let err = registry
        .register_repeating(&mut device, &assets, "luma_alpha.png", "flower")
        .unwrap_err();

    assert!(matches!(err, TextureError::UnsupportedChannels { channels: 2, .. }));
    assert!(registry.is_empty());
    assert_eq!(registry.lookup_handle("flower"), None);
    // Rejected before anything reached the device.
    assert_eq!(device.allocations(), 0);
}

#[test]
fn undecodable_file_leaves_registry_unchanged() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let assets = FakeAssets::new().with("glass.jpg", 2, 2, 3);
    registry.register_repeating(&mut device, &assets, "glass.jpg", "glass").unwrap();

    let err = registry
        .register_repeating(&mut device, &assets, "missing.jpg", "missing")
        .unwrap_err();

    assert!(matches!(err, TextureError::Decode { .. }));
    assert!(err.to_string().contains("missing.jpg"));
    assert_eq!(registry.len(), 1);
    assert_eq!(device.allocations(), 1);
}

#[test]
fn sixteen_textures_fill_sixteen_units() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let decoder = solid_decoder(2, 2, 3);

    for i in 0..16 {
        let slot = registry
            .register_repeating(&mut device, &decoder, format!("tex{i}.jpg"), &format!("tex{i}"))
            .unwrap();
        assert_eq!(slot, i);
    }

    let err = registry
        .register_repeating(&mut device, &decoder, "tex16.jpg", "tex16")
        .unwrap_err();
    assert!(matches!(err, TextureError::CapacityExceeded { capacity: 16 }));
    assert_eq!(registry.len(), 16);
    assert_eq!(device.allocations(), 16);

    let mut ctx = RenderContext::default();
    registry.bind_all(&mut ctx);
    for entry in registry.entries() {
        assert_eq!(ctx.bound_texture(entry.slot), Some(entry.handle));
    }
    let handles: BTreeSet<_> = (0..16).filter_map(|unit| ctx.bound_texture(unit)).collect();
    assert_eq!(handles.len(), 16);
}

#[test]
fn duplicate_tag_is_rejected() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let decoder = solid_decoder(2, 2, 3);

    registry.register_repeating(&mut device, &decoder, "a.jpg", "desk").unwrap();
    let first = registry.lookup_handle("desk");

    let err = registry
        .register_repeating(&mut device, &decoder, "b.jpg", "desk")
        .unwrap_err();

    assert!(matches!(err, TextureError::DuplicateTag(ref tag) if tag == "desk"));
    assert_eq!(registry.lookup_handle("desk"), first);
    assert_eq!(device.allocations(), 1);
}

#[test]
fn mipmaps_are_generated_before_sampling_is_set() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let decoder = solid_decoder(64, 16, 3);

    registry
        .register(
            &mut device,
            &decoder,
            "keyboard.jpg",
            "keyboard_texture",
            WrapMode::ClampToEdge,
            WrapMode::ClampToEdge,
        )
        .unwrap();

    let handle = registry.lookup_handle("keyboard_texture").unwrap();
    assert_eq!(
        device.ops(),
        [
            DeviceOp::Upload {
                handle,
                label: "keyboard_texture".to_string(),
                format: PixelFormat::Rgb,
                width: 64,
                height: 16,
            },
            DeviceOp::GenerateMipmaps(handle),
            DeviceOp::SetSampling(handle, Sampling::clamped()),
        ]
    );
}

#[test]
fn release_all_frees_each_handle_once() {
    let mut device = MemoryTextureDevice::new();
    let mut registry = TextureRegistry::default();
    let decoder = solid_decoder(2, 2, 4);
    for tag in ["glass", "wood", "desk"] {
        registry
            .register_repeating(&mut device, &decoder, format!("{tag}.jpg"), tag)
            .unwrap();
    }
    let handles: Vec<_> = registry.entries().map(|entry| entry.handle).collect();

    registry.release_all(&mut device);

    let released: Vec<_> = device
        .ops()
        .iter()
        .filter_map(|op| match op {
            DeviceOp::Release(handle) => Some(*handle),
            _ => None,
        })
        .collect();
    assert_eq!(released, handles);
    assert_eq!(device.live_count(), 0);
    assert_eq!(device.allocations(), 3);
    assert!(registry.is_empty());
    assert_eq!(registry.lookup_handle("glass"), None);

    // A second release has nothing left to free.
    registry.release_all(&mut device);
    assert_eq!(device.ops().len(), 3 * 3 + 3);
}

/// Fails mip generation so the upload has to be rolled back.
struct FailingMips(MemoryTextureDevice);

impl TextureDevice for FailingMips {
    fn upload(
        &mut self,
        image: &DecodedImage,
        format: PixelFormat,
        label: &str,
    ) -> anyhow::Result<TextureHandle> {
        self.0.upload(image, format, label)
    }

    fn generate_mipmaps(&mut self, _: TextureHandle) -> anyhow::Result<()> {
        Err(anyhow!("out of memory"))
    }

    fn set_sampling(&mut self, handle: TextureHandle, sampling: Sampling) -> anyhow::Result<()> {
        self.0.set_sampling(handle, sampling)
    }

    fn release(&mut self, handle: TextureHandle) {
        self.0.release(handle)
    }
}

#[test]
fn device_failure_releases_the_upload() {
    let mut device = FailingMips(MemoryTextureDevice::new());
    let mut registry = TextureRegistry::default();
    let decoder = solid_decoder(2, 2, 3);

    let err = registry
        .register_repeating(&mut device, &decoder, "wood.jpg", "wood")
        .unwrap_err();

    assert!(matches!(err, TextureError::Device { ref tag, .. } if tag == "wood"));
    assert!(registry.is_empty());
    assert_eq!(device.0.live_count(), 0);
}

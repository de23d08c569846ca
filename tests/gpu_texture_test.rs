#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn textures_live_on_the_gpu_until_released() {
    use desk_scene::{
        context::GpuContext,
        data_structures::texture::{PixelFormat, WrapMode},
        resources::texture::{TextureRegistry, WgpuTextureDevice},
    };

    use crate::common::test_utils::FakeAssets;

    let gpu = GpuContext::headless_blocking().unwrap();
    let mut device = WgpuTextureDevice::new(&gpu);
    let mut registry = TextureRegistry::default();
    let assets = FakeAssets::new()
        .with("keyboard_texture.jpg", 149, 41, 3)
        .with("white_flower.png", 16, 16, 4)
        .with("mask.png", 8, 4, 1);

    registry
        .register(
            &mut device,
            &assets,
            "keyboard_texture.jpg",
            "keyboard_texture",
            WrapMode::ClampToEdge,
            WrapMode::ClampToEdge,
        )
        .unwrap();
    registry
        .register_repeating(&mut device, &assets, "white_flower.png", "white_flower")
        .unwrap();
    registry.register_repeating(&mut device, &assets, "mask.png", "mask").unwrap();
    assert_eq!(device.len(), 3);

    let keyboard = device.texture(registry.lookup_handle("keyboard_texture").unwrap()).unwrap();
    // 149 wide: 149, 74, 37, 18, 9, 4, 2, 1.
    assert_eq!(keyboard.texture.mip_level_count(), 8);
    assert_eq!(keyboard.texture.format(), wgpu::TextureFormat::Rgba8UnormSrgb);

    // Grey images share the colour textures' sRGB format.
    let mask = device.texture(registry.lookup_handle("mask").unwrap()).unwrap();
    assert_eq!(mask.format, PixelFormat::Red);
    assert_eq!(mask.texture.format(), wgpu::TextureFormat::Rgba8UnormSrgb);
    assert!(mask.sampler.is_some());

    gpu.queue.submit([]);
    registry.release_all(&mut device);
    assert!(device.is_empty());
}

#[test]
#[cfg(feature = "integration-tests")]
fn oversized_image_is_rejected_without_a_panic() {
    use desk_scene::{
        context::GpuContext,
        resources::texture::{TextureError, TextureRegistry, WgpuTextureDevice},
    };

    use crate::common::test_utils::FakeAssets;

    let gpu = GpuContext::headless_blocking().unwrap();
    let mut device = WgpuTextureDevice::new(&gpu);
    let mut registry = TextureRegistry::default();
    let assets = FakeAssets::new()
        .with("glass.jpg", 4, 4, 3)
        .with("huge.png", 9000, 2, 1)
        .with("empty.png", 0, 4, 3);
    registry.register_repeating(&mut device, &assets, "glass.jpg", "glass").unwrap();

    for (file, tag) in [("huge.png", "huge"), ("empty.png", "empty")] {
        let err = registry
            .register_repeating(&mut device, &assets, file, tag)
            .unwrap_err();
        assert!(matches!(err, TextureError::Device { .. }));
        assert_eq!(registry.lookup_handle(tag), None);
    }
    assert_eq!(registry.len(), 1);
    assert_eq!(device.len(), 1);
}

#[test]
#[cfg(feature = "integration-tests")]
fn every_draw_gets_its_own_object_slot() {
    use desk_scene::{
        config::SceneConfig,
        context::{GpuContext, RenderContext},
        pipelines::{SceneUniforms, UniformUpload, light::LightsUniform, object::ObjectUniform},
        resources::{mesh::DrawLog, texture::WgpuTextureDevice},
        scene::DeskScene,
    };

    use crate::common::test_utils::FakeAssets;

    let gpu = GpuContext::headless_blocking().unwrap();
    let mut device = WgpuTextureDevice::new(&gpu);
    let mut ctx = RenderContext::default();
    let mut meshes = DrawLog::new();
    let mut scene = DeskScene::prepare(
        SceneConfig::default(),
        &mut device,
        &FakeAssets::desk(),
        &mut meshes,
        &mut ctx,
    )
    .unwrap();

    let uniforms = SceneUniforms::new(&gpu, LightsUniform::from(scene.lights()));
    let mut upload = UniformUpload::new(&gpu, &uniforms, meshes);
    scene.render(&mut ctx, &mut upload).unwrap();

    let offsets = upload.offsets().to_vec();
    let log = upload.into_inner();
    assert_eq!(offsets.len(), log.calls().len());
    for (i, offset) in offsets.iter().enumerate() {
        assert_eq!(u64::from(*offset), i as u64 * uniforms.object_stride);
    }

    // All writes land in one submit; each slot must still hold its own draw's state.
    let size = uniforms.object_buffer.size();
    let readback = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Object Readback Buffer"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    encoder.copy_buffer_to_buffer(&uniforms.object_buffer, 0, &readback, 0, size);
    gpu.queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    gpu.device.poll(wgpu::PollType::wait_indefinitely()).unwrap();
    rx.recv().unwrap().unwrap();

    let bytes = slice.get_mapped_range();
    let object_size = std::mem::size_of::<ObjectUniform>();
    for (call, offset) in log.calls().iter().zip(&offsets) {
        let start = *offset as usize;
        let uniform: ObjectUniform =
            bytemuck::pod_read_unaligned(&bytes[start..start + object_size]);
        assert_eq!(uniform.use_texture == 1, call.textured);
        assert_eq!(uniform.model, Into::<[[f32; 4]; 4]>::into(call.model.unwrap()));
        if let Some(color) = call.color {
            assert_eq!(uniform.color, Into::<[f32; 4]>::into(color));
        }
    }
    drop(bytes);
    readback.unmap();

    scene.teardown(&mut device);
    assert!(device.is_empty());
}

use cgmath::{Vector2, Vector4};
use desk_scene::{
    context::{RenderContext, USE_LIGHTING},
    render::LookupPolicy,
    resources::{
        mesh::{BoxSide, DrawLog, Faces, MeshProvider, Primitive},
        texture::MemoryTextureDevice,
    },
    scene::TEXTURE_MANIFEST,
};

use crate::common::test_utils::{FakeAssets, prepare_desk};

mod common;

#[test]
fn prepare_registers_every_texture_in_order() {
    let prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Lenient).unwrap();
    let textures = prepared.scene.textures();

    assert_eq!(textures.len(), TEXTURE_MANIFEST.len());
    for (slot, asset) in TEXTURE_MANIFEST.iter().enumerate() {
        assert_eq!(textures.lookup_slot(asset.tag), Some(slot as u32));
        let handle = textures.lookup_handle(asset.tag).unwrap();
        assert_eq!(prepared.ctx.bound_texture(slot as u32), Some(handle));
    }
    assert_eq!(prepared.scene.materials().len(), 14);
    assert_eq!(prepared.ctx.bool(USE_LIGHTING), Some(true));
    for primitive in Primitive::ALL {
        assert!(prepared.meshes.is_loaded(primitive));
    }
}

#[test]
fn render_draws_the_whole_desk() {
    let mut prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Strict).unwrap();
    prepared.scene.render(&mut prepared.ctx, &mut prepared.meshes).unwrap();
    let log = &prepared.meshes;

    assert_eq!(log.count(Primitive::Plane), 1);
    assert_eq!(log.count(Primitive::Box), 31);
    assert_eq!(log.count(Primitive::Sphere), 67);
    assert_eq!(log.count(Primitive::Cylinder), 14);
    assert_eq!(log.count(Primitive::TaperedCylinder), 9);
    assert_eq!(log.count(Primitive::Torus), 1);
    assert_eq!(log.calls().len(), 123);
    assert!(log.calls().iter().all(|call| call.model.is_some()));
}

#[test]
fn desk_surface_is_drawn_first() {
    let mut prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Lenient).unwrap();
    prepared.scene.render(&mut prepared.ctx, &mut prepared.meshes).unwrap();

    let desk = &prepared.meshes.calls()[0];
    assert_eq!(desk.primitive, Primitive::Plane);
    assert!(desk.textured);
    assert_eq!(desk.texture_unit, prepared.scene.textures().lookup_slot("desk").map(|s| s as i32));
    assert_eq!(desk.material_diffuse, Some(cgmath::vec3(0.6, 0.4, 0.2)));
}

#[test]
fn keyboard_top_keeps_the_photo_aspect() {
    let mut prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Lenient).unwrap();
    prepared.scene.render(&mut prepared.ctx, &mut prepared.meshes).unwrap();
    let keyboard_unit = prepared
        .scene
        .textures()
        .lookup_slot("keyboard_texture")
        .map(|s| s as i32);

    let calls = &prepared.meshes.calls()[1..7];
    assert_eq!(calls[0].faces, Faces::BoxSide(BoxSide::Top));
    assert!(calls.iter().all(|call| call.texture_unit == keyboard_unit));

    // 11 x 4.5 footprint vs. a 149 x 41 photo: the footprint is narrower, so V stretches.
    let top = calls[0].uv_scale.unwrap();
    assert!((top.x - 1.0).abs() < 1e-4);
    assert!((top.y - (149.0 / 41.0) / (11.0 / 4.5)).abs() < 1e-4);

    let sides: Vec<_> = calls[1..].iter().map(|call| call.faces).collect();
    assert_eq!(
        sides,
        [BoxSide::Back, BoxSide::Bottom, BoxSide::Left, BoxSide::Right, BoxSide::Front]
            .map(Faces::BoxSide)
    );
    assert!(calls[1..].iter().all(|call| call.uv_scale == Some(Vector2::new(1.0, 1.0))));
}

#[test]
fn teacup_body_has_a_top_cap_and_no_bottom() {
    let mut prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Lenient).unwrap();
    prepared.scene.render(&mut prepared.ctx, &mut prepared.meshes).unwrap();

    let calls = prepared.meshes.calls();
    let body = calls
        .iter()
        .position(|call| call.primitive == Primitive::Cylinder)
        .unwrap();
    assert_eq!(calls[body - 1].primitive, Primitive::Sphere);
    assert_eq!(
        calls[body].faces,
        Faces::Cylinder {
            top: true,
            bottom: false,
            sides: true,
        }
    );
}

#[test]
fn monitor_screen_is_flat_white() {
    let mut prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Lenient).unwrap();
    prepared.scene.render(&mut prepared.ctx, &mut prepared.meshes).unwrap();

    let white = Some(Vector4::new(1.0, 1.0, 1.0, 1.0));
    let screen = prepared
        .meshes
        .calls()
        .iter()
        .find(|call| call.primitive == Primitive::Box && call.color == white && !call.textured)
        .unwrap();
    let model = screen.model.unwrap();
    // 17 x 8.4 panel above the chin and the black strip.
    assert!((model.x.x - 17.0).abs() < 1e-4);
    assert!((model.y.y - 8.4).abs() < 1e-4);
    assert!((model.w.y - 11.2).abs() < 1e-4);
}

#[test]
fn missing_texture_is_skipped_when_lenient() {
    let assets = FakeAssets::desk().without("textures/wood.jpg");
    let mut prepared = prepare_desk(&assets, LookupPolicy::Lenient).unwrap();

    let textures = prepared.scene.textures();
    assert_eq!(textures.len(), TEXTURE_MANIFEST.len() - 1);
    assert_eq!(textures.lookup_handle("wood"), None);
    // Later textures move down one unit.
    assert_eq!(textures.lookup_slot("desk"), Some(4));

    prepared.scene.render(&mut prepared.ctx, &mut prepared.meshes).unwrap();
    assert_eq!(prepared.meshes.calls().len(), 123);
}

#[test]
fn missing_texture_fails_the_frame_when_strict() {
    let assets = FakeAssets::desk().without("textures/wood.jpg");
    let mut prepared = prepare_desk(&assets, LookupPolicy::Strict).unwrap();

    let err = prepared
        .scene
        .render(&mut prepared.ctx, &mut prepared.meshes)
        .unwrap_err();

    assert!(err.to_string().contains("wood"));
    // Everything before the brown stems was still drawn.
    assert!(!prepared.meshes.calls().is_empty());
    assert!(prepared.meshes.calls().len() < 123);
}

#[test]
fn drawing_before_prepare_fails() {
    let mut meshes = DrawLog::new();
    let ctx = RenderContext::default();
    let result = MeshProvider::draw(&mut meshes, &ctx, Primitive::Box, Faces::All);
    assert!(result.is_err());
}

#[test]
fn teardown_releases_every_texture() {
    let mut prepared = prepare_desk(&FakeAssets::desk(), LookupPolicy::Lenient).unwrap();
    assert_eq!(prepared.device.live_count(), TEXTURE_MANIFEST.len());

    prepared.scene.teardown(&mut prepared.device);

    assert_eq!(prepared.device.live_count(), 0);
    assert_eq!(prepared.device.allocations(), TEXTURE_MANIFEST.len());
    assert!(prepared.scene.textures().is_empty());

    let mut fresh = MemoryTextureDevice::new();
    prepared.scene.teardown(&mut fresh);
    assert!(fresh.ops().is_empty());
}

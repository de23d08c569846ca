//! The desk workspace scene.
//!
//! [`DeskScene::prepare`] runs once: it defines the materials, uploads the
//! light rig, registers and binds the textures and loads one mesh per
//! primitive. [`DeskScene::render`] then issues the fixed apply-then-draw
//! sequence for every object on the desk. Registries are only mutated in
//! `prepare`; `render` borrows them immutably.

use anyhow::Context;
use cgmath::{Vector2, Vector3};

use crate::{
    config::SceneConfig,
    context::RenderContext,
    data_structures::{light::LightRig, transform::Transform},
    render::ShaderState,
    resources::{
        ImageDecoder,
        material::MaterialRegistry,
        mesh::{Faces, MeshProvider, Primitive},
        texture::{TextureDevice, TextureRegistry},
    },
};

mod objects;
mod setup;
mod vase;

pub use setup::{TEXTURE_MANIFEST, TextureAsset, desk_lights};

/// Y coordinate of the desk surface.
pub const DESK_HEIGHT: f32 = 0.0;

pub struct DeskScene {
    config: SceneConfig,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lights: LightRig,
}

impl DeskScene {
    pub fn prepare(
        config: SceneConfig,
        device: &mut dyn TextureDevice,
        decoder: &dyn ImageDecoder,
        meshes: &mut dyn MeshProvider,
        ctx: &mut RenderContext,
    ) -> anyhow::Result<Self> {
        let mut materials = MaterialRegistry::new();
        setup::define_materials(&mut materials)?;

        let lights = desk_lights();
        lights.upload(ctx);

        let mut textures = TextureRegistry::from_config(&config);
        for asset in TEXTURE_MANIFEST {
            let path = config.asset(asset.file);
            // A missing texture degrades the look of one object, not the scene.
            if textures
                .register(device, decoder, &path, asset.tag, asset.wrap, asset.wrap)
                .is_err()
            {
                log::warn!("Objects using '{}' will keep the previous texture binding", asset.tag);
            }
        }
        textures.bind_all(ctx);

        for primitive in Primitive::ALL {
            meshes
                .load(primitive)
                .with_context(|| format!("Could not load {primitive:?} mesh"))?;
        }

        log::info!(
            "Scene prepared: {} materials, {}/{} textures, {} point lights active",
            materials.len(),
            textures.len(),
            TEXTURE_MANIFEST.len(),
            lights.active_point_lights()
        );
        Ok(Self {
            config,
            textures,
            materials,
            lights,
        })
    }

    /// Draw every object on the desk, in order.
    pub fn render(
        &self,
        ctx: &mut RenderContext,
        meshes: &mut dyn MeshProvider,
    ) -> anyhow::Result<()> {
        let state = ShaderState::new(&self.textures, &self.materials)
            .with_policy(self.config.lookup_policy);
        let mut frame = Frame {
            state,
            textures: &self.textures,
            ctx,
            meshes,
        };

        objects::draw_desk(&mut frame)?;
        objects::draw_keyboard(&mut frame, DESK_HEIGHT)?;
        objects::draw_mouse(&mut frame, DESK_HEIGHT)?;
        objects::draw_teacup(&mut frame, DESK_HEIGHT)?;
        objects::draw_saucer(&mut frame, DESK_HEIGHT)?;
        objects::draw_monitor(&mut frame, DESK_HEIGHT)?;

        let vase_base = Vector3::new(-17.0, 6.0, -5.0);
        vase::draw_vase(&mut frame, vase_base)?;
        vase::draw_plants(&mut frame, vase_base)?;
        objects::draw_books(&mut frame, vase_base, DESK_HEIGHT)?;

        objects::draw_organizer(&mut frame, DESK_HEIGHT)
    }

    /// Free every texture on the device.
    pub fn teardown(&mut self, device: &mut dyn TextureDevice) {
        self.textures.release_all(device);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }
}

/// State applier, render context and mesh provider for one pass over the scene.
pub(crate) struct Frame<'a> {
    state: ShaderState<'a>,
    textures: &'a TextureRegistry,
    ctx: &'a mut RenderContext,
    meshes: &'a mut dyn MeshProvider,
}

impl Frame<'_> {
    fn color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.state.apply_flat_color(self.ctx, r, g, b, a);
    }

    fn texture(&mut self, tag: &str) -> anyhow::Result<()> {
        Ok(self.state.apply_texture(self.ctx, tag)?)
    }

    fn material(&mut self, tag: &str) -> anyhow::Result<()> {
        Ok(self.state.apply_material(self.ctx, tag)?)
    }

    fn uv_scale(&mut self, scale: Vector2<f32>) {
        self.state.apply_texture_scale(self.ctx, scale.x, scale.y);
    }

    fn transform(&mut self, transform: Transform) {
        self.state.apply_model(self.ctx, &transform);
    }

    fn texture_aspect(&self, tag: &str) -> Option<f32> {
        self.textures.aspect_ratio(tag)
    }

    fn draw(&mut self, primitive: Primitive) -> anyhow::Result<()> {
        self.draw_faces(primitive, Faces::All)
    }

    fn draw_faces(&mut self, primitive: Primitive, faces: Faces) -> anyhow::Result<()> {
        self.meshes.draw(self.ctx, primitive, faces)
    }
}

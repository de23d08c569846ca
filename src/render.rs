//! Per-draw shader state.
//!
//! [`ShaderState`] pushes texture, material, colour, UV scale and transform
//! state into a render context immediately before a draw call. It reads the
//! texture and material registries but never changes them.
//!
//! There is no isolation between draws: every call below writes into the
//! shared context and the next draw consumes whatever is there. Apply-then-draw
//! pairs must therefore stay in order.
//!
//! # Lookup misses
//!
//! An unknown texture or material tag never writes the state it would have
//! written, so the previous texture binding or material stays in effect. The
//! miss is always logged; under [`LookupPolicy::Strict`] it is also returned
//! as a [`StateError`].

use cgmath::{Vector2, Vector3, Vector4};
use thiserror::Error;

use crate::{
    context::{MODEL, OBJECT_COLOR, OBJECT_TEXTURE, ShaderBackend, USE_TEXTURE, UV_SCALE},
    data_structures::{light::LightRig, transform::Transform},
    resources::{material::MaterialRegistry, texture::TextureRegistry},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Texture slot not found for tag: {0}")]
    TextureNotFound(String),
    #[error("Material not found for tag: {0}")]
    MaterialNotFound(String),
}

/// How tag lookup misses are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    /// Log and keep rendering with the previous state.
    #[default]
    Lenient,
    /// Log and return the miss as an error.
    Strict,
}

pub struct ShaderState<'a> {
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
    policy: LookupPolicy,
}

impl<'a> ShaderState<'a> {
    pub fn new(textures: &'a TextureRegistry, materials: &'a MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
            policy: LookupPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    /// Untextured draw in a constant colour.
    pub fn apply_flat_color(
        &self,
        ctx: &mut (impl ShaderBackend + ?Sized),
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    ) {
        ctx.set_bool(USE_TEXTURE, false);
        ctx.set_vec4(OBJECT_COLOR, Vector4::new(r, g, b, a));
    }

    /// Textured draw sampling the texture registered under `tag`.
    ///
    /// The handle is bound again even though [`TextureRegistry::bind_all`]
    /// already did, so texture units changed by anyone else in between do
    /// not leak into this draw.
    pub fn apply_texture(
        &self,
        ctx: &mut (impl ShaderBackend + ?Sized),
        tag: &str,
    ) -> Result<(), StateError> {
        ctx.set_bool(USE_TEXTURE, true);

        match self.textures.entry(tag) {
            Some(entry) => {
                ctx.activate_texture_unit(entry.slot);
                ctx.bind_texture(entry.handle);
                // The shader samples by unit, not by handle.
                ctx.set_int(OBJECT_TEXTURE, entry.slot as i32);
                Ok(())
            }
            None => self.miss(StateError::TextureNotFound(tag.to_string())),
        }
    }

    pub fn apply_material(
        &self,
        ctx: &mut (impl ShaderBackend + ?Sized),
        tag: &str,
    ) -> Result<(), StateError> {
        match self.materials.find(tag) {
            Some(material) => {
                ctx.set_vec3("material.diffuseColor", material.diffuse_color);
                ctx.set_vec3("material.specularColor", material.specular_color);
                ctx.set_float("material.shininess", material.shininess);
                Ok(())
            }
            None => self.miss(StateError::MaterialNotFound(tag.to_string())),
        }
    }

    /// Scale applied to texture coordinates in the vertex stage,
    /// see [`UvScale::fit`](crate::data_structures::transform::UvScale::fit).
    pub fn apply_texture_scale(&self, ctx: &mut (impl ShaderBackend + ?Sized), u: f32, v: f32) {
        ctx.set_vec2(UV_SCALE, Vector2::new(u, v));
    }

    /// Model matrix `T * Rz * Ry * Rx * S`.
    pub fn apply_transform(
        &self,
        ctx: &mut (impl ShaderBackend + ?Sized),
        scale: impl Into<Vector3<f32>>,
        x_degrees: f32,
        y_degrees: f32,
        z_degrees: f32,
        position: impl Into<Vector3<f32>>,
    ) {
        let transform = Transform::new(scale, x_degrees, y_degrees, z_degrees, position);
        self.apply_model(ctx, &transform);
    }

    pub fn apply_model(&self, ctx: &mut (impl ShaderBackend + ?Sized), transform: &Transform) {
        ctx.set_mat4(MODEL, transform.to_matrix());
    }

    pub fn apply_lights(&self, ctx: &mut (impl ShaderBackend + ?Sized), lights: &LightRig) {
        lights.upload(ctx);
    }

    fn miss(&self, err: StateError) -> Result<(), StateError> {
        log::warn!("{err}");
        match self.policy {
            LookupPolicy::Lenient => Ok(()),
            LookupPolicy::Strict => Err(err),
        }
    }
}

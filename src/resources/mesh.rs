//! The mesh-provider seam.
//!
//! Primitive tessellation is not part of this crate. A [`MeshProvider`] loads
//! one mesh per [`Primitive`] kind and draws it with whatever state the
//! [`RenderContext`] holds at that moment, optionally restricted to some faces.
//! [`DrawLog`] is a provider that only records what would have been drawn.

use std::collections::BTreeSet;

use anyhow::bail;
use cgmath::{Matrix4, Vector2, Vector4};

use crate::context::{MODEL, OBJECT_COLOR, OBJECT_TEXTURE, RenderContext, USE_TEXTURE, UV_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Plane,
    Box,
    Sphere,
    Cylinder,
    TaperedCylinder,
    Torus,
}

impl Primitive {
    pub const ALL: [Primitive; 6] = [
        Primitive::Plane,
        Primitive::Box,
        Primitive::Sphere,
        Primitive::Cylinder,
        Primitive::TaperedCylinder,
        Primitive::Torus,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSide {
    Back,
    Bottom,
    Left,
    Right,
    Top,
    Front,
}

/// Which part of a primitive to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Faces {
    #[default]
    All,
    BoxSide(BoxSide),
    Cylinder { top: bool, bottom: bool, sides: bool },
}

pub trait MeshProvider {
    fn load(&mut self, primitive: Primitive) -> anyhow::Result<()>;

    /// Draw with the state currently held by `ctx`.
    fn draw(
        &mut self,
        ctx: &RenderContext,
        primitive: Primitive,
        faces: Faces,
    ) -> anyhow::Result<()>;
}

/// What a draw call saw of the render context.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub faces: Faces,
    pub model: Option<Matrix4<f32>>,
    pub textured: bool,
    pub texture_unit: Option<i32>,
    pub color: Option<Vector4<f32>>,
    pub uv_scale: Option<Vector2<f32>>,
    pub material_diffuse: Option<cgmath::Vector3<f32>>,
}

impl DrawCall {
    fn capture(ctx: &RenderContext, primitive: Primitive, faces: Faces) -> Self {
        Self {
            primitive,
            faces,
            model: ctx.mat4(MODEL),
            textured: ctx.bool(USE_TEXTURE).unwrap_or(false),
            texture_unit: ctx.int(OBJECT_TEXTURE),
            color: ctx.vec4(OBJECT_COLOR),
            uv_scale: ctx.vec2(UV_SCALE),
            material_diffuse: ctx.vec3("material.diffuseColor"),
        }
    }
}

/// Records draws instead of issuing them.
#[derive(Debug, Default)]
pub struct DrawLog {
    loaded: BTreeSet<Primitive>,
    calls: Vec<DrawCall>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn is_loaded(&self, primitive: Primitive) -> bool {
        self.loaded.contains(&primitive)
    }

    pub fn count(&self, primitive: Primitive) -> usize {
        self.calls.iter().filter(|call| call.primitive == primitive).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl MeshProvider for DrawLog {
    fn load(&mut self, primitive: Primitive) -> anyhow::Result<()> {
        self.loaded.insert(primitive);
        Ok(())
    }

    fn draw(
        &mut self,
        ctx: &RenderContext,
        primitive: Primitive,
        faces: Faces,
    ) -> anyhow::Result<()> {
        if !self.loaded.contains(&primitive) {
            bail!("{primitive:?} mesh drawn before it was loaded");
        }
        self.calls.push(DrawCall::capture(ctx, primitive, faces));
        Ok(())
    }
}

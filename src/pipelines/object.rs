use cgmath::{Matrix4, SquareMatrix};

use crate::context::{
    MODEL, OBJECT_COLOR, OBJECT_TEXTURE, RenderContext, USE_LIGHTING, USE_TEXTURE, UV_SCALE,
};

/// Per-draw state as the shader reads it.
///
/// Built from whatever the render context holds right before the draw;
/// uniforms that were never written fall back to neutral values.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub diffuse: [f32; 3],
    pub shininess: f32,
    pub specular: [f32; 3],
    pub texture_unit: i32,
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub use_lighting: u32,
}

impl ObjectUniform {
    pub fn from_context(ctx: &RenderContext) -> Self {
        Self {
            model: ctx.mat4(MODEL).unwrap_or_else(Matrix4::identity).into(),
            color: ctx.vec4(OBJECT_COLOR).map_or([1.0; 4], Into::into),
            diffuse: ctx.vec3("material.diffuseColor").map_or([1.0; 3], Into::into),
            shininess: ctx.float("material.shininess").unwrap_or(32.0),
            specular: ctx.vec3("material.specularColor").map_or([0.0; 3], Into::into),
            texture_unit: ctx.int(OBJECT_TEXTURE).unwrap_or(0),
            uv_scale: ctx.vec2(UV_SCALE).map_or([1.0; 2], Into::into),
            use_texture: ctx.bool(USE_TEXTURE).unwrap_or(false) as u32,
            use_lighting: ctx.bool(USE_LIGHTING).unwrap_or(false) as u32,
        }
    }
}

//! Render context and GPU setup.
//!
//! The shading backend is modelled as an explicit [`RenderContext`] that every
//! state-application and draw call receives by reference: a set of named
//! uniforms plus the texture-unit bindings. Nothing here is global, so the
//! apply-then-draw ordering is visible in each call's signature.
//!
//! [`GpuContext`] is the headless `wgpu` device/queue pair the GPU texture
//! device and uniform buffers are created from.

use std::collections::BTreeMap;

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::{config::MAX_TEXTURE_UNITS, data_structures::texture::TextureHandle};

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

/// A value written into a named shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
}

/// The shading-backend seam: named uniform setters and texture-unit binding.
///
/// Names follow the shader's conventions, including array-indexed struct
/// members such as `pointLights[0].position`.
pub trait ShaderBackend {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Make `unit` the target of subsequent [`bind_texture`](Self::bind_texture) calls.
    fn activate_texture_unit(&mut self, unit: u32);

    /// Bind `handle` to the currently active texture unit.
    fn bind_texture(&mut self, handle: TextureHandle);

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }
}

/// The currently active uniform set and texture-unit bindings.
///
/// Single writer, consumed by the next draw call. There is no per-draw
/// snapshot/restore: whatever was written last is what the next draw sees.
#[derive(Clone, Debug)]
pub struct RenderContext {
    uniforms: BTreeMap<String, UniformValue>,
    units: Vec<Option<TextureHandle>>,
    active_unit: u32,
    uniform_writes: usize,
}

impl RenderContext {
    pub fn new(texture_units: usize) -> Self {
        Self {
            uniforms: BTreeMap::new(),
            units: vec![None; texture_units],
            active_unit: 0,
            uniform_writes: 0,
        }
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.uniforms.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.uniforms.get(name)? {
            UniformValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.uniforms.get(name)? {
            UniformValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.uniforms.get(name)? {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vector2<f32>> {
        match self.uniforms.get(name)? {
            UniformValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        match self.uniforms.get(name)? {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec4(&self, name: &str) -> Option<Vector4<f32>> {
        match self.uniforms.get(name)? {
            UniformValue::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        match self.uniforms.get(name)? {
            UniformValue::Mat4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn texture_units(&self) -> usize {
        self.units.len()
    }

    pub fn active_unit(&self) -> u32 {
        self.active_unit
    }

    pub fn bound_texture(&self, unit: u32) -> Option<TextureHandle> {
        self.units.get(unit as usize).copied().flatten()
    }

    /// Total number of uniform writes since creation.
    pub fn uniform_writes(&self) -> usize {
        self.uniform_writes
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(MAX_TEXTURE_UNITS)
    }
}

impl ShaderBackend for RenderContext {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniform_writes += 1;
        self.uniforms.insert(name.to_string(), value);
    }

    fn activate_texture_unit(&mut self, unit: u32) {
        self.active_unit = unit;
    }

    fn bind_texture(&mut self, handle: TextureHandle) {
        match self.units.get_mut(self.active_unit as usize) {
            Some(slot) => *slot = Some(handle),
            None => log::error!(
                "Texture unit {} is out of range ({} units available)",
                self.active_unit,
                self.units.len()
            ),
        }
    }
}

/// Headless GPU device and queue.
#[derive(Debug)]
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: wgpu::AdapterInfo,
}

impl GpuContext {
    pub async fn headless() -> anyhow::Result<Self> {
        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;
        let adapter_info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("desk-scene device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        Ok(Self {
            device,
            queue,
            adapter_info,
        })
    }

    pub fn headless_blocking() -> anyhow::Result<Self> {
        futures::executor::block_on(Self::headless())
    }
}

//! GPU uniform layouts and the buffers they are written to.
//!
//! - `object` is the per-draw state block (model matrix, colour, material, UV scale)
//! - `light` is the directional + point light block, written once per scene
//!
//! [`SceneUniforms`] owns both buffers and their bind group. The object buffer
//! holds one aligned slot per draw in a frame; [`UniformUpload`] wraps a mesh
//! provider, writes the render context into the next free slot before each
//! draw and records the dynamic offset that draw binds the group with.

use anyhow::bail;
use wgpu::util::DeviceExt;

use crate::{
    context::{GpuContext, RenderContext},
    resources::mesh::{Faces, MeshProvider, Primitive},
};

pub mod light;
pub mod object;

use light::LightsUniform;
use object::ObjectUniform;

/// Object slots in one frame's uniform buffer.
pub const MAX_DRAWS_PER_FRAME: u32 = 256;

const OBJECT_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

/// Distance between two object slots: the block size rounded up to the
/// device's dynamic offset alignment.
pub fn object_stride(alignment: u32) -> u64 {
    let alignment = u64::from(alignment.max(1));
    OBJECT_SIZE.div_ceil(alignment) * alignment
}

pub fn mk_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, uniform: T) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Object block at binding 0 (dynamic offset), light block at binding 1.
pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let uniform_entry = |binding, has_dynamic_offset, min_binding_size| {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset,
                min_binding_size,
            },
            count: None,
        }
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            uniform_entry(0, true, wgpu::BufferSize::new(OBJECT_SIZE)),
            uniform_entry(1, false, None),
        ],
        label: Some("scene_uniform_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    object_buffer: &wgpu::Buffer,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(OBJECT_SIZE),
                }),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: light_buffer.as_entire_binding(),
            },
        ],
        label: Some("scene_uniform_bind_group"),
    })
}

pub struct SceneUniforms {
    pub object_buffer: wgpu::Buffer,
    pub object_stride: u64,
    pub light_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// Bound per draw with that draw's offset from [`UniformUpload::offsets`].
    pub bind_group: wgpu::BindGroup,
}

impl SceneUniforms {
    pub fn new(gpu: &GpuContext, lights: LightsUniform) -> Self {
        let object_stride = object_stride(gpu.device.limits().min_uniform_buffer_offset_alignment);
        let object_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: object_stride * u64::from(MAX_DRAWS_PER_FRAME),
            usage: wgpu::BufferUsages::UNIFORM
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let light_buffer = mk_buffer(&gpu.device, "Light Uniform Buffer", lights);
        let bind_group_layout = mk_bind_group_layout(&gpu.device);
        let bind_group =
            mk_bind_group(&gpu.device, &bind_group_layout, &object_buffer, &light_buffer);
        Self {
            object_buffer,
            object_stride,
            light_buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Write `uniform` into object slot `slot` and return its dynamic offset.
    pub fn write_object(
        &self,
        queue: &wgpu::Queue,
        slot: u32,
        uniform: &ObjectUniform,
    ) -> anyhow::Result<wgpu::DynamicOffset> {
        if slot >= MAX_DRAWS_PER_FRAME {
            bail!("Frame has more than {MAX_DRAWS_PER_FRAME} draws");
        }
        let offset = u64::from(slot) * self.object_stride;
        queue.write_buffer(&self.object_buffer, offset, bytemuck::bytes_of(uniform));
        Ok(wgpu::DynamicOffset::try_from(offset)?)
    }
}

/// Gives every draw its own object slot, filled from the render context.
pub struct UniformUpload<'a, M: MeshProvider> {
    gpu: &'a GpuContext,
    uniforms: &'a SceneUniforms,
    inner: M,
    offsets: Vec<wgpu::DynamicOffset>,
}

impl<'a, M: MeshProvider> UniformUpload<'a, M> {
    pub fn new(gpu: &'a GpuContext, uniforms: &'a SceneUniforms, inner: M) -> Self {
        Self {
            gpu,
            uniforms,
            inner,
            offsets: Vec::new(),
        }
    }

    pub fn uploads(&self) -> usize {
        self.offsets.len()
    }

    /// Dynamic offset of each draw so far, in draw order.
    pub fn offsets(&self) -> &[wgpu::DynamicOffset] {
        &self.offsets
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: MeshProvider> MeshProvider for UniformUpload<'_, M> {
    fn load(&mut self, primitive: Primitive) -> anyhow::Result<()> {
        self.inner.load(primitive)
    }

    fn draw(
        &mut self,
        ctx: &RenderContext,
        primitive: Primitive,
        faces: Faces,
    ) -> anyhow::Result<()> {
        let slot = u32::try_from(self.offsets.len())?;
        let uniform = ObjectUniform::from_context(ctx);
        let offset = self.uniforms.write_object(&self.gpu.queue, slot, &uniform)?;
        self.offsets.push(offset);
        self.inner.draw(ctx, primitive, faces)
    }
}

//! Texture data types and the GPU texture wrapper.
//!
//! This module provides the registry-facing texture types ([`TextureHandle`],
//! [`TextureEntry`], [`PixelFormat`], [`Sampling`]) and [`GpuTexture`], a
//! wrapper around the WGPU texture, view and sampler a registered image ends
//! up as on the device.

use anyhow::bail;
use image::{DynamicImage, imageops::FilterType};

/// Opaque device-side texture id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

impl std::fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Device-native pixel layout picked from an image's channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Red,
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Only 1, 3 and 4 channel images are supported.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(Self::Red),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            Self::Red => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

}

/// Every format lands on the device as sRGB RGBA. WGPU has neither a three-channel
/// nor a single-channel sRGB 8-bit format, so grey and RGB images are expanded.
pub const GPU_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const GPU_BYTES_PER_TEXEL: u32 = 4;

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

impl From<WrapMode> for wgpu::AddressMode {
    fn from(mode: WrapMode) -> Self {
        match mode {
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
            WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            WrapMode::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

/// Wrap modes per axis. Filtering is fixed: trilinear minification, linear magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sampling {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
}

impl Sampling {
    pub fn new(wrap_s: WrapMode, wrap_t: WrapMode) -> Self {
        Self { wrap_s, wrap_t }
    }

    pub fn clamped() -> Self {
        Self::new(WrapMode::ClampToEdge, WrapMode::ClampToEdge)
    }
}

/// A registered texture. `slot` is the texture unit it is bound to and always
/// equals its registration index.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
    pub slot: u32,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub sampling: Sampling,
}

impl TextureEntry {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Reject sizes the device cannot allocate. An empty image is never valid.
pub fn check_extent(width: u32, height: u32, max_dimension: u32) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        bail!("Image is empty ({width}x{height})");
    }
    if width > max_dimension || height > max_dimension {
        bail!("Image is {width}x{height}, the device allows at most {max_dimension} per side");
    }
    Ok(())
}

/// A GPU texture with its view and, once sampling is set, its sampler.
#[derive(Clone, Debug)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
    pub format: PixelFormat,
}

impl GpuTexture {
    /// Allocate a texture with room for a full mip chain and upload level 0.
    ///
    /// There is no sampler until [`set_sampling`](Self::set_sampling) is called
    /// after the mip chain is complete.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        format: PixelFormat,
        label: Option<&str>,
    ) -> anyhow::Result<Self> {
        check_extent(img.width(), img.height(), device.limits().max_texture_dimension_2d)?;
        let size = wgpu::Extent3d {
            width: img.width(),
            height: img.height(),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: mip_level_count(img.width(), img.height()),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: GPU_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let texture = Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            sampler: None,
            texture,
            format,
        };
        texture.write_level(queue, img, 0);
        Ok(texture)
    }

    /// Downsample `img` into every level below the base one.
    pub fn write_mip_chain(&self, queue: &wgpu::Queue, img: &DynamicImage) {
        for level in 1..self.texture.mip_level_count() {
            let width = (img.width() >> level).max(1);
            let height = (img.height() >> level).max(1);
            let level_img = img.resize_exact(width, height, FilterType::Triangle);
            self.write_level(queue, &level_img, level);
        }
    }

    pub fn set_sampling(&mut self, device: &wgpu::Device, sampling: Sampling) {
        self.sampler = Some(create_sampler(device, sampling));
    }

    fn write_level(&self, queue: &wgpu::Queue, img: &DynamicImage, mip_level: u32) {
        let data = img.to_rgba8().into_raw();
        let size = wgpu::Extent3d {
            width: img.width(),
            height: img.height(),
            depth_or_array_layers: 1,
        };
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.texture,
                mip_level,
                origin: wgpu::Origin3d::ZERO,
            },
            &data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(GPU_BYTES_PER_TEXEL * img.width()),
                rows_per_image: Some(img.height()),
            },
            size,
        );
    }
}

pub fn create_sampler(device: &wgpu::Device, sampling: Sampling) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: sampling.wrap_s.into(),
        address_mode_v: sampling.wrap_t.into(),
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

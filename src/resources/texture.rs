//! The texture registry and the devices textures live on.
//!
//! [`TextureRegistry`] maps a short tag to the device handle of a decoded and
//! uploaded image and to the texture unit ("slot") it is bound to. The slot
//! is always the registration index, which is what [`TextureRegistry::bind_all`]
//! binds to and what [`TextureRegistry::lookup_slot`] reports.
//!
//! Uploading goes through the [`TextureDevice`] seam: [`WgpuTextureDevice`]
//! for the GPU, [`MemoryTextureDevice`] when there is none (and in tests).

use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use image::DynamicImage;
use thiserror::Error;

use crate::{
    config::{MAX_TEXTURE_UNITS, SceneConfig},
    context::{GpuContext, ShaderBackend},
    data_structures::texture::{
        GpuTexture, PixelFormat, Sampling, TextureEntry, TextureHandle, WrapMode,
    },
    resources::{DecodedImage, ImageDecoder},
};

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Could not load image {}: {source}", path.display())]
    Decode { path: PathBuf, source: BoxedError },
    #[error("Unsupported number of channels in {}: {channels}", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("All {capacity} texture units are in use")]
    CapacityExceeded { capacity: usize },
    #[error("A texture tagged '{0}' is already registered")]
    DuplicateTag(String),
    #[error("Texture device failed for '{tag}': {source}")]
    Device { tag: String, source: BoxedError },
}

/// Where decoded images are turned into bindable textures.
///
/// The registry always calls `upload`, then `generate_mipmaps`, then
/// `set_sampling`. Some backends validate filter and wrap state against mip
/// completeness when it is set, so sampling must come last.
pub trait TextureDevice {
    fn upload(
        &mut self,
        image: &DecodedImage,
        format: PixelFormat,
        label: &str,
    ) -> anyhow::Result<TextureHandle>;

    fn generate_mipmaps(&mut self, handle: TextureHandle) -> anyhow::Result<()>;

    fn set_sampling(&mut self, handle: TextureHandle, sampling: Sampling) -> anyhow::Result<()>;

    /// Free the device memory behind `handle`.
    fn release(&mut self, handle: TextureHandle);
}

/// Tag -> texture handle and slot, in registration order.
#[derive(Debug)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    index: HashMap<String, usize>,
    capacity: usize,
    flip_vertically: bool,
}

impl TextureRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::new(),
            capacity,
            flip_vertically: true,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        let mut registry = Self::new(config.texture_units);
        registry.flip_vertically = config.flip_vertically;
        registry
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Returns the slot the texture will be bound to. On any failure the
    /// registry is left untouched and the error is logged.
    pub fn register(
        &mut self,
        device: &mut (impl TextureDevice + ?Sized),
        decoder: &(impl ImageDecoder + ?Sized),
        path: impl AsRef<Path>,
        tag: &str,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    ) -> Result<u32, TextureError> {
        let path = path.as_ref();
        let result = self.try_register(device, decoder, path, tag, Sampling::new(wrap_s, wrap_t));
        if let Err(e) = &result {
            log::error!("Failed to register texture '{tag}': {e}");
        }
        result
    }

    /// [`register`](Self::register) with repeating wrap on both axes.
    pub fn register_repeating(
        &mut self,
        device: &mut (impl TextureDevice + ?Sized),
        decoder: &(impl ImageDecoder + ?Sized),
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<u32, TextureError> {
        self.register(device, decoder, path, tag, WrapMode::Repeat, WrapMode::Repeat)
    }

    fn try_register(
        &mut self,
        device: &mut (impl TextureDevice + ?Sized),
        decoder: &(impl ImageDecoder + ?Sized),
        path: &Path,
        tag: &str,
        sampling: Sampling,
    ) -> Result<u32, TextureError> {
        if self.index.contains_key(tag) {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= self.capacity {
            return Err(TextureError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let image = decoder
            .decode(path, self.flip_vertically)
            .map_err(|e| TextureError::Decode {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        let format = PixelFormat::from_channels(image.channels).ok_or_else(|| {
            TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            }
        })?;
        log::info!(
            "Successfully loaded image: {}, width: {}, height: {}, channels: {}",
            path.display(),
            image.width,
            image.height,
            image.channels
        );

        let device_err = |e: anyhow::Error| TextureError::Device {
            tag: tag.to_string(),
            source: e.into(),
        };
        let handle = device.upload(&image, format, tag).map_err(device_err)?;
        // Mips before sampling state, see `TextureDevice`.
        let finished = device
            .generate_mipmaps(handle)
            .and_then(|_| device.set_sampling(handle, sampling));
        if let Err(e) = finished {
            device.release(handle);
            return Err(device_err(e));
        }

        let slot = self.entries.len() as u32;
        self.index.insert(tag.to_string(), self.entries.len());
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
            slot,
            width: image.width,
            height: image.height,
            format,
            sampling,
        });
        Ok(slot)
    }

    pub fn entry(&self, tag: &str) -> Option<&TextureEntry> {
        self.index.get(tag).map(|&i| &self.entries[i])
    }

    pub fn lookup_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.entry(tag).map(|entry| entry.handle)
    }

    pub fn lookup_slot(&self, tag: &str) -> Option<u32> {
        self.entry(tag).map(|entry| entry.slot)
    }

    /// Width over height of the registered image.
    pub fn aspect_ratio(&self, tag: &str) -> Option<f32> {
        self.entry(tag).map(TextureEntry::aspect_ratio)
    }

    /// Bind every texture to the unit matching its registration index.
    pub fn bind_all(&self, ctx: &mut (impl ShaderBackend + ?Sized)) {
        for entry in &self.entries {
            ctx.activate_texture_unit(entry.slot);
            ctx.bind_texture(entry.handle);
            log::debug!("Bound texture '{}' ({}) to unit {}", entry.tag, entry.handle, entry.slot);
        }
    }

    /// Free every device handle exactly once and forget all entries.
    pub fn release_all(&mut self, device: &mut (impl TextureDevice + ?Sized)) {
        for entry in self.entries.drain(..) {
            log::debug!("Releasing texture '{}' ({})", entry.tag, entry.handle);
            device.release(entry.handle);
        }
        self.index.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &TextureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new(MAX_TEXTURE_UNITS)
    }
}

/// One call made against a [`MemoryTextureDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceOp {
    Upload {
        handle: TextureHandle,
        label: String,
        format: PixelFormat,
        width: u32,
        height: u32,
    },
    GenerateMipmaps(TextureHandle),
    SetSampling(TextureHandle, Sampling),
    Release(TextureHandle),
}

/// A texture device without a GPU: hands out handles and records every call.
#[derive(Debug, Default)]
pub struct MemoryTextureDevice {
    ops: Vec<DeviceOp>,
    live: BTreeSet<TextureHandle>,
    next_handle: u32,
}

impl MemoryTextureDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DeviceOp] {
        &self.ops
    }

    /// Handles uploaded and not yet released.
    pub fn live(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.live.iter().copied()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of handles ever handed out.
    pub fn allocations(&self) -> usize {
        self.next_handle as usize
    }

    fn check_live(&self, handle: TextureHandle) -> anyhow::Result<()> {
        if self.live.contains(&handle) {
            Ok(())
        } else {
            Err(anyhow!("Texture {handle} is not allocated"))
        }
    }
}

impl TextureDevice for MemoryTextureDevice {
    fn upload(
        &mut self,
        image: &DecodedImage,
        format: PixelFormat,
        label: &str,
    ) -> anyhow::Result<TextureHandle> {
        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.live.insert(handle);
        self.ops.push(DeviceOp::Upload {
            handle,
            label: label.to_string(),
            format,
            width: image.width,
            height: image.height,
        });
        Ok(handle)
    }

    fn generate_mipmaps(&mut self, handle: TextureHandle) -> anyhow::Result<()> {
        self.check_live(handle)?;
        self.ops.push(DeviceOp::GenerateMipmaps(handle));
        Ok(())
    }

    fn set_sampling(&mut self, handle: TextureHandle, sampling: Sampling) -> anyhow::Result<()> {
        self.check_live(handle)?;
        self.ops.push(DeviceOp::SetSampling(handle, sampling));
        Ok(())
    }

    fn release(&mut self, handle: TextureHandle) {
        if !self.live.remove(&handle) {
            log::warn!("Texture {handle} released twice or never allocated");
        }
        self.ops.push(DeviceOp::Release(handle));
    }
}

/// Textures on a WGPU device.
pub struct WgpuTextureDevice<'a> {
    gpu: &'a GpuContext,
    textures: HashMap<TextureHandle, GpuTexture>,
    // Base level kept around until its mip chain has been written.
    pending: HashMap<TextureHandle, DynamicImage>,
    next_handle: u32,
}

impl<'a> WgpuTextureDevice<'a> {
    pub fn new(gpu: &'a GpuContext) -> Self {
        Self {
            gpu,
            textures: HashMap::new(),
            pending: HashMap::new(),
            next_handle: 0,
        }
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&GpuTexture> {
        self.textures.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureDevice for WgpuTextureDevice<'_> {
    fn upload(
        &mut self,
        image: &DecodedImage,
        format: PixelFormat,
        label: &str,
    ) -> anyhow::Result<TextureHandle> {
        let img = image.to_dynamic().ok_or_else(|| {
            anyhow!("{} channel image data does not match its size", image.channels)
        })?;
        let texture =
            GpuTexture::from_image(&self.gpu.device, &self.gpu.queue, &img, format, Some(label))?;

        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.textures.insert(handle, texture);
        self.pending.insert(handle, img);
        Ok(handle)
    }

    fn generate_mipmaps(&mut self, handle: TextureHandle) -> anyhow::Result<()> {
        let texture = self
            .textures
            .get(&handle)
            .ok_or_else(|| anyhow!("Texture {handle} is not allocated"))?;
        let img = self
            .pending
            .remove(&handle)
            .ok_or_else(|| anyhow!("Mipmaps for texture {handle} were already generated"))?;
        texture.write_mip_chain(&self.gpu.queue, &img);
        Ok(())
    }

    fn set_sampling(&mut self, handle: TextureHandle, sampling: Sampling) -> anyhow::Result<()> {
        let texture = self
            .textures
            .get_mut(&handle)
            .ok_or_else(|| anyhow!("Texture {handle} is not allocated"))?;
        texture.set_sampling(&self.gpu.device, sampling);
        Ok(())
    }

    fn release(&mut self, handle: TextureHandle) {
        self.pending.remove(&handle);
        match self.textures.remove(&handle) {
            Some(texture) => texture.texture.destroy(),
            None => log::warn!("Texture {handle} released twice or never allocated"),
        }
    }
}

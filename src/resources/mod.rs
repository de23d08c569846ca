//! Loading and registering scene resources.
//!
//! - `texture`: the texture registry and the devices textures are uploaded to
//! - `material`: the material registry
//! - `mesh`: the mesh-provider seam primitive meshes are drawn through
//!
//! Image decoding lives here too: [`ImageDecoder`] turns a file into raw
//! pixels, [`FileDecoder`] does it with the `image` crate.

use std::path::Path;

use anyhow::Context;
use image::DynamicImage;

pub mod material;
pub mod mesh;
pub mod texture;

/// Raw 8-bit pixels, tightly packed, `channels` bytes per texel.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    /// A single-colour image, mostly useful for placeholders and tests.
    pub fn solid(width: u32, height: u32, texel: &[u8]) -> Self {
        let pixels = texel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * texel.len())
            .collect();
        Self {
            pixels,
            width,
            height,
            channels: texel.len() as u8,
        }
    }

    /// `None` for channel counts without an 8-bit image representation we upload.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h, raw) = (self.width, self.height, self.pixels.clone());
        match self.channels {
            1 => image::GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
            3 => image::RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
            4 => image::RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
            _ => None,
        }
    }
}

/// Turns an image file into raw pixels.
pub trait ImageDecoder {
    fn decode(&self, path: &Path, flip_vertically: bool) -> anyhow::Result<DecodedImage>;
}

impl<F> ImageDecoder for F
where
    F: Fn(&Path, bool) -> anyhow::Result<DecodedImage>,
{
    fn decode(&self, path: &Path, flip_vertically: bool) -> anyhow::Result<DecodedImage> {
        self(path, flip_vertically)
    }
}

/// Decodes files from disk, keeping the file's own channel count.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path, flip_vertically: bool) -> anyhow::Result<DecodedImage> {
        let img = image::open(path)
            .with_context(|| format!("Could not load image: {}", path.display()))?;
        let img = if flip_vertically { img.flipv() } else { img };

        let (width, height) = (img.width(), img.height());
        let channels = img.color().channel_count();
        // Wider sample types are narrowed to 8 bits, the channel count is kept.
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };

        Ok(DecodedImage {
            pixels,
            width,
            height,
            channels,
        })
    }
}

#![allow(dead_code)]

use std::{collections::HashMap, path::Path};

use anyhow::bail;
use desk_scene::{
    config::SceneConfig,
    context::RenderContext,
    render::LookupPolicy,
    resources::{
        DecodedImage, ImageDecoder,
        mesh::DrawLog,
        texture::MemoryTextureDevice,
    },
    scene::{DeskScene, TEXTURE_MANIFEST},
};

/// Serves solid images by file name instead of reading the disk.
pub(crate) struct FakeAssets {
    images: HashMap<String, (u32, u32, u8)>,
}

impl FakeAssets {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    /// Every texture the desk scene registers, with the keyboard photo at
    /// its real aspect ratio.
    pub fn desk() -> Self {
        let mut assets = Self::new();
        for asset in TEXTURE_MANIFEST {
            assets = assets.with(asset.file, 8, 8, 3);
        }
        assets.with("textures/keyboard_texture.jpg", 149, 41, 3)
    }

    pub fn with(mut self, file: &str, width: u32, height: u32, channels: u8) -> Self {
        self.images.insert(file_name(Path::new(file)), (width, height, channels));
        self
    }

    pub fn without(mut self, file: &str) -> Self {
        self.images.remove(&file_name(Path::new(file)));
        self
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ImageDecoder for FakeAssets {
    fn decode(&self, path: &Path, _flip_vertically: bool) -> anyhow::Result<DecodedImage> {
        let Some(&(width, height, channels)) = self.images.get(&file_name(path)) else {
            bail!("No such file: {}", path.display());
        };
        Ok(DecodedImage::solid(width, height, &vec![128; channels as usize]))
    }
}

/// A decoder that returns the same solid image for every path.
pub(crate) fn solid_decoder(
    width: u32,
    height: u32,
    channels: u8,
) -> impl Fn(&Path, bool) -> anyhow::Result<DecodedImage> {
    move |_: &Path, _: bool| Ok(DecodedImage::solid(width, height, &vec![255; channels as usize]))
}

pub(crate) struct Prepared {
    pub scene: DeskScene,
    pub device: MemoryTextureDevice,
    pub meshes: DrawLog,
    pub ctx: RenderContext,
}

pub(crate) fn prepare_desk(assets: &FakeAssets, policy: LookupPolicy) -> anyhow::Result<Prepared> {
    let config = SceneConfig::default().with_lookup_policy(policy);
    let mut device = MemoryTextureDevice::new();
    let mut meshes = DrawLog::new();
    let mut ctx = RenderContext::new(config.texture_units);
    let scene = DeskScene::prepare(config, &mut device, assets, &mut meshes, &mut ctx)?;
    Ok(Prepared {
        scene,
        device,
        meshes,
        ctx,
    })
}

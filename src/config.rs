//! Scene configuration.
//!
//! [`SceneConfig`] collects the few knobs the scene has: where the texture
//! images live, whether images are flipped on load, how many texture units
//! the backend exposes and how strictly tag lookups are treated.

use std::path::{Path, PathBuf};

use crate::render::LookupPolicy;

/// Number of simultaneously bindable texture units the shading backend exposes.
pub const MAX_TEXTURE_UNITS: usize = 16;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub asset_dir: PathBuf,
    /// Images are stored top row first but sampled bottom row first.
    pub flip_vertically: bool,
    pub texture_units: usize,
    pub lookup_policy: LookupPolicy,
}

impl SceneConfig {
    /// Defaults overridden by `DESK_SCENE_ASSETS` (asset directory) and
    /// `DESK_SCENE_STRICT` (`1`/`true` turns lookup misses into errors).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("DESK_SCENE_ASSETS") {
            config.asset_dir = PathBuf::from(dir);
        }
        if let Ok(strict) = std::env::var("DESK_SCENE_STRICT") {
            if matches!(strict.trim(), "1" | "true" | "TRUE" | "yes") {
                config.lookup_policy = LookupPolicy::Strict;
            }
        }
        config
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    /// Resolve an asset path relative to the asset directory.
    pub fn asset(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(file_name)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_dir: Path::new("./").join("assets"),
            flip_vertically: true,
            texture_units: MAX_TEXTURE_UNITS,
            lookup_policy: LookupPolicy::Lenient,
        }
    }
}

use cgmath::Vector3;

use crate::{
    data_structures::{
        light::{DirectionalLight, LightRig, PointLight},
        texture::WrapMode,
    },
    resources::material::{MaterialError, MaterialRegistry},
};

/// An image file and the tag objects refer to it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureAsset {
    pub tag: &'static str,
    pub file: &'static str,
    pub wrap: WrapMode,
}

const fn repeating(tag: &'static str, file: &'static str) -> TextureAsset {
    TextureAsset {
        tag,
        file,
        wrap: WrapMode::Repeat,
    }
}

/// Registration order, which is also texture unit order.
pub const TEXTURE_MANIFEST: [TextureAsset; 9] = [
    repeating("glass", "textures/glass.jpg"),
    repeating("green_stem", "textures/green_stem.jpg"),
    repeating("white_flower", "textures/white_flower.png"),
    repeating("beige_puff", "textures/beige_puff.jpg"),
    repeating("wood", "textures/wood.jpg"),
    repeating("desk", "textures/desk.jpg"),
    repeating("vase_opening_side", "textures/wet_glass.jpg"),
    // Stretched by a UV scale, so they must not tile.
    TextureAsset {
        tag: "keyboard_texture",
        file: "textures/keyboard_texture.jpg",
        wrap: WrapMode::ClampToEdge,
    },
    TextureAsset {
        tag: "mouse_texture",
        file: "textures/mouse_texture.jpg",
        wrap: WrapMode::ClampToEdge,
    },
];

pub(crate) fn define_materials(materials: &mut MaterialRegistry) -> Result<(), MaterialError> {
    let grey = |v: f32| Vector3::new(v, v, v);

    materials.define("plastic", grey(0.1), grey(0.2), 32.0)?;
    materials.define("silver", grey(0.75), grey(0.9), 128.0)?;
    materials.define("glass", [0.1, 0.1, 0.2], grey(0.9), 256.0)?;
    materials.define("brown_stem", [0.45, 0.35, 0.25], grey(0.2), 16.0)?;
    materials.define("green_stem", [0.15, 0.4, 0.2], grey(0.2), 16.0)?;
    materials.define("beige_puff", [0.93, 0.86, 0.76], grey(0.2), 4.0)?;
    materials.define("white_flower", grey(1.0), grey(0.2), 8.0)?;
    materials.define("desk", [0.6, 0.4, 0.2], grey(0.3), 32.0)?;
    materials.define("organizer", grey(0.8), grey(0.3), 32.0)?;
    materials.define("teacup", [0.95, 0.9, 0.85], grey(0.6), 64.0)?;
    materials.define("saucer", [0.95, 0.9, 0.85], grey(0.6), 64.0)?;
    materials.define("gray_book", grey(0.5), grey(0.1), 8.0)?;
    materials.define("black_book", grey(0.1), grey(0.1), 8.0)?;
    materials.define("light_blue_book", [0.4, 0.6, 0.8], grey(0.2), 8.0)?;
    Ok(())
}

/// A soft key light from the front left, a bright lamp above the desk and a
/// side fill. The last two point lights are placed but switched off.
pub fn desk_lights() -> LightRig {
    let grey = |v: f32| Vector3::new(v, v, v);

    LightRig {
        directional: DirectionalLight {
            active: true,
            direction: Vector3::new(-0.5, -0.6, 0.7),
            ambient: grey(0.4),
            diffuse: grey(0.7),
            specular: grey(0.6),
        },
        points: [
            PointLight {
                active: true,
                position: Vector3::new(0.0, 12.0, 5.0),
                ambient: grey(0.2),
                diffuse: grey(0.5),
                specular: grey(0.3),
                constant: 1.0,
                linear: 0.045,
                quadratic: 0.0075,
            },
            PointLight {
                active: true,
                position: Vector3::new(10.0, 6.0, -3.0),
                ambient: grey(0.1),
                diffuse: grey(0.6),
                specular: grey(0.8),
                ..Default::default()
            },
            PointLight {
                position: Vector3::new(-7.0, 8.0, 10.0),
                ambient: grey(0.1),
                diffuse: grey(0.3),
                specular: grey(0.2),
                ..Default::default()
            },
            PointLight {
                position: Vector3::new(2.0, 4.0, -5.0),
                ambient: grey(0.05),
                diffuse: grey(0.2),
                specular: grey(0.1),
                ..Default::default()
            },
        ],
    }
}

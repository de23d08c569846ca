//! desk-scene
//!
//! A static desk workspace (desk, monitor, keyboard, mouse, teacup, vase with
//! flowers, books and an organizer) drawn from a handful of textured and lit
//! primitive meshes. The interesting part is the state protocol in front of
//! every draw: textures and materials are registered once under short tags,
//! and right before each mesh is drawn the needed subset of texture, material,
//! colour, UV scale and model transform is pushed into an explicit render
//! context.
//!
//! High-level modules
//! - `config`: scene configuration (asset directory, texture units, lookup policy)
//! - `context`: the render context (named uniforms + texture units) and the headless GPU context
//! - `data_structures`: textures, materials, lights and transforms
//! - `resources`: image decoding, the texture and material registries, mesh provider seam
//! - `render`: the shader state applier used before every draw call
//! - `pipelines`: GPU uniform layouts for the object and light state
//! - `scene`: the desk scene itself
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;

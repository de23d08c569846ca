//! Scene data structures: textures, materials, lights and transforms.
//!
//! - `texture` contains the registry entry types and the GPU texture wrapper
//! - `material` holds the Phong shading parameter triple
//! - `light` is the fixed directional + four point light rig
//! - `transform` composes model matrices and fits UV scales

pub mod light;
pub mod material;
pub mod texture;
pub mod transform;

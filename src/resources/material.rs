use std::collections::HashMap;

use cgmath::Vector3;
use thiserror::Error;

use crate::data_structures::material::Material;

#[derive(Error, Debug, PartialEq)]
pub enum MaterialError {
    #[error("A material tagged '{0}' is already defined")]
    DuplicateTag(String),
    #[error("Material '{tag}' needs a positive shininess exponent, got {shininess}")]
    InvalidShininess { tag: String, shininess: f32 },
}

/// Tag -> material, in definition order.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    index: HashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(
        &mut self,
        tag: &str,
        diffuse_color: impl Into<Vector3<f32>>,
        specular_color: impl Into<Vector3<f32>>,
        shininess: f32,
    ) -> Result<(), MaterialError> {
        self.insert(Material::new(tag, diffuse_color, specular_color, shininess))
    }

    pub fn insert(&mut self, material: Material) -> Result<(), MaterialError> {
        if self.index.contains_key(&material.tag) {
            return Err(MaterialError::DuplicateTag(material.tag));
        }
        if !(material.shininess.is_finite() && material.shininess > 0.0) {
            return Err(MaterialError::InvalidShininess {
                tag: material.tag,
                shininess: material.shininess,
            });
        }
        self.index.insert(material.tag.clone(), self.materials.len());
        self.materials.push(material);
        Ok(())
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.index.get(tag).map(|&i| &self.materials[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

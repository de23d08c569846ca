use cgmath::Vector3;

/// Fixed Phong shading parameters for a surface.
///
/// `shininess` is the specular exponent: higher values give a tighter, shinier
/// highlight. Scene materials stay within 1..=256.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        tag: &str,
        diffuse_color: impl Into<Vector3<f32>>,
        specular_color: impl Into<Vector3<f32>>,
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            diffuse_color: diffuse_color.into(),
            specular_color: specular_color.into(),
            shininess,
        }
    }
}

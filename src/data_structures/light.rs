//! Scene lighting: one directional light and a fixed block of four point lights.
//!
//! The shader hard-codes exactly one `directionalLight` and four
//! `pointLights[i]` uniform blocks, so [`LightRig`] mirrors that shape with a
//! fixed-size array. Unused point lights stay in the array and are marked
//! inactive.

use cgmath::Vector3;

use crate::context::{ShaderBackend, USE_LIGHTING};

pub const POINT_LIGHT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub active: bool,
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            active: false,
            direction: Vector3::new(0.0, -1.0, 0.0),
            ambient: Vector3::new(0.0, 0.0, 0.0),
            diffuse: Vector3::new(0.0, 0.0, 0.0),
            specular: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub active: bool,
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    /// Attenuation is `1 / (constant + linear * d + quadratic * d^2)`.
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            active: false,
            position: Vector3::new(0.0, 0.0, 0.0),
            ambient: Vector3::new(0.0, 0.0, 0.0),
            diffuse: Vector3::new(0.0, 0.0, 0.0),
            specular: Vector3::new(0.0, 0.0, 0.0),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

impl PointLight {
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub points: [PointLight; POINT_LIGHT_COUNT],
}

impl LightRig {
    pub fn active_point_lights(&self) -> usize {
        self.points.iter().filter(|light| light.active).count()
    }

    /// Turn lighting on and write every light block, inactive ones included.
    pub fn upload(&self, backend: &mut (impl ShaderBackend + ?Sized)) {
        backend.set_bool(USE_LIGHTING, true);

        let d = &self.directional;
        backend.set_vec3("directionalLight.direction", d.direction);
        backend.set_vec3("directionalLight.ambient", d.ambient);
        backend.set_vec3("directionalLight.diffuse", d.diffuse);
        backend.set_vec3("directionalLight.specular", d.specular);
        backend.set_bool("directionalLight.bActive", d.active);

        for (i, p) in self.points.iter().enumerate() {
            backend.set_vec3(&format!("pointLights[{i}].position"), p.position);
            backend.set_vec3(&format!("pointLights[{i}].ambient"), p.ambient);
            backend.set_vec3(&format!("pointLights[{i}].diffuse"), p.diffuse);
            backend.set_vec3(&format!("pointLights[{i}].specular"), p.specular);
            backend.set_float(&format!("pointLights[{i}].constant"), p.constant);
            backend.set_float(&format!("pointLights[{i}].linear"), p.linear);
            backend.set_float(&format!("pointLights[{i}].quadratic"), p.quadratic);
            backend.set_bool(&format!("pointLights[{i}].bActive"), p.active);
        }
    }
}

use crate::data_structures::light::{DirectionalLight, LightRig, POINT_LIGHT_COUNT, PointLight};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightUniform {
    direction: [f32; 3],
    active: u32,
    ambient: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    diffuse: [f32; 3],
    _padding2: u32,
    specular: [f32; 3],
    _padding3: u32,
}

impl From<&DirectionalLight> for DirectionalLightUniform {
    fn from(light: &DirectionalLight) -> Self {
        Self {
            direction: light.direction.into(),
            active: light.active as u32,
            ambient: light.ambient.into(),
            _padding: 0,
            diffuse: light.diffuse.into(),
            _padding2: 0,
            specular: light.specular.into(),
            _padding3: 0,
        }
    }
}

/// Attenuation terms fill the fourth component of each vec3 row.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    position: [f32; 3],
    active: u32,
    ambient: [f32; 3],
    constant: f32,
    diffuse: [f32; 3],
    linear: f32,
    specular: [f32; 3],
    quadratic: f32,
}

impl From<&PointLight> for PointLightUniform {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.into(),
            active: light.active as u32,
            ambient: light.ambient.into(),
            constant: light.constant,
            diffuse: light.diffuse.into(),
            linear: light.linear,
            specular: light.specular.into(),
            quadratic: light.quadratic,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub directional: DirectionalLightUniform,
    pub points: [PointLightUniform; POINT_LIGHT_COUNT],
}

impl From<&LightRig> for LightsUniform {
    fn from(rig: &LightRig) -> Self {
        Self {
            directional: (&rig.directional).into(),
            points: rig.points.each_ref().map(PointLightUniform::from),
        }
    }
}

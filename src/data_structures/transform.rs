//! Model transforms and texture-coordinate scaling.
//!
//! A [`Transform`] is the scale / Euler rotation / position triple each draw
//! is placed with. The composition order of [`Transform::to_matrix`] is fixed:
//! any other rotation order changes the orientation of every object rotated
//! about more than one axis.

use cgmath::{Deg, Matrix4, Vector2, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    /// Rotation about X, Y and Z in degrees.
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    pub fn new(
        scale: impl Into<Vector3<f32>>,
        x_degrees: f32,
        y_degrees: f32,
        z_degrees: f32,
        position: impl Into<Vector3<f32>>,
    ) -> Self {
        Self {
            scale: scale.into(),
            rotation: Vector3::new(x_degrees, y_degrees, z_degrees),
            position: position.into(),
        }
    }

    /// Scale and translation only.
    pub fn placed(scale: impl Into<Vector3<f32>>, position: impl Into<Vector3<f32>>) -> Self {
        Self::new(scale, 0.0, 0.0, 0.0, position)
    }

    /// `T * Rz * Ry * Rx * S`: scale is applied first, translation last.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

/// Multiplier applied to texture coordinates in the vertex stage.
pub struct UvScale;

impl UvScale {
    /// Keep a texture's visual aspect ratio on a face of a different shape.
    ///
    /// `model_aspect` is width / depth of the target face, `texture_aspect`
    /// width / height of the image. The wider side gets stretched; the other
    /// axis keeps a factor of 1. Coordinates end up outside `[0, 1]`, so the
    /// texture must be sampled with clamp-to-edge wrapping.
    pub fn fit(model_aspect: f32, texture_aspect: f32) -> Vector2<f32> {
        if model_aspect > texture_aspect {
            Vector2::new(model_aspect / texture_aspect, 1.0)
        } else {
            Vector2::new(1.0, texture_aspect / model_aspect)
        }
    }
}

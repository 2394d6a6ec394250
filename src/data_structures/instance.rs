//! Per-object transformation data.
//!
//! Every draw command carries its own scale, per-axis rotation and position.
//! These are folded into a single model matrix right before the draw call.

use cgmath::{Deg, Matrix4, Vector3};

use crate::data_structures::command::DrawCommand;

/// Per-object transformation: scale, rotation in degrees around X, Y and Z,
/// and position.
///
/// Rotations are not combined into an axis-angle or quaternion. Each axis is
/// rotated independently, see [`compose`] for the exact order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Create a new transform with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(
            self.scale,
            self.rotation_degrees.x,
            self.rotation_degrees.y,
            self.rotation_degrees.z,
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
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

impl From<&DrawCommand> for Transform {
    fn from(command: &DrawCommand) -> Self {
        Transform {
            scale: command.scale.into(),
            rotation_degrees: command.rotation.into(),
            position: command.position.into(),
        }
    }
}

/// Build a model matrix from scale, rotation angles (degrees) and position.
///
/// The order is fixed: `Translate * RotateX * RotateY * RotateZ * Scale`.
/// Reading right to left, a vertex is scaled first, then rotated around Z,
/// Y and X, and finally moved into place. Swapping any two factors changes the
/// result as soon as the scale is non-uniform or more than one angle is set.
pub fn compose(
    scale: Vector3<f32>,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    let scale = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    let rotation_x = Matrix4::from_angle_x(Deg(x_rotation_degrees));
    let rotation_y = Matrix4::from_angle_y(Deg(y_rotation_degrees));
    let rotation_z = Matrix4::from_angle_z(Deg(z_rotation_degrees));
    let translation = Matrix4::from_translation(position);

    translation * rotation_x * rotation_y * rotation_z * scale
}

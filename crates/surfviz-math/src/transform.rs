use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Model transform applied at draw time. Mesh vertex data is never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    /// Rotation of `angle` radians about the +Y axis.
    pub fn from_rotation_y(angle: f64) -> Self {
        Self::from_mat4(DMat4::from_rotation_y(angle))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    /// Column-major f32 matrix for uniform upload.
    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        let c = self.to_mat4().to_cols_array_2d();
        c.map(|col| col.map(|x| x as f32))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

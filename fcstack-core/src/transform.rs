/// 3D transformation matrices
use nalgebra::{Matrix4, Vector3};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Translation along the stacking (Y) axis only
    pub fn lift(y: f32) -> Matrix4<f32> {
        Self::translation_matrix(0.0, y, 0.0)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

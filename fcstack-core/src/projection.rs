/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(3.0, 3.0, 8.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75f32.to_radians(),
            aspect: aspect_ratio(width as f32, height as f32),
            near: 0.1,
            far: 1000.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Adapt the aspect ratio to a resized viewport
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalized device units, or
    /// `None` when the point lies behind the camera. Points beside the
    /// viewport are still returned so the rasterizer can clip partially
    /// visible faces.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = Transform::mvp_matrix(model_matrix, &self.view_matrix(), &self.projection_matrix());
        self.project_with(&mvp, point, width, height)
    }

    /// Same as [`Camera::project_to_screen`] with a precomputed MVP matrix
    pub fn project_with(
        &self,
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero or negative w (behind the eye)
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn aspect_ratio(width: f32, height: f32) -> f32 {
    if height > 0.0 && width > 0.0 {
        width / height
    } else {
        1.0
    }
}

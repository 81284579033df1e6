use arena_render::RenderView;
use glam::{Mat4, Vec3};

/// Perspective projection parameters that pair with a [`RenderView`].
///
/// The view says where the camera is; this says how it projects.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Update the aspect ratio from a surface size. Zero height is treated as 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(view: &RenderView) -> Mat4 {
        Mat4::look_at_rh(view.eye, view.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, view: &RenderView) -> Mat4 {
        Mat4::perspective_rh(view.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, view: &RenderView) -> Mat4 {
        self.projection_matrix(view) * Self::view_matrix(view)
    }
}

use glam::{Mat4, Vec3, Vec4};

use crate::constants::DEFAULT_FOV_DEG;

/// Right-handed perspective camera. `Navigation` rewrites the pose and the
/// field of view every frame; the host owns aspect via the viewport it passes
/// to `update`.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: DEFAULT_FOV_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// World-space ray through a normalized-device-coordinate point.
    ///
    /// Returns `(ray_origin, ray_direction)`; the origin is the camera eye.
    pub fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - p0).normalize())
    }
}

/// Render-surface size in pixels, used to map pointer coordinates and to
/// normalize drag deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions, never below 1 pixel.
    pub fn smallest_side(&self) -> f32 {
        self.width.min(self.height).max(1.0)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Pixel coordinates to normalized device coordinates (x right, y up).
    pub fn ndc(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (2.0 * x / self.width.max(1.0)) - 1.0,
            1.0 - (2.0 * y / self.height.max(1.0)),
        )
    }
}

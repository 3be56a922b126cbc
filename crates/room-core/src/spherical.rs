use glam::Vec3;

/// Camera offset from its target point in spherical coordinates.
///
/// Uses the y-up convention: `phi` is the polar angle measured down from +Y
/// in `[0, pi]`, `theta` the azimuth around Y measured from +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Cartesian offset for this coordinate.
    pub fn to_vec3(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    /// Spherical coordinate of a cartesian offset. A zero vector maps to a
    /// zero radius with both angles at zero.
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius <= f32::EPSILON {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }
}

/// One step of a frame-rate-compensated first-order low-pass filter.
///
/// The blend factor is capped at 1 so a long frame lands on the target
/// instead of overshooting it.
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate_per_sec: f32, dt_sec: f32) -> f32 {
    let alpha = (rate_per_sec * dt_sec).min(1.0);
    current + (target - current) * alpha
}

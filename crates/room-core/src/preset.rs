use std::f32::consts::PI;

use glam::Vec3;
use thiserror::Error;

use crate::spherical::Spherical;

/// Name of the free-roam view every transition routes through.
pub const DEFAULT_VIEW: &str = "default";

/// Inclusive clamp bounds for one scalar axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp without assuming `min <= max`; validation happens at preset
    /// registration, not here.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    fn check(&self, preset: &str, axis: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                preset: preset.to_string(),
                axis,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("preset `{preset}`: {axis} range inverted ({min} > {max})")]
    InvalidRange {
        preset: String,
        axis: &'static str,
        min: f32,
        max: f32,
    },
}

/// Per-axis clamp ranges for a view preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewLimits {
    pub radius: Range,
    pub phi: Range,
    pub theta: Range,
    pub target_x: Range,
    pub target_y: Range,
    pub target_z: Range,
}

/// A named camera configuration: where the camera sits, what it looks at,
/// and how far the user may push it from there.
#[derive(Clone, Debug)]
pub struct ViewPreset {
    pub name: String,
    pub spherical: Spherical,
    pub target: Vec3,
    pub limits: ViewLimits,
    pub allow_drag: bool,
    pub allow_zoom: bool,
}

impl ViewPreset {
    /// Reject inverted clamp ranges before they reach the per-frame path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.radius.check(&self.name, "radius")?;
        self.limits.phi.check(&self.name, "phi")?;
        self.limits.theta.check(&self.name, "theta")?;
        self.limits.target_x.check(&self.name, "target_x")?;
        self.limits.target_y.check(&self.name, "target_y")?;
        self.limits.target_z.check(&self.name, "target_z")?;
        Ok(())
    }
}

/// The free-roam preset the scene opens in; the only one allowing drag and
/// zoom.
pub fn default_preset() -> ViewPreset {
    ViewPreset {
        name: DEFAULT_VIEW.to_string(),
        spherical: Spherical::new(30.0, PI * 0.35, -PI * 0.25),
        target: Vec3::new(0.0, 2.0, 0.0),
        limits: ViewLimits {
            radius: Range::new(10.0, 50.0),
            phi: Range::new(0.01, PI * 0.5),
            theta: Range::new(-PI * 0.5, 0.0),
            target_x: Range::new(-4.0, 4.0),
            target_y: Range::new(1.0, 6.0),
            target_z: Range::new(-4.0, 4.0),
        },
        allow_drag: true,
        allow_zoom: true,
    }
}

/// Built-in presets for the room scene. Hotspot presets here are fallback
/// poses; world setup re-derives them from live geometry with
/// `Navigation::set_preset_from_mesh` (the bookshelf only exists that way).
pub fn builtin_presets() -> Vec<ViewPreset> {
    vec![
        default_preset(),
        ViewPreset {
            name: "pc_screen".to_string(),
            spherical: Spherical::new(12.0, PI * 0.32, -PI * 0.35),
            target: Vec3::new(-1.5, 1.8, 0.5),
            limits: ViewLimits {
                radius: Range::new(10.0, 14.0),
                phi: Range::new(0.2, 0.45),
                theta: Range::new(-0.5, -0.2),
                target_x: Range::new(-2.5, -0.5),
                target_y: Range::new(1.2, 2.4),
                target_z: Range::new(-0.5, 1.5),
            },
            allow_drag: false,
            allow_zoom: false,
        },
        ViewPreset {
            name: "mac_screen".to_string(),
            spherical: Spherical::new(14.0, PI * 0.38, -PI * 0.15),
            target: Vec3::new(1.5, 1.5, 1.0),
            limits: ViewLimits {
                radius: Range::new(12.0, 16.0),
                phi: Range::new(0.25, 0.5),
                theta: Range::new(-0.3, 0.0),
                target_x: Range::new(0.5, 2.5),
                target_y: Range::new(1.0, 2.0),
                target_z: Range::new(0.0, 2.0),
            },
            allow_drag: false,
            allow_zoom: false,
        },
        ViewPreset {
            name: "tv".to_string(),
            spherical: Spherical::new(12.0, PI * 0.35, -PI * 0.25),
            target: Vec3::new(4.2, 2.7, 1.6),
            limits: ViewLimits {
                radius: Range::new(10.0, 14.0),
                phi: Range::new(0.25, 0.45),
                theta: Range::new(-0.5, 0.0),
                target_x: Range::new(3.0, 5.0),
                target_y: Range::new(2.0, 3.5),
                target_z: Range::new(0.5, 2.5),
            },
            allow_drag: false,
            allow_zoom: false,
        },
    ]
}

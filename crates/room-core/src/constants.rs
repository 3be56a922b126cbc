// Navigation/interaction tuning constants shared by the core and the
// frontends.

// Field of view per view mode: narrow while free-roaming, wide while locked
// onto a hotspot so the close-up subject stays framed.
pub const DEFAULT_FOV_DEG: f32 = 20.0;
pub const FOCUS_FOV_DEG: f32 = 45.0;

// Per-second rate of the first-order low-pass applied to the camera pose.
pub const SMOOTHING_PER_SEC: f32 = 5.0;

// Input sensitivity
pub const DRAG_SENSITIVITY: f32 = 1.0; // orbit radians per (pixel / smallest viewport side)
pub const PAN_SENSITIVITY: f32 = 0.01; // world units per dragged pixel
pub const ZOOM_SENSITIVITY: f32 = 0.01; // radius units per normalized wheel pixel

// Clamp slack for presets derived from a mesh (`set_preset_from_mesh`)
pub const PRESET_TARGET_SLACK: f32 = 0.12; // target half-range, fraction of radius
pub const PRESET_RADIUS_SLACK: f32 = 0.08; // radius range, fraction of radius
pub const PRESET_ANGLE_SLACK: f32 = 0.06; // polar/azimuth half-range, radians

// Fade request sent to the host on every transition
pub const FADE_DURATION_SEC: f32 = 0.6;
pub const FADE_OPACITY_FOCUSED: f32 = 0.15;
pub const FADE_OPACITY_DEFAULT: f32 = 1.0;

// Hover tints (values above 1.0 brighten a baked texture)
pub const TINT_NORMAL: [f32; 3] = [1.0, 1.0, 1.0];
pub const TINT_HOVER: [f32; 3] = [1.6, 1.65, 1.85];
pub const REVEAL_TINT: [f32; 3] = [0.53, 0.67, 1.0];
pub const REVEAL_OPACITY: f32 = 0.2;

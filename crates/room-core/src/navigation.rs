use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

use crate::camera::{Camera, Viewport};
use crate::constants::{
    DEFAULT_FOV_DEG, DRAG_SENSITIVITY, FADE_DURATION_SEC, FADE_OPACITY_DEFAULT,
    FADE_OPACITY_FOCUSED, FOCUS_FOV_DEG, PAN_SENSITIVITY, PRESET_ANGLE_SLACK, PRESET_RADIUS_SLACK,
    PRESET_TARGET_SLACK, SMOOTHING_PER_SEC, ZOOM_SENSITIVITY,
};
use crate::mesh::Mesh;
use crate::preset::{
    builtin_presets, default_preset, ConfigError, Range, ViewLimits, ViewPreset, DEFAULT_VIEW,
};
use crate::spherical::{smooth_toward, Spherical};

/// Single-slot observer notified with the new state name after a transition.
pub type StateObserver = Box<dyn FnMut(&str)>;

/// Optional hook fired on every transition with `(target_opacity,
/// duration_sec)` so the host can fade an obstructing scene object. The tween
/// itself belongs to the host.
pub type FadeHook = Box<dyn FnMut(f32, f32)>;

/// A pointer press as reported by the host input layer. Button ids follow the
/// web convention: 0 primary, 1 middle, 2 secondary.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerPress {
    pub x: f32,
    pub y: f32,
    pub button: u8,
    pub ctrl: bool,
    pub shift: bool,
}

/// Drag deltas accumulated between frames. `previous` is the moving anchor so
/// the accumulator holds the total movement since the last consumed frame,
/// not since the press.
struct DragState {
    delta: Vec2,
    previous: Vec2,
    held: bool,
    alternative: bool,
}

/// Live camera pose: the integration target mutated by input, and the
/// low-pass-filtered value actually applied to the camera.
struct LiveView {
    spherical: Spherical,
    spherical_smoothed: Spherical,
    target: Vec3,
    target_smoothed: Vec3,
    limits: ViewLimits,
}

/// Camera navigation state machine with smoothed orbit control.
///
/// States are the preset names: `default` plus one per hotspot. Input events
/// only mutate accumulators; all camera math happens in [`Navigation::update`]
/// once per animation frame.
pub struct Navigation {
    view_state: String,
    presets: FnvHashMap<String, ViewPreset>,
    view: LiveView,
    drag: DragState,
    zoom_delta: f32,
    fovy: f32,
    observer: Option<StateObserver>,
    fade: Option<FadeHook>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    /// Navigation seeded with the built-in presets, starting in `default`.
    pub fn new() -> Self {
        let mut presets = FnvHashMap::default();
        for preset in builtin_presets() {
            presets.insert(preset.name.clone(), preset);
        }
        let home = default_preset();
        let view = LiveView {
            spherical: home.spherical,
            spherical_smoothed: home.spherical,
            target: home.target,
            target_smoothed: home.target,
            limits: home.limits,
        };
        Self {
            view_state: DEFAULT_VIEW.to_string(),
            presets,
            view,
            drag: DragState {
                delta: Vec2::ZERO,
                previous: Vec2::ZERO,
                held: false,
                alternative: false,
            },
            zoom_delta: 0.0,
            fovy: DEFAULT_FOV_DEG.to_radians(),
            observer: None,
            fade: None,
        }
    }

    pub fn view_state(&self) -> &str {
        &self.view_state
    }

    pub fn preset(&self, name: &str) -> Option<&ViewPreset> {
        self.presets.get(name)
    }

    /// Integration-target pose (pre-smoothing).
    pub fn spherical(&self) -> Spherical {
        self.view.spherical
    }

    pub fn spherical_smoothed(&self) -> Spherical {
        self.view.spherical_smoothed
    }

    pub fn target_point(&self) -> Vec3 {
        self.view.target
    }

    pub fn target_point_smoothed(&self) -> Vec3 {
        self.view.target_smoothed
    }

    pub fn limits(&self) -> &ViewLimits {
        &self.view.limits
    }

    pub fn set_state_observer<F: FnMut(&str) + 'static>(&mut self, observer: F) {
        self.observer = Some(Box::new(observer));
    }

    pub fn set_fade_hook<F: FnMut(f32, f32) + 'static>(&mut self, hook: F) {
        self.fade = Some(Box::new(hook));
    }

    /// Register or replace a preset after validating its clamp ranges.
    pub fn register_preset(&mut self, preset: ViewPreset) -> Result<(), ConfigError> {
        preset.validate()?;
        self.presets.insert(preset.name.clone(), preset);
        Ok(())
    }

    /// Transition to the named view. A repeat of the current state is a
    /// no-op. Unknown names still change the state label but leave the camera
    /// pose untouched, so hotspots can be wired before their presets exist.
    pub fn set_view_state(&mut self, name: &str) {
        if self.view_state == name {
            return;
        }
        self.view_state = name.to_string();
        if let Some(preset) = self.presets.get(name) {
            self.view.spherical = preset.spherical;
            self.view.target = preset.target;
            self.view.limits = preset.limits;
        }

        let focused = name != DEFAULT_VIEW;
        self.fovy = if focused {
            FOCUS_FOV_DEG.to_radians()
        } else {
            DEFAULT_FOV_DEG.to_radians()
        };
        if let Some(fade) = self.fade.as_mut() {
            let opacity = if focused {
                FADE_OPACITY_FOCUSED
            } else {
                FADE_OPACITY_DEFAULT
            };
            fade(opacity, FADE_DURATION_SEC);
        }
        log::info!("[view] -> {name}");
        if let Some(observer) = self.observer.as_mut() {
            observer(name);
        }
    }

    pub fn go_to_default(&mut self) {
        self.set_view_state(DEFAULT_VIEW);
    }

    /// Derive a locked preset for a flat frontal shot of `mesh` at the given
    /// distance and register it under `name`.
    ///
    /// The mesh centroid becomes the target; the camera sits along the first
    /// triangle's face normal, flipped toward the side the default camera
    /// sees. Clamp ranges pin the view tightly around that pose. A mesh
    /// without usable geometry is ignored.
    pub fn set_preset_from_mesh(&mut self, name: &str, mesh: &Mesh, radius: f32) {
        if radius <= 0.0 {
            log::warn!("[view] preset `{name}`: non-positive radius {radius}");
            return;
        }
        let (centroid, mut normal) = match (mesh.world_centroid(), mesh.face_normal_world()) {
            (Some(c), Some(n)) => (c, n),
            _ => {
                log::warn!("[view] preset `{name}`: mesh has no usable geometry");
                return;
            }
        };
        let default_cam = match self.presets.get(DEFAULT_VIEW) {
            Some(p) => p.spherical.to_vec3() + p.target,
            None => return,
        };
        if normal.dot(default_cam - centroid) < 0.0 {
            normal = -normal;
        }

        let spherical = Spherical::from_vec3(normal * radius);
        let slack = radius * PRESET_TARGET_SLACK;
        let limits = ViewLimits {
            radius: Range::new(
                radius * (1.0 - PRESET_RADIUS_SLACK),
                radius * (1.0 + PRESET_RADIUS_SLACK),
            ),
            phi: Range::new(
                spherical.phi - PRESET_ANGLE_SLACK,
                spherical.phi + PRESET_ANGLE_SLACK,
            ),
            theta: Range::new(
                spherical.theta - PRESET_ANGLE_SLACK,
                spherical.theta + PRESET_ANGLE_SLACK,
            ),
            target_x: Range::new(centroid.x - slack, centroid.x + slack),
            target_y: Range::new(centroid.y - slack, centroid.y + slack),
            target_z: Range::new(centroid.z - slack, centroid.z + slack),
        };
        self.presets.insert(
            name.to_string(),
            ViewPreset {
                name: name.to_string(),
                spherical,
                target: centroid,
                limits,
                allow_drag: false,
                allow_zoom: false,
            },
        );
    }

    /// Begin a drag. Middle/secondary button or a held modifier latches the
    /// alternative (pan) mode for the whole gesture.
    pub fn pointer_down(&mut self, press: PointerPress) {
        self.drag.alternative =
            press.button == 1 || press.button == 2 || press.ctrl || press.shift;
        self.begin_drag(press.x, press.y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.move_drag(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.drag.held = false;
    }

    /// Begin a touch drag; more than one touch point latches pan mode. Only
    /// the primary touch steers.
    pub fn touch_start(&mut self, touches: &[(f32, f32)]) {
        let Some(&(x, y)) = touches.first() else {
            return;
        };
        self.drag.alternative = touches.len() > 1;
        self.begin_drag(x, y);
    }

    pub fn touch_move(&mut self, touches: &[(f32, f32)]) {
        if let Some(&(x, y)) = touches.first() {
            self.move_drag(x, y);
        }
    }

    pub fn touch_end(&mut self) {
        self.drag.held = false;
    }

    /// Accumulate a normalized vertical wheel delta, consumed next frame.
    pub fn wheel(&mut self, delta: f32) {
        self.zoom_delta += delta;
    }

    fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag.previous = Vec2::new(x, y);
        self.drag.held = true;
    }

    fn move_drag(&mut self, x: f32, y: f32) {
        if !self.drag.held {
            return;
        }
        let current = Vec2::new(x, y);
        self.drag.delta += current - self.drag.previous;
        self.drag.previous = current;
    }

    /// Consume the accumulated input, clamp the target pose into the current
    /// preset's limits, advance the smoothed pose, and write the camera.
    ///
    /// Call exactly once per animation frame. Synchronous, allocation-free.
    pub fn update(&mut self, dt_sec: f32, viewport: Viewport, camera: &mut Camera) {
        let (allow_drag, allow_zoom) = self
            .presets
            .get(&self.view_state)
            .map(|p| (p.allow_drag, p.allow_zoom))
            .unwrap_or((false, false));

        if allow_zoom {
            self.view.spherical.radius += self.zoom_delta * ZOOM_SENSITIVITY;
        }
        self.view.spherical.radius = self.view.limits.radius.clamp(self.view.spherical.radius);

        // Drag clamps apply only to the axes the active mode moves; a preset
        // pose applied by a transition is taken as-is.
        if allow_drag {
            if self.drag.alternative {
                self.pan(camera);
                let limits = &self.view.limits;
                self.view.target.x = limits.target_x.clamp(self.view.target.x);
                self.view.target.y = limits.target_y.clamp(self.view.target.y);
                self.view.target.z = limits.target_z.clamp(self.view.target.z);
            } else {
                let scale = DRAG_SENSITIVITY / viewport.smallest_side();
                self.view.spherical.theta -= self.drag.delta.x * scale;
                self.view.spherical.phi -= self.drag.delta.y * scale;
                let limits = &self.view.limits;
                self.view.spherical.phi = limits.phi.clamp(self.view.spherical.phi);
                self.view.spherical.theta = limits.theta.clamp(self.view.spherical.theta);
            }
        }

        self.drag.delta = Vec2::ZERO;
        self.zoom_delta = 0.0;

        let s = &mut self.view;
        s.spherical_smoothed.radius = smooth_toward(
            s.spherical_smoothed.radius,
            s.spherical.radius,
            SMOOTHING_PER_SEC,
            dt_sec,
        );
        s.spherical_smoothed.phi = smooth_toward(
            s.spherical_smoothed.phi,
            s.spherical.phi,
            SMOOTHING_PER_SEC,
            dt_sec,
        );
        s.spherical_smoothed.theta = smooth_toward(
            s.spherical_smoothed.theta,
            s.spherical.theta,
            SMOOTHING_PER_SEC,
            dt_sec,
        );
        s.target_smoothed.x =
            smooth_toward(s.target_smoothed.x, s.target.x, SMOOTHING_PER_SEC, dt_sec);
        s.target_smoothed.y =
            smooth_toward(s.target_smoothed.y, s.target.y, SMOOTHING_PER_SEC, dt_sec);
        s.target_smoothed.z =
            smooth_toward(s.target_smoothed.z, s.target.z, SMOOTHING_PER_SEC, dt_sec);

        camera.eye = s.spherical_smoothed.to_vec3() + s.target_smoothed;
        camera.target = s.target_smoothed;
        camera.up = Vec3::Y;
        camera.aspect = viewport.aspect();
        camera.fovy_radians = self.fovy;
    }

    /// Translate the target point along the camera-local up/right axes.
    fn pan(&mut self, camera: &Camera) {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.view.target += up * (self.drag.delta.y * PAN_SENSITIVITY);
        self.view.target -= right * (self.drag.delta.x * PAN_SENSITIVITY);
    }
}

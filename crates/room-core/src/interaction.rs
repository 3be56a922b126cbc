use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::camera::{Camera, Viewport};
use crate::constants::{REVEAL_OPACITY, REVEAL_TINT, TINT_HOVER, TINT_NORMAL};
use crate::mesh::{Mesh, MeshId};
use crate::navigation::Navigation;
use crate::preset::DEFAULT_VIEW;

/// How a hotspot responds visually to hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverStyle {
    /// Visible surface whose base color brightens on hover.
    Tint,
    /// Invisible proxy plane revealed with a faint blue wash on hover,
    /// fully transparent otherwise.
    Reveal,
}

/// Material override the host applies to a hotspot mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverVisual {
    pub color: [f32; 3],
    pub opacity: f32,
}

/// Hover visual for a style in the given hover state.
pub fn hover_visual(style: HoverStyle, hovered: bool) -> HoverVisual {
    match style {
        HoverStyle::Tint => HoverVisual {
            color: if hovered { TINT_HOVER } else { TINT_NORMAL },
            opacity: 1.0,
        },
        HoverStyle::Reveal => HoverVisual {
            color: if hovered { REVEAL_TINT } else { TINT_NORMAL },
            opacity: if hovered { REVEAL_OPACITY } else { 0.0 },
        },
    }
}

/// Cursor affordance the host should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

/// One interactive surface: pick geometry, the view state a click leads to,
/// and its hover style.
#[derive(Clone, Debug)]
pub struct Hotspot {
    pub mesh: Mesh,
    pub state: String,
    pub style: HoverStyle,
}

/// What a press did, so the host can decide whether to suppress the event's
/// default behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Locked onto a hotspot view.
    Focused(String),
    /// Clicked empty space while locked; went back to `default`.
    Released,
    /// No transition.
    Ignored,
}

impl ClickOutcome {
    /// True when the host should prevent the event's default behavior
    /// (text selection and the like).
    pub fn consumed(&self) -> bool {
        matches!(self, ClickOutcome::Focused(_))
    }
}

/// Pointer-to-hotspot hit testing, hover tracking, and transition gating.
///
/// Holds the mesh-to-state registry; clicks are routed into [`Navigation`]
/// according to the gating rule: a hotspot click only locks from `default`,
/// and a click on empty space only releases a locked view. Jumping directly
/// between two locked views is deliberately impossible.
pub struct Interaction {
    hotspots: SmallVec<[Hotspot; 4]>,
    states: FnvHashMap<MeshId, String>,
    hovered: Option<MeshId>,
    cursor: CursorHint,
    active: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction {
    pub fn new() -> Self {
        Self {
            hotspots: SmallVec::new(),
            states: FnvHashMap::default(),
            hovered: None,
            cursor: CursorHint::Default,
            active: true,
        }
    }

    /// Replace the hotspot set wholesale. Stale hover state is dropped.
    pub fn set_hotspots(&mut self, hotspots: Vec<Hotspot>) {
        self.states = hotspots
            .iter()
            .map(|h| (h.mesh.id, h.state.clone()))
            .collect();
        self.hotspots = SmallVec::from_vec(hotspots);
        self.hovered = None;
        self.cursor = CursorHint::Default;
    }

    pub fn hovered(&self) -> Option<MeshId> {
        self.hovered
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Hover visual for a registered hotspot mesh, reflecting whether it is
    /// the (single) currently hovered one.
    pub fn hover_visual_for(&self, id: MeshId) -> Option<HoverVisual> {
        self.hotspots
            .iter()
            .find(|h| h.mesh.id == id)
            .map(|h| hover_visual(h.style, self.hovered == Some(id)))
    }

    /// Nearest hotspot under the pointer, if any.
    fn hit_test(&self, x: f32, y: f32, viewport: Viewport, camera: &Camera) -> Option<MeshId> {
        if self.hotspots.is_empty() {
            return None;
        }
        let (ndc_x, ndc_y) = viewport.ndc(x, y);
        let (origin, dir) = camera.ndc_ray(ndc_x, ndc_y);
        let mut best: Option<(MeshId, f32)> = None;
        for h in &self.hotspots {
            if let Some(t) = h.mesh.raycast(origin, dir) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((h.mesh.id, t)),
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// View state name of the hotspot under the pointer, if any.
    pub fn hit_state(&self, x: f32, y: f32, viewport: Viewport, camera: &Camera) -> Option<&str> {
        let id = self.hit_test(x, y, viewport, camera)?;
        self.states.get(&id).map(String::as_str)
    }

    /// Track hover and the cursor affordance. The pointer affordance only
    /// shows in `default`: while locked, clicking a hotspot does nothing, so
    /// it must not advertise itself.
    pub fn pointer_move(
        &mut self,
        x: f32,
        y: f32,
        viewport: Viewport,
        camera: &Camera,
        navigation: &Navigation,
    ) {
        if !self.active {
            return;
        }
        if self.hotspots.is_empty() {
            self.cursor = CursorHint::Default;
            self.hovered = None;
            return;
        }
        let hit = self.hit_test(x, y, viewport, camera);
        let show_pointer = hit.is_some() && navigation.view_state() == DEFAULT_VIEW;
        self.cursor = if show_pointer {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        self.hovered = hit;
    }

    /// The pointer left the render surface.
    pub fn pointer_leave(&mut self) {
        self.cursor = CursorHint::Default;
        self.hovered = None;
    }

    /// Resolve a press: lock onto a hit hotspot from `default`, or release a
    /// locked view on a miss.
    pub fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        viewport: Viewport,
        camera: &Camera,
        navigation: &mut Navigation,
    ) -> ClickOutcome {
        if !self.active || self.hotspots.is_empty() {
            return ClickOutcome::Ignored;
        }
        let hit = self
            .hit_state(x, y, viewport, camera)
            .map(str::to_string);
        match hit {
            Some(state) if navigation.view_state() == DEFAULT_VIEW => {
                log::info!("[pick] focus {state}");
                navigation.set_view_state(&state);
                ClickOutcome::Focused(state)
            }
            None if navigation.view_state() != DEFAULT_VIEW => {
                log::info!("[pick] release to {DEFAULT_VIEW}");
                navigation.go_to_default();
                ClickOutcome::Released
            }
            _ => ClickOutcome::Ignored,
        }
    }

    /// Tap handling. Multi-touch gestures belong to `Navigation`'s pan mode
    /// and are never treated as taps.
    pub fn touch_start(
        &mut self,
        touches: &[(f32, f32)],
        viewport: Viewport,
        camera: &Camera,
        navigation: &mut Navigation,
    ) -> ClickOutcome {
        let [(x, y)] = touches else {
            return ClickOutcome::Ignored;
        };
        self.pointer_down(*x, *y, viewport, camera, navigation)
    }

    /// Touch move only refreshes the cursor affordance; hover visuals stay
    /// pointer-driven.
    pub fn touch_move(
        &mut self,
        touches: &[(f32, f32)],
        viewport: Viewport,
        camera: &Camera,
        navigation: &Navigation,
    ) {
        if !self.active || self.hotspots.is_empty() {
            return;
        }
        let Some(&(x, y)) = touches.first() else {
            return;
        };
        let hit = self.hit_test(x, y, viewport, camera);
        self.cursor = if hit.is_some() && navigation.view_state() == DEFAULT_VIEW {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
    }

    /// Disable the component: clears hover and cursor state and makes every
    /// subsequent event a no-op. The host detaches its listeners alongside.
    pub fn destroy(&mut self) {
        self.active = false;
        self.hovered = None;
        self.cursor = CursorHint::Default;
    }
}

#![cfg(target_arch = "wasm32")]
//! Browser host for the room scene: wires canvas input events into the core
//! and drives the animation-frame loop. Rendering, asset loading, and the
//! settings API live in their own layers.

mod dom;
mod events;
mod frame;
mod scene;

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use room_core::{Camera, Interaction, Navigation};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the event handlers and the frame loop share.
pub(crate) struct App {
    pub navigation: Navigation,
    pub interaction: Interaction,
    pub camera: Camera,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("room-web starting");

    if let Err(e) = init() {
        log::error!("init error: {e:?}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas_el = document
        .get_element_by_id("room-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #room-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    dom::wire_canvas_resize(&canvas);

    let mut navigation = Navigation::new();
    navigation.set_state_observer(|state| log::info!("[ui] view state -> {state}"));
    let hotspots = scene::build_hotspots();
    scene::seed_presets(&mut navigation, &hotspots);

    let mut interaction = Interaction::new();
    interaction.set_hotspots(hotspots);

    let app = Rc::new(RefCell::new(App {
        navigation,
        interaction,
        camera: Camera::default(),
    }));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
    });
    frame::start_loop(frame::FrameContext {
        canvas,
        app,
        last_instant: Instant::now(),
    });
    Ok(())
}

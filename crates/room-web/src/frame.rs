use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use room_core::{CursorHint, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::App;

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<App>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let viewport = Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32);
        let mut app = self.app.borrow_mut();
        let App {
            navigation,
            interaction,
            camera,
        } = &mut *app;

        navigation.update(dt, viewport, camera);

        let cursor = match interaction.cursor() {
            CursorHint::Pointer => "pointer",
            CursorHint::Default => "auto",
        };
        dom::set_cursor(&self.canvas, cursor);
    }
}

pub fn start_loop(mut ctx: FrameContext) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

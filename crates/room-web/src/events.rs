use std::cell::RefCell;
use std::rc::Rc;

use room_core::{PointerPress, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::App;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<App>>,
}

fn viewport_of(canvas: &web::HtmlCanvasElement) -> Viewport {
    Viewport::new(canvas.width() as f32, canvas.height() as f32)
}

fn touch_points(canvas: &web::HtmlCanvasElement, ev: &web::TouchEvent) -> Vec<(f32, f32)> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| dom::canvas_px(canvas, t.client_x() as f32, t.client_y() as f32))
        .collect()
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_mouseleave(&w);
    wire_wheel(&w);
    wire_touchstart(&w);
    wire_touchmove(&w);
    wire_touchend(&w);
    wire_contextmenu(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y) = dom::canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        let viewport = viewport_of(&w.canvas);
        let mut app = w.app.borrow_mut();
        let App {
            navigation,
            interaction,
            camera,
        } = &mut *app;

        let outcome = interaction.pointer_down(x, y, viewport, camera, navigation);
        if outcome.consumed() {
            ev.prevent_default();
        } else {
            // Not a hotspot click: the press starts a drag gesture instead.
            navigation.pointer_down(PointerPress {
                x,
                y,
                button: ev.button().max(0) as u8,
                ctrl: ev.ctrl_key(),
                shift: ev.shift_key(),
            });
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y) = dom::canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        let viewport = viewport_of(&w.canvas);
        let mut app = w.app.borrow_mut();
        let App {
            navigation,
            interaction,
            camera,
        } = &mut *app;

        navigation.pointer_move(x, y);
        interaction.pointer_move(x, y, viewport, camera, navigation);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.app.borrow_mut().navigation.pointer_up();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_mouseleave(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        w.app.borrow_mut().interaction.pointer_leave();
        dom::set_cursor(&w.canvas, "auto");
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        // Normalize to pixel-ish units across delta modes.
        let delta = match ev.delta_mode() {
            web::WheelEvent::DOM_DELTA_LINE => ev.delta_y() * 16.0,
            web::WheelEvent::DOM_DELTA_PAGE => ev.delta_y() * 100.0,
            _ => ev.delta_y(),
        };
        w.app.borrow_mut().navigation.wheel(delta as f32);
    }) as Box<dyn FnMut(_)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

fn wire_touchstart(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
        let pts = touch_points(&w.canvas, &ev);
        let viewport = viewport_of(&w.canvas);
        let mut app = w.app.borrow_mut();
        let App {
            navigation,
            interaction,
            camera,
        } = &mut *app;

        let outcome = interaction.touch_start(&pts, viewport, camera, navigation);
        if !outcome.consumed() {
            navigation.touch_start(&pts);
        }
    }) as Box<dyn FnMut(_)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

fn wire_touchmove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
        let pts = touch_points(&w.canvas, &ev);
        let viewport = viewport_of(&w.canvas);
        let mut app = w.app.borrow_mut();
        let App {
            navigation,
            interaction,
            camera,
        } = &mut *app;

        navigation.touch_move(&pts);
        interaction.touch_move(&pts, viewport, camera, navigation);
    }) as Box<dyn FnMut(_)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

fn wire_touchend(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
        w.app.borrow_mut().navigation.touch_end();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_contextmenu(w: &InputWiring) {
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}

use crate::dom;
use crate::input;
use crate::SharedEngine;
use std::rc::Rc;
use web_sys as web;

/// Both view canvases share one drag session: a press on either canvas is
/// hit-tested against every view, and moves are read in the pinned view.
#[derive(Clone)]
pub struct PointerWiring {
    /// In the engine's view order.
    pub canvases: Rc<Vec<web::HtmlCanvasElement>>,
    pub engine: SharedEngine,
}

pub fn wire_pointer_handlers(w: &PointerWiring) {
    for canvas in w.canvases.iter() {
        wire_pointerdown(w, canvas);
        wire_pointermove(w, canvas);
        wire_release(w, canvas, "pointerup");
        wire_release(w, canvas, "pointerleave");
    }
}

fn wire_pointerdown(w: &PointerWiring, canvas: &web::HtmlCanvasElement) {
    let w = w.clone();
    dom::add_listener::<web::PointerEvent>(canvas, "pointerdown", move |ev| {
        let points = input::pointer_samples(&ev, &w.canvases);
        if w.engine.borrow_mut().pointer_down(&points).is_some() {
            ev.prevent_default();
        }
    });
}

fn wire_pointermove(w: &PointerWiring, canvas: &web::HtmlCanvasElement) {
    let w = w.clone();
    dom::add_listener::<web::PointerEvent>(canvas, "pointermove", move |ev| {
        let mut eng = w.engine.borrow_mut();
        if eng.drag_state() == stage_core::DragState::Idle {
            return;
        }
        let points = input::pointer_samples(&ev, &w.canvases);
        eng.pointer_move(&points);
    });
}

fn wire_release(w: &PointerWiring, canvas: &web::HtmlCanvasElement, event: &str) {
    let w = w.clone();
    dom::add_listener::<web::PointerEvent>(canvas, event, move |_| {
        w.engine.borrow_mut().pointer_up();
    });
}

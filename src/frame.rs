use crate::controls::Controls;
use crate::render::{self, ViewCanvas};
use crate::SharedEngine;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: SharedEngine,
    pub views: Vec<ViewCanvas>,
    pub controls: Rc<Controls>,
    /// Generation and first frame of the ramp being timed.
    pub ramp_started: Option<(u64, Instant)>,
}

impl FrameContext {
    pub fn new(engine: SharedEngine, views: Vec<ViewCanvas>, controls: Rc<Controls>) -> Self {
        Self {
            engine,
            views,
            controls,
            ramp_started: None,
        }
    }

    /// One animation frame: advance any preset ramp by a step, then repaint if
    /// something changed.
    pub fn frame(&mut self) {
        let mut eng = self.engine.borrow_mut();

        if eng.is_ramping() {
            let generation = eng.ramp_generation();
            if self.ramp_started.map(|(g, _)| g) != Some(generation) {
                self.ramp_started = Some((generation, Instant::now()));
            }
        }
        if let Some(tick) = eng.tick() {
            self.controls.sync_source_sliders(&tick.gains);
            if tick.finished {
                if let Some((_, start)) = self.ramp_started.take() {
                    log::info!("[ramp] finished after {} ms", start.elapsed().as_millis());
                }
            }
        }

        if eng.take_redraw() {
            let frames = eng.frames();
            drop(eng);
            render::draw_all(&self.views, &frames);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

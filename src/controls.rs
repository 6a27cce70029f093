//! Volume sliders, preset buttons, ramp duration field and the play button.

use crate::audio::{MediaInput, WebPlaybackContext};
use crate::dom;
use crate::keys::{parse_ramp_ms, parse_slider_value};
use crate::SharedEngine;
use stage_core::{PlaybackToggle, Preset};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const CONTROLS_ID: &str = "controls";
const RAMP_DURATION_ID: &str = "ramp-duration";
const PRESET_SELECTOR: &str = ".preset-btn";
const PLAY_SELECTOR: &str = "button[data-playing]";

pub struct Controls {
    pub source_sliders: Vec<web::HtmlInputElement>,
    pub bus_sliders: Vec<web::HtmlInputElement>,
    ramp_duration: Option<web::HtmlInputElement>,
}

impl Controls {
    /// Ramp length currently typed into the duration field.
    pub fn ramp_duration_ms(&self) -> f32 {
        parse_ramp_ms(
            &self
                .ramp_duration
                .as_ref()
                .map(|i| i.value())
                .unwrap_or_default(),
        )
    }

    /// Move the source sliders to the engine's live gains.
    pub fn sync_source_sliders(&self, gains: &[f32]) {
        for (slider, g) in self.source_sliders.iter().zip(gains) {
            slider.set_value(&g.to_string());
        }
    }
}

fn create_slider(
    document: &web::Document,
    container: &web::Element,
    label_text: &str,
    max: f32,
    value: f32,
) -> anyhow::Result<web::HtmlInputElement> {
    let js = |e| anyhow::anyhow!("{:?}", e);
    let row = document.create_element("div").map_err(js)?;
    let label = document.create_element("label").map_err(js)?;
    label.set_text_content(Some(label_text));
    let slider = document
        .create_element("input")
        .map_err(js)?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    slider.set_type("range");
    slider.set_min("0");
    slider.set_max(&max.to_string());
    slider.set_step("0.01");
    slider.set_value(&value.to_string());
    _ = row.append_child(&label);
    _ = row.append_child(&slider);
    _ = container.append_child(&row);
    Ok(slider)
}

/// Build one slider per source and per bus under `#controls` and wire them to
/// the engine.
pub fn build_controls(document: &web::Document, engine: &SharedEngine) -> anyhow::Result<Controls> {
    let container: web::Element = dom::element_by_id(document, CONTROLS_ID)?;
    let mut source_sliders = Vec::new();
    let mut bus_sliders = Vec::new();
    {
        let eng = engine.borrow();
        for s in eng.scene().sources() {
            let label = format!("{} Volume", s.label);
            source_sliders.push(create_slider(document, &container, &label, 1.0, s.gain)?);
        }
        for b in eng.scene().buses() {
            let label = format!("{} Master Volume", b.name);
            bus_sliders.push(create_slider(document, &container, &label, b.max_gain, b.gain)?);
        }
    }

    for (i, slider) in source_sliders.iter().enumerate() {
        let engine = engine.clone();
        let input = slider.clone();
        dom::add_listener::<web::Event>(slider, "input", move |_| {
            if let Some(v) = parse_slider_value(&input.value()) {
                engine.borrow_mut().set_source_gain(i, v);
            }
        });
    }
    for (b, slider) in bus_sliders.iter().enumerate() {
        let engine = engine.clone();
        let input = slider.clone();
        dom::add_listener::<web::Event>(slider, "input", move |_| {
            if let Some(v) = parse_slider_value(&input.value()) {
                engine.borrow_mut().set_bus_gain(b, v);
            }
        });
    }

    let ramp_duration = dom::element_by_id::<web::HtmlInputElement>(document, RAMP_DURATION_ID)
        .map_err(|e| log::warn!("[controls] {}; using default ramp length", e))
        .ok();

    Ok(Controls {
        source_sliders,
        bus_sliders,
        ramp_duration,
    })
}

/// Preset buttons carry their levels in `data-preset`. Clicking one starts a
/// ramp that replaces any ramp in flight.
pub fn wire_presets(document: &web::Document, engine: &SharedEngine, controls: &Rc<Controls>) {
    let buttons: Vec<web::HtmlElement> = dom::query_all(document, PRESET_SELECTOR);
    for (slot, button) in buttons.iter().enumerate() {
        let raw = button.get_attribute("data-preset").unwrap_or_default();
        let name = button.text_content().unwrap_or_else(|| format!("preset {}", slot + 1));
        let preset = match Preset::parse(name, &raw) {
            Ok(p) => p,
            Err(e) => {
                log::error!("[controls] preset button {}: {}", slot + 1, e);
                continue;
            }
        };
        let engine = engine.clone();
        let controls = controls.clone();
        dom::add_click_listener(button, move || {
            let ms = controls.ramp_duration_ms();
            log::info!("[ramp] preset {:?} over {} ms", preset.name, ms);
            let applied = engine.borrow_mut().apply_preset(&preset.values, ms);
            if let Some(tick) = applied {
                controls.sync_source_sliders(&tick.gains);
            }
        });
    }
    log::info!("[controls] {} preset buttons", buttons.len());
}

pub fn wire_play_button(
    document: &web::Document,
    audio_ctx: &web::AudioContext,
    inputs: Vec<MediaInput>,
) {
    let Ok(Some(button)) = document.query_selector(PLAY_SELECTOR) else {
        log::warn!("[controls] no play button");
        return;
    };
    let ctx = Rc::new(RefCell::new(WebPlaybackContext(audio_ctx.clone())));
    let inputs = Rc::new(RefCell::new(inputs));
    let toggle = Rc::new(RefCell::new(PlaybackToggle::new()));
    let target = button.clone();
    dom::add_click_listener(&button, move || {
        let playing = toggle
            .borrow_mut()
            .toggle(&mut *ctx.borrow_mut(), inputs.borrow_mut().as_mut_slice());
        _ = target.set_attribute("data-playing", if playing { "true" } else { "false" });
    });
}

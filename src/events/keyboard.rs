use crate::dom;
use crate::keys::{input_captures_digits, preset_slot_for_key};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Digit keys press the matching preset button, so a shortcut behaves exactly
/// like a click (including reading the ramp duration field).
pub fn handle_global_keydown(ev: &web::KeyboardEvent, document: &web::Document) {
    let Some(slot) = preset_slot_for_key(&ev.key()) else {
        return;
    };
    // typing a duration into the number field must not fire presets
    if let Some(input) = document
        .active_element()
        .and_then(|a| a.dyn_into::<web::HtmlInputElement>().ok())
    {
        if input_captures_digits(&input.type_()) {
            return;
        }
    }
    let buttons: Vec<web::HtmlElement> = dom::query_all(document, ".preset-btn");
    if let Some(button) = buttons.get(slot) {
        button.click();
    }
}

pub fn wire_global_keydown(document: &web::Document) {
    if let Some(window) = web::window() {
        let doc = document.clone();
        dom::add_listener::<web::KeyboardEvent>(&window, "keydown", move |ev| {
            handle_global_keydown(&ev, &doc);
        });
    }
}

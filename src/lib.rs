#![cfg(target_arch = "wasm32")]
use stage_core::{Engine, SceneConfig, ViewPlane};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod controls;
mod dom;
mod events;
mod frame;
mod input;
mod keys;
mod render;

use audio::{MediaInput, WebAudioBackend};
use render::ViewCanvas;

pub(crate) type SharedEngine = Rc<RefCell<Engine<WebAudioBackend>>>;

/// Canvas ids in engine view order.
const VIEW_CANVASES: [(&str, ViewPlane); 2] = [
    ("audioVisualizerTop", ViewPlane::Top),
    ("audioVisualizerFront", ViewPlane::Front),
];

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("stage-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Look up the `<audio>` element for every configured input, by id.
fn media_inputs(
    document: &web::Document,
    audio_ctx: &web::AudioContext,
    config: &SceneConfig,
) -> anyhow::Result<(Vec<MediaInput>, Vec<web::MediaElementAudioSourceNode>)> {
    let mut inputs = Vec::with_capacity(config.inputs.len());
    let mut nodes = Vec::with_capacity(config.inputs.len());
    for input in &config.inputs {
        let element: web::HtmlMediaElement = dom::element_by_id(document, &input.name)?;
        let node = audio_ctx
            .create_media_element_source(&element)
            .map_err(|e| anyhow::anyhow!("#{} media source: {:?}", input.name, e))?;
        nodes.push(node);
        inputs.push(MediaInput { element });
    }
    Ok((inputs, nodes))
}

fn wire_resize(
    window: &web::Window,
    engine: &SharedEngine,
    views: &[(ViewPlane, web::HtmlCanvasElement)],
) {
    let engine = engine.clone();
    let win = window.clone();
    let views = views.to_vec();
    dom::add_listener::<web::Event>(window, "resize", move |_| {
        let mut eng = engine.borrow_mut();
        eng.resize(dom::viewport_size(&win));
        for (plane, canvas) in &views {
            let size = glam::Vec2::new(canvas.width() as f32, canvas.height() as f32);
            eng.resize_view(*plane, size);
        }
    });
}

/// Fetch every effect's impulse response in the background. Sources routed
/// through a send stay silent until its buffer lands.
fn load_effects(audio_ctx: &web::AudioContext, engine: &SharedEngine, config: &SceneConfig) {
    for (i, effect) in config.effects.iter().enumerate() {
        let audio_ctx = audio_ctx.clone();
        let engine = engine.clone();
        let url = effect.impulse_url.clone();
        let name = effect.name.clone();
        spawn_local(async move {
            match audio::fetch_impulse_response(&audio_ctx, &url).await {
                Ok(buffer) => {
                    if let Err(e) = engine.borrow_mut().effect_loaded(i, &buffer) {
                        log::error!("[routing] {}: {}", name, e);
                    } else {
                        log::info!("[routing] {} impulse response loaded", name);
                    }
                }
                Err(e) => engine.borrow_mut().effect_failed(i, &e.to_string()),
            }
        });
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = SceneConfig::double_premiere();
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    audio::configure_destination(&audio_ctx);

    let (media, input_nodes) = media_inputs(&document, &audio_ctx, &config)?;
    let backend = WebAudioBackend::new(audio_ctx.clone(), input_nodes);

    let mut views = Vec::with_capacity(VIEW_CANVASES.len());
    for (id, plane) in VIEW_CANVASES {
        views.push(ViewCanvas::from_id(&document, id, plane)?);
    }
    let canvas_size = views
        .first()
        .map(|v| v.size())
        .ok_or_else(|| anyhow::anyhow!("no view canvases"))?;

    let engine: SharedEngine = Rc::new(RefCell::new(Engine::new(
        config.clone(),
        backend,
        dom::viewport_size(&window),
        canvas_size,
    )?));
    for v in &views {
        engine.borrow_mut().resize_view(v.plane, v.size());
    }

    let controls = Rc::new(controls::build_controls(&document, &engine)?);
    controls::wire_presets(&document, &engine, &controls);
    controls::wire_play_button(&document, &audio_ctx, media);
    events::wire_global_keydown(&document);

    let canvases: Vec<web::HtmlCanvasElement> = views.iter().map(|v| v.canvas.clone()).collect();
    events::wire_pointer_handlers(&events::PointerWiring {
        canvases: Rc::new(canvases),
        engine: engine.clone(),
    });
    let planes: Vec<(ViewPlane, web::HtmlCanvasElement)> =
        views.iter().map(|v| (v.plane, v.canvas.clone())).collect();
    wire_resize(&window, &engine, &planes);

    load_effects(&audio_ctx, &engine, &config);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(engine, views, controls)));
    frame::start_loop(frame_ctx);
    Ok(())
}

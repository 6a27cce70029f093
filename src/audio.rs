use glam::Vec3;
use stage_core::{
    AudioBackend, DistanceModel, PlaybackContext, SpatializerParams, StageError, Transport,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn node_error(node: &'static str, e: JsValue) -> StageError {
    log::error!("{} error: {:?}", node, e);
    StageError::NodeCreation {
        node,
        reason: format!("{:?}", e),
    }
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Open the destination up to every output channel the device offers.
pub fn configure_destination(audio_ctx: &web::AudioContext) {
    let dst = audio_ctx.destination();
    dst.set_channel_count(dst.max_channel_count());
    dst.set_channel_count_mode(web::ChannelCountMode::Explicit);
    dst.set_channel_interpretation(web::ChannelInterpretation::Speakers);
    log::info!("[audio] destination channels={}", dst.channel_count());
}

/// `AudioBackend` over the browser's WebAudio graph.
pub struct WebAudioBackend {
    audio_ctx: web::AudioContext,
    inputs: Vec<web::MediaElementAudioSourceNode>,
}

impl WebAudioBackend {
    /// `inputs[i]` feeds every source configured with input `i`.
    pub fn new(
        audio_ctx: web::AudioContext,
        inputs: Vec<web::MediaElementAudioSourceNode>,
    ) -> Self {
        Self { audio_ctx, inputs }
    }
}

fn distance_model(model: DistanceModel) -> web::DistanceModelType {
    match model {
        DistanceModel::Linear => web::DistanceModelType::Linear,
        DistanceModel::Inverse => web::DistanceModelType::Inverse,
        DistanceModel::Exponential => web::DistanceModelType::Exponential,
    }
}

impl AudioBackend for WebAudioBackend {
    type Node = web::AudioNode;
    type EffectData = web::AudioBuffer;

    fn input(&mut self, input: usize) -> Result<web::AudioNode, StageError> {
        self.inputs
            .get(input)
            .map(|n| n.clone().into())
            .ok_or_else(|| StageError::InvalidConfig(format!("no media input {}", input)))
    }

    fn destination(&mut self) -> web::AudioNode {
        self.audio_ctx.destination().into()
    }

    fn create_spatializer(
        &mut self,
        params: &SpatializerParams,
        position: Vec3,
        orientation: Vec3,
    ) -> Result<web::AudioNode, StageError> {
        let panner =
            web::PannerNode::new(&self.audio_ctx).map_err(|e| node_error("PannerNode", e))?;
        panner.set_panning_model(web::PanningModelType::Hrtf);
        panner.set_distance_model(distance_model(params.distance_model));
        panner.set_ref_distance(params.ref_distance as f64);
        panner.set_max_distance(params.max_distance as f64);
        panner.set_rolloff_factor(params.rolloff_factor as f64);
        panner.set_cone_inner_angle(params.cone_inner_angle as f64);
        panner.set_cone_outer_angle(params.cone_outer_angle as f64);
        panner.set_cone_outer_gain(params.cone_outer_gain as f64);
        let node: web::AudioNode = panner.into();
        self.set_position(&node, position);
        self.set_orientation(&node, orientation);
        Ok(node)
    }

    fn create_gain(&mut self, value: f32, label: &str) -> Result<web::AudioNode, StageError> {
        match web::GainNode::new(&self.audio_ctx) {
            Ok(g) => {
                g.gain().set_value(value);
                Ok(g.into())
            }
            Err(e) => {
                log::error!("{} GainNode error: {:?}", label, e);
                Err(StageError::NodeCreation {
                    node: "GainNode",
                    reason: format!("{:?}", e),
                })
            }
        }
    }

    fn create_effect(&mut self, _effect: usize) -> Result<web::AudioNode, StageError> {
        // A convolver without a buffer outputs silence until the IR arrives.
        let reverb =
            web::ConvolverNode::new(&self.audio_ctx).map_err(|e| node_error("ConvolverNode", e))?;
        reverb.set_normalize(true);
        Ok(reverb.into())
    }

    fn connect(&mut self, from: &web::AudioNode, to: &web::AudioNode) {
        _ = from.connect_with_audio_node(to);
    }

    fn set_position(&mut self, spatializer: &web::AudioNode, position: Vec3) {
        if let Some(p) = spatializer.dyn_ref::<web::PannerNode>() {
            p.position_x().set_value(position.x);
            p.position_y().set_value(position.y);
            p.position_z().set_value(position.z);
        }
    }

    fn set_orientation(&mut self, spatializer: &web::AudioNode, orientation: Vec3) {
        if let Some(p) = spatializer.dyn_ref::<web::PannerNode>() {
            p.orientation_x().set_value(orientation.x);
            p.orientation_y().set_value(orientation.y);
            p.orientation_z().set_value(orientation.z);
        }
    }

    fn set_gain(&mut self, gain: &web::AudioNode, value: f32) {
        if let Some(g) = gain.dyn_ref::<web::GainNode>() {
            g.gain().set_value(value);
        }
    }

    #[allow(deprecated)]
    fn set_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        let listener = self.audio_ctx.listener();
        listener.set_position(position.x as f64, position.y as f64, position.z as f64);
        listener.set_orientation(
            forward.x as f64,
            forward.y as f64,
            forward.z as f64,
            up.x as f64,
            up.y as f64,
            up.z as f64,
        );
    }

    fn load_effect(&mut self, node: &web::AudioNode, data: &web::AudioBuffer) {
        if let Some(c) = node.dyn_ref::<web::ConvolverNode>() {
            c.set_buffer(Some(data));
        }
    }
}

/// Fetch and decode an impulse response.
pub async fn fetch_impulse_response(
    audio_ctx: &web::AudioContext,
    url: &str,
) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} fetching {}", resp.status(), url);
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    JsFuture::from(audio_ctx.decode_audio_data(&bytes).map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into::<web::AudioBuffer>()
        .map_err(js_err)
}

/// An `<audio>` element feeding the graph.
pub struct MediaInput {
    pub element: web::HtmlMediaElement,
}

impl Transport for MediaInput {
    fn play(&mut self) -> Result<(), StageError> {
        let promise = self
            .element
            .play()
            .map_err(|e| StageError::Playback(format!("{:?}", e)))?;
        let id = self.element.id();
        // Autoplay refusals arrive as a rejected promise.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[transport] #{} play rejected: {:?}", id, e);
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        _ = self.element.pause();
    }
}

pub struct WebPlaybackContext(pub web::AudioContext);

impl PlaybackContext for WebPlaybackContext {
    fn is_suspended(&self) -> bool {
        self.0.state() == web::AudioContextState::Suspended
    }

    fn resume(&mut self) {
        _ = self.0.resume();
    }
}

//! Signal path construction and parameter forwarding.
//!
//! Each source is wired once as
//! `input -> spatializer -> [effect send] -> source gain -> bus gain -> output`.
//! After [`RoutingGraph::build`] the topology never changes; only parameter
//! values flow through it.

use crate::config::SpatializerParams;
use crate::error::{Result, StageError};
use crate::scene::{Listener, Scene};
use glam::Vec3;

/// The audio-rendering subsystem the graph is built on (WebAudio in the
/// browser, a recorder in tests).
pub trait AudioBackend {
    /// Handle to a node living in the backend.
    type Node: Clone;
    /// Decoded processing data for an effect send (an impulse response).
    type EffectData: Clone;

    /// Node producing the audio of media input `input`.
    fn input(&mut self, input: usize) -> Result<Self::Node>;
    fn destination(&mut self) -> Self::Node;

    fn create_spatializer(
        &mut self,
        params: &SpatializerParams,
        position: Vec3,
        orientation: Vec3,
    ) -> Result<Self::Node>;
    fn create_gain(&mut self, value: f32, label: &str) -> Result<Self::Node>;
    /// An effect node that stays silent until [`AudioBackend::load_effect`].
    fn create_effect(&mut self, effect: usize) -> Result<Self::Node>;

    fn connect(&mut self, from: &Self::Node, to: &Self::Node);

    fn set_position(&mut self, spatializer: &Self::Node, position: Vec3);
    fn set_orientation(&mut self, spatializer: &Self::Node, orientation: Vec3);
    fn set_gain(&mut self, gain: &Self::Node, value: f32);
    fn set_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3);
    fn load_effect(&mut self, node: &Self::Node, data: &Self::EffectData);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectState {
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainTarget {
    Source(usize),
    Bus(usize),
}

struct SourceChain<N> {
    spatializer: N,
    effect: Option<N>,
    gain: N,
}

struct EffectSend<N> {
    // one node per routed source so per-source gains stay independent
    nodes: Vec<N>,
    state: EffectState,
}

pub struct RoutingGraph<B: AudioBackend> {
    backend: B,
    chains: Vec<SourceChain<B::Node>>,
    buses: Vec<B::Node>,
    effects: Vec<EffectSend<B::Node>>,
}

impl<B: AudioBackend> RoutingGraph<B> {
    /// Wire every source of `scene`, push the listener frame and initial
    /// parameter values. `effect_count` is the number of configured sends.
    pub fn build(
        mut backend: B,
        scene: &Scene,
        params: &SpatializerParams,
        effect_count: usize,
    ) -> Result<Self> {
        let listener = scene.listener();
        backend.set_listener(listener.position, listener.forward, listener.up);

        let destination = backend.destination();
        let mut buses = Vec::with_capacity(scene.buses().len());
        for bus in scene.buses() {
            let node = backend.create_gain(bus.gain, &bus.name)?;
            backend.connect(&node, &destination);
            buses.push(node);
        }

        let mut effects: Vec<EffectSend<B::Node>> = (0..effect_count)
            .map(|_| EffectSend {
                nodes: Vec::new(),
                state: EffectState::Loading,
            })
            .collect();

        let mut chains = Vec::with_capacity(scene.sources().len());
        for s in scene.sources() {
            let input = backend.input(s.input)?;
            let spatializer = backend.create_spatializer(params, s.position, s.orientation)?;
            let gain = backend.create_gain(s.gain, &s.label)?;
            let bus = buses.get(s.bus).ok_or_else(|| {
                StageError::InvalidConfig(format!("{} has no bus {}", s.label, s.bus))
            })?;

            backend.connect(&input, &spatializer);
            let effect = match s.effect {
                Some(e) => {
                    let send = effects.get_mut(e).ok_or(StageError::UnknownEffect(e))?;
                    let node = backend.create_effect(e)?;
                    backend.connect(&spatializer, &node);
                    backend.connect(&node, &gain);
                    send.nodes.push(node.clone());
                    Some(node)
                }
                None => {
                    backend.connect(&spatializer, &gain);
                    None
                }
            };
            backend.connect(&gain, bus);

            chains.push(SourceChain {
                spatializer,
                effect,
                gain,
            });
        }

        log::info!(
            "[routing] built {} source chains, {} buses, {} effect sends",
            chains.len(),
            buses.len(),
            effects.len()
        );
        Ok(Self {
            backend,
            chains,
            buses,
            effects,
        })
    }

    pub fn update_spatial_params(
        &mut self,
        index: usize,
        position: Vec3,
        orientation: Vec3,
    ) -> bool {
        let Some(chain) = self.chains.get(index) else {
            return false;
        };
        self.backend.set_position(&chain.spatializer, position);
        self.backend.set_orientation(&chain.spatializer, orientation);
        true
    }

    pub fn update_gain(&mut self, target: GainTarget, value: f32) -> bool {
        let node = match target {
            GainTarget::Source(i) => self.chains.get(i).map(|c| &c.gain),
            GainTarget::Bus(b) => self.buses.get(b),
        };
        match node {
            Some(n) => {
                self.backend.set_gain(n, value);
                true
            }
            None => false,
        }
    }

    pub fn update_listener(&mut self, listener: &Listener) {
        self.backend
            .set_listener(listener.position, listener.forward, listener.up);
    }

    /// Hand decoded data to every node of an effect send. Until this happens
    /// the send produces silence.
    pub fn effect_loaded(&mut self, effect: usize, data: &B::EffectData) -> Result<()> {
        let send = self
            .effects
            .get_mut(effect)
            .ok_or(StageError::UnknownEffect(effect))?;
        for node in &send.nodes {
            self.backend.load_effect(node, data);
        }
        send.state = EffectState::Ready;
        log::info!("[routing] effect send {} ready ({} nodes)", effect, send.nodes.len());
        Ok(())
    }

    /// Record a load failure; the send keeps producing silence.
    pub fn effect_failed(&mut self, effect: usize, reason: &str) {
        if let Some(send) = self.effects.get_mut(effect) {
            send.state = EffectState::Failed;
        }
        log::error!("[routing] effect send {} failed to load: {}", effect, reason);
    }

    pub fn effect_state(&self, effect: usize) -> Option<EffectState> {
        self.effects.get(effect).map(|e| e.state)
    }

    /// Whether source `index` passes through an effect send.
    pub fn has_effect(&self, index: usize) -> bool {
        self.chains
            .get(index)
            .is_some_and(|c| c.effect.is_some())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

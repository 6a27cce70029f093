// Recording audio backend shared by the host-side tests.

#![allow(dead_code)]
use glam::{Vec2, Vec3};
use stage_core::{AudioBackend, Engine, SceneConfig, SpatializerParams, StageError};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Input(usize),
    Destination,
    Spatializer,
    Gain(String),
    Effect(usize),
}

#[derive(Default)]
pub struct RecordingBackend {
    pub kinds: Vec<NodeKind>,
    pub edges: Vec<(usize, usize)>,
    pub positions: HashMap<usize, Vec3>,
    pub orientations: HashMap<usize, Vec3>,
    pub gains: HashMap<usize, f32>,
    pub loaded: Vec<(usize, String)>,
    pub listener: Option<(Vec3, Vec3, Vec3)>,
    pub fail_gain_label: Option<String>,
    pub inputs: HashMap<usize, usize>,
    pub destination: Option<usize>,
}

impl RecordingBackend {
    fn add(&mut self, kind: NodeKind) -> usize {
        self.kinds.push(kind);
        self.kinds.len() - 1
    }

    pub fn nodes_of(&self, pred: impl Fn(&NodeKind) -> bool) -> Vec<usize> {
        (0..self.kinds.len()).filter(|i| pred(&self.kinds[*i])).collect()
    }

    pub fn gain_node(&self, label: &str) -> usize {
        self.nodes_of(|k| *k == NodeKind::Gain(label.to_string()))[0]
    }

    pub fn outgoing(&self, from: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|(f, _)| *f == from)
            .map(|(_, t)| *t)
            .collect()
    }
}

impl AudioBackend for RecordingBackend {
    type Node = usize;
    type EffectData = String;

    fn input(&mut self, input: usize) -> Result<usize, StageError> {
        if let Some(n) = self.inputs.get(&input) {
            return Ok(*n);
        }
        let n = self.add(NodeKind::Input(input));
        self.inputs.insert(input, n);
        Ok(n)
    }

    fn destination(&mut self) -> usize {
        match self.destination {
            Some(d) => d,
            None => {
                let d = self.add(NodeKind::Destination);
                self.destination = Some(d);
                d
            }
        }
    }

    fn create_spatializer(
        &mut self,
        _params: &SpatializerParams,
        position: Vec3,
        orientation: Vec3,
    ) -> Result<usize, StageError> {
        let n = self.add(NodeKind::Spatializer);
        self.positions.insert(n, position);
        self.orientations.insert(n, orientation);
        Ok(n)
    }

    fn create_gain(&mut self, value: f32, label: &str) -> Result<usize, StageError> {
        if self.fail_gain_label.as_deref() == Some(label) {
            return Err(StageError::NodeCreation {
                node: "GainNode",
                reason: "refused".into(),
            });
        }
        let n = self.add(NodeKind::Gain(label.to_string()));
        self.gains.insert(n, value);
        Ok(n)
    }

    fn create_effect(&mut self, effect: usize) -> Result<usize, StageError> {
        Ok(self.add(NodeKind::Effect(effect)))
    }

    fn connect(&mut self, from: &usize, to: &usize) {
        self.edges.push((*from, *to));
    }

    fn set_position(&mut self, spatializer: &usize, position: Vec3) {
        self.positions.insert(*spatializer, position);
    }

    fn set_orientation(&mut self, spatializer: &usize, orientation: Vec3) {
        self.orientations.insert(*spatializer, orientation);
    }

    fn set_gain(&mut self, gain: &usize, value: f32) {
        self.gains.insert(*gain, value);
    }

    fn set_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        self.listener = Some((position, forward, up));
    }

    fn load_effect(&mut self, node: &usize, data: &String) {
        self.loaded.push((*node, data.clone()));
    }
}

pub const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
pub const CANVAS: Vec2 = Vec2::new(600.0, 400.0);

pub fn make_engine() -> Engine<RecordingBackend> {
    Engine::new(
        SceneConfig::double_premiere(),
        RecordingBackend::default(),
        VIEWPORT,
        CANVAS,
    )
    .expect("engine builds")
}

pub fn approx(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

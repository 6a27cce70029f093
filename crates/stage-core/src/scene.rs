//! Listener, sources and buses, with the invariant that every source's
//! orientation points at the listener.

use crate::config::{ListenerDepth, SceneConfig};
use crate::constants::{LISTENER_FORWARD, LISTENER_UP};
use crate::vector::orientation_toward;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

/// Per-source gain snapshot; scenes hold a handful of sources.
pub type GainVec = SmallVec<[f32; 8]>;

#[derive(Clone, Debug, PartialEq)]
pub struct Listener {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SoundSource {
    pub index: usize,
    pub label: String,
    pub position: Vec3,
    /// Unit vector from the source toward the listener.
    pub orientation: Vec3,
    pub input: usize,
    pub bus: usize,
    pub effect: Option<usize>,
    /// Linear gain in `[0, 1]`.
    pub gain: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bus {
    pub name: String,
    pub max_gain: f32,
    pub gain: f32,
}

pub struct Scene {
    listener: Listener,
    sources: Vec<SoundSource>,
    buses: Vec<Bus>,
    base_z: f32,
    depth: ListenerDepth,
}

impl Scene {
    /// Build the scene with the listener at `center`; sources are placed at
    /// their configured offsets from it and stay world-absolute afterwards.
    pub fn new(config: &SceneConfig, center: Vec2) -> Self {
        let listener = Listener {
            position: Vec3::new(
                center.x,
                center.y,
                listener_z(config.listener_z, config.listener_depth),
            ),
            forward: LISTENER_FORWARD,
            up: LISTENER_UP,
        };
        // Used only when a source starts exactly on the listener.
        let facing_listener = -LISTENER_FORWARD;
        let sources = config
            .sources
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let position = listener.position + c.offset;
                SoundSource {
                    index,
                    label: c.label.clone(),
                    position,
                    orientation: orientation_toward(
                        position,
                        listener.position,
                        facing_listener,
                    ),
                    input: c.input,
                    bus: c.bus,
                    effect: c.effect,
                    gain: c.initial_gain.clamp(0.0, 1.0),
                }
            })
            .collect();
        let buses = config
            .buses
            .iter()
            .map(|b| Bus {
                name: b.name.clone(),
                max_gain: b.max_gain,
                gain: b.max_gain,
            })
            .collect();
        Self {
            listener,
            sources,
            buses,
            base_z: config.listener_z,
            depth: config.listener_depth,
        }
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn sources(&self) -> &[SoundSource] {
        &self.sources
    }

    pub fn source(&self, index: usize) -> Option<&SoundSource> {
        self.sources.get(index)
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn bus(&self, bus: usize) -> Option<&Bus> {
        self.buses.get(bus)
    }

    pub fn gains(&self) -> GainVec {
        self.sources.iter().map(|s| s.gain).collect()
    }

    /// Move a source and re-aim it at the listener. Out-of-range indices are
    /// ignored (late pointer events may reference a stale index); returns
    /// whether anything changed.
    pub fn set_source_position(&mut self, index: usize, position: Vec3) -> bool {
        if !position.is_finite() {
            return false;
        }
        let listener_pos = self.listener.position;
        match self.sources.get_mut(index) {
            Some(s) => {
                s.position = position;
                s.orientation = orientation_toward(position, listener_pos, s.orientation);
                true
            }
            None => false,
        }
    }

    /// Store a clamped source gain and return the stored value.
    pub fn set_source_gain(&mut self, index: usize, value: f32) -> Option<f32> {
        if value.is_nan() {
            return None;
        }
        let s = self.sources.get_mut(index)?;
        s.gain = value.clamp(0.0, 1.0);
        Some(s.gain)
    }

    /// Store a bus gain clamped to that bus's ceiling and return it.
    pub fn set_bus_gain(&mut self, bus: usize, value: f32) -> Option<f32> {
        if value.is_nan() {
            return None;
        }
        let b = self.buses.get_mut(bus)?;
        b.gain = value.clamp(0.0, b.max_gain);
        Some(b.gain)
    }

    /// Move the listener to a new screen-center position. Sources keep their
    /// world positions, so every orientation is recomputed.
    pub fn recenter_listener(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.listener.position = Vec3::new(x, y, listener_z(self.base_z, self.depth));
        let listener_pos = self.listener.position;
        for s in &mut self.sources {
            s.orientation = orientation_toward(s.position, listener_pos, s.orientation);
        }
    }

    /// True when every source faces the listener within `tolerance`.
    /// Sources sitting on the listener are skipped.
    pub fn orientations_consistent(&self, tolerance: f32) -> bool {
        self.sources.iter().all(|s| {
            match crate::vector::direction(s.position, self.listener.position) {
                Some(expected) => (s.orientation - expected).length() <= tolerance,
                None => true,
            }
        })
    }
}

fn listener_z(base_z: f32, depth: ListenerDepth) -> f32 {
    match depth {
        ListenerDepth::Fixed => base_z,
        ListenerDepth::ForwardOffset(d) => base_z + LISTENER_FORWARD.z * d,
    }
}

//! Scene configuration.
//!
//! Layout variants differ only in tuning (cone angles, rolloff, distances,
//! number of sources), so they are expressed as data rather than code paths.

use crate::constants::*;
use crate::error::{Result, StageError};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DistanceModel {
    Linear,
    #[default]
    Inverse,
    Exponential,
}

/// Directivity cone and distance rolloff applied to every spatializer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatializerParams {
    pub cone_inner_angle: f32,
    pub cone_outer_angle: f32,
    pub cone_outer_gain: f32,
    pub distance_model: DistanceModel,
    pub ref_distance: f32,
    pub max_distance: f32,
    pub rolloff_factor: f32,
}

impl Default for SpatializerParams {
    fn default() -> Self {
        Self {
            cone_inner_angle: CONE_INNER_ANGLE,
            cone_outer_angle: CONE_OUTER_ANGLE,
            cone_outer_gain: CONE_OUTER_GAIN,
            distance_model: DistanceModel::Inverse,
            ref_distance: REF_DISTANCE,
            max_distance: MAX_DISTANCE,
            rolloff_factor: ROLLOFF_FACTOR,
        }
    }
}

/// How the listener's Z coordinate behaves when it is recentered.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ListenerDepth {
    /// Z keeps its configured value.
    #[default]
    Fixed,
    /// Z sits at the configured value plus this distance along the forward axis.
    ForwardOffset(f32),
}

/// A media input feeding one or more sources (an `<audio>` element on the web).
#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BusConfig {
    pub name: String,
    pub max_gain: f32,
}

/// Shared convolution-style send; `impulse_url` is where the frontend fetches
/// its impulse response from.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub name: String,
    pub impulse_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
    pub label: String,
    /// Initial position relative to the listener.
    pub offset: Vec3,
    pub input: usize,
    pub bus: usize,
    pub effect: Option<usize>,
    pub initial_gain: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub inputs: Vec<InputConfig>,
    pub buses: Vec<BusConfig>,
    pub effects: Vec<EffectConfig>,
    pub sources: Vec<SourceConfig>,
    pub spatializer: SpatializerParams,
    pub listener_z: f32,
    pub listener_depth: ListenerDepth,
    pub view_scale: f32,
    pub hit_radius: f32,
    pub ramp_steps_per_sec: f32,
}

impl SceneConfig {
    /// Six "double" channels on a hexagon around the listener plus one
    /// "premiere" channel just in front of it, routed through a reverb.
    pub fn double_premiere() -> Self {
        const H: f32 = 1.7321;
        let hexagon = [
            Vec3::new(-1.0, 0.0, -H),
            Vec3::new(1.0, 0.0, -H),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, H),
            Vec3::new(-1.0, 0.0, H),
            Vec3::new(-2.0, 0.0, 0.0),
        ];
        let mut sources: Vec<SourceConfig> = hexagon
            .iter()
            .enumerate()
            .map(|(i, offset)| SourceConfig {
                label: format!("Source {}", i + 1),
                offset: *offset,
                input: 0,
                bus: 0,
                effect: None,
                initial_gain: 1.0,
            })
            .collect();
        sources.push(SourceConfig {
            label: "Source 7".to_string(),
            offset: Vec3::new(0.0, 0.0, -0.5),
            input: 1,
            bus: 1,
            effect: Some(0),
            initial_gain: 1.0,
        });

        Self {
            inputs: vec![
                InputConfig {
                    name: "double".to_string(),
                },
                InputConfig {
                    name: "premiere".to_string(),
                },
            ],
            buses: vec![
                BusConfig {
                    name: "Double".to_string(),
                    max_gain: DOUBLE_BUS_MAX_GAIN,
                },
                BusConfig {
                    name: "Premiere".to_string(),
                    max_gain: PREMIERE_BUS_MAX_GAIN,
                },
            ],
            effects: vec![EffectConfig {
                name: "reverb".to_string(),
                impulse_url: "http://reverbjs.org/Library/MidiverbMark2Preset29.m4a".to_string(),
            }],
            sources,
            spatializer: SpatializerParams::default(),
            listener_z: 0.0,
            listener_depth: ListenerDepth::Fixed,
            view_scale: VIEW_SCALE,
            hit_radius: HIT_RADIUS_PX,
            ramp_steps_per_sec: RAMP_STEPS_PER_SEC,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(StageError::InvalidConfig(msg));

        if self.sources.is_empty() {
            return invalid("no sources".into());
        }
        for bus in &self.buses {
            if !bus.max_gain.is_finite() || bus.max_gain < 0.0 {
                return invalid(format!("bus {:?} has max gain {}", bus.name, bus.max_gain));
            }
        }
        for (i, s) in self.sources.iter().enumerate() {
            if s.bus >= self.buses.len() {
                return invalid(format!("source {} routes to missing bus {}", i, s.bus));
            }
            if s.input >= self.inputs.len() {
                return invalid(format!("source {} reads missing input {}", i, s.input));
            }
            if let Some(e) = s.effect {
                if e >= self.effects.len() {
                    return invalid(format!("source {} sends to missing effect {}", i, e));
                }
            }
            if !s.offset.is_finite() {
                return invalid(format!("source {} has a non-finite offset", i));
            }
        }
        if !(self.view_scale > 0.0) {
            return invalid(format!("view scale must be positive, got {}", self.view_scale));
        }
        if !(self.hit_radius > 0.0) {
            return invalid(format!("hit radius must be positive, got {}", self.hit_radius));
        }
        if !(self.ramp_steps_per_sec > 0.0) {
            return invalid(format!(
                "ramp rate must be positive, got {}",
                self.ramp_steps_per_sec
            ));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::double_premiere()
    }
}

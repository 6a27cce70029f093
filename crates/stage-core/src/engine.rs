//! The scene context: owns the scene model, the routing graph, both views,
//! the drag session and the ramp scheduler. Every parameter write goes
//! through here so the model and the audio graph never disagree.

use crate::config::SceneConfig;
use crate::display::{view_frame, ViewFrame};
use crate::drag::{DragController, DragState};
use crate::error::Result;
use crate::projection::{ProjectionView, ViewPlane};
use crate::ramp::{RampScheduler, RampTick};
use crate::routing::{AudioBackend, EffectState, GainTarget, RoutingGraph};
use crate::scene::Scene;
use glam::{Vec2, Vec3};

pub struct Engine<B: AudioBackend> {
    config: SceneConfig,
    scene: Scene,
    routing: RoutingGraph<B>,
    views: Vec<ProjectionView>,
    drag: DragController,
    ramp: RampScheduler,
    redraw: bool,
}

impl<B: AudioBackend> Engine<B> {
    /// Build the scene centered in `viewport` and wire the audio graph once.
    /// Both views start with a `canvas` sized backing store.
    pub fn new(config: SceneConfig, backend: B, viewport: Vec2, canvas: Vec2) -> Result<Self> {
        config.validate()?;
        let scene = Scene::new(&config, viewport / 2.0);
        let routing =
            RoutingGraph::build(backend, &scene, &config.spatializer, config.effects.len())?;
        let views = ViewPlane::ALL
            .iter()
            .map(|p| ProjectionView::new(*p, config.view_scale, canvas.x, canvas.y))
            .collect();
        let ramp = RampScheduler::new(config.ramp_steps_per_sec);
        let l = scene.listener().position;
        log::info!(
            "[engine] sources={} buses={} listener=({:.2},{:.2},{:.2})",
            scene.sources().len(),
            scene.buses().len(),
            l.x,
            l.y,
            l.z
        );
        Ok(Self {
            config,
            scene,
            routing,
            views,
            drag: DragController::new(),
            ramp,
            redraw: true,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn routing(&self) -> &RoutingGraph<B> {
        &self.routing
    }

    pub fn views(&self) -> &[ProjectionView] {
        &self.views
    }

    pub fn view(&self, plane: ViewPlane) -> Option<&ProjectionView> {
        self.views.iter().find(|v| v.plane == plane)
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_active()
    }

    /// Changes whenever a preset starts a new ramp.
    pub fn ramp_generation(&self) -> u64 {
        self.ramp.generation()
    }

    // ---------------- Geometry ----------------

    /// Move a source, re-aim it and push the new spatial parameters.
    pub fn set_source_position(&mut self, index: usize, position: Vec3) -> bool {
        if !self.scene.set_source_position(index, position) {
            return false;
        }
        if let Some(s) = self.scene.source(index) {
            self.routing
                .update_spatial_params(index, s.position, s.orientation);
        }
        self.redraw = true;
        true
    }

    /// Viewport resized: recenter the listener and re-aim every source.
    pub fn resize(&mut self, viewport: Vec2) {
        let center = viewport / 2.0;
        self.scene.recenter_listener(center.x, center.y);
        self.routing.update_listener(self.scene.listener());
        for s in self.scene.sources() {
            self.routing
                .update_spatial_params(s.index, s.position, s.orientation);
        }
        log::info!("[engine] listener recentered at ({:.1},{:.1})", center.x, center.y);
        self.redraw = true;
    }

    /// Canvas backing store of one view changed size.
    pub fn resize_view(&mut self, plane: ViewPlane, size: Vec2) {
        if let Some(v) = self.views.iter_mut().find(|v| v.plane == plane) {
            v.resize(size.x, size.y);
            self.redraw = true;
        }
    }

    // ---------------- Pointer ----------------

    /// `points[i]` is the pointer in the canvas space of `views()[i]`.
    pub fn pointer_down(&mut self, points: &[Vec2]) -> Option<usize> {
        let hit = self
            .drag
            .pointer_down(&self.views, points, &self.scene, self.config.hit_radius);
        hit.map(|(source, plane)| {
            log::info!("[drag] begin drag on source {} ({} view)", source, plane.name());
            source
        })
    }

    /// Returns whether a source moved.
    pub fn pointer_move(&mut self, points: &[Vec2]) -> bool {
        match self.drag.pointer_move(&self.views, points, &self.scene) {
            Some((index, position)) => self.set_source_position(index, position),
            None => false,
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        self.drag.release()
    }

    // ---------------- Gains ----------------

    /// Slider input for one source.
    pub fn set_source_gain(&mut self, index: usize, value: f32) -> Option<f32> {
        let stored = self.scene.set_source_gain(index, value)?;
        self.routing.update_gain(GainTarget::Source(index), stored);
        self.redraw = true;
        Some(stored)
    }

    /// Slider input for a bus master.
    pub fn set_bus_gain(&mut self, bus: usize, value: f32) -> Option<f32> {
        let stored = self.scene.set_bus_gain(bus, value)?;
        self.routing.update_gain(GainTarget::Bus(bus), stored);
        self.redraw = true;
        Some(stored)
    }

    /// Ramp every source toward `preset` (0..100 values) over `duration_ms`,
    /// replacing any ramp in flight. A zero duration applies it at once and
    /// returns the applied gains, since no frame will tick that ramp.
    pub fn apply_preset(&mut self, preset: &[f32], duration_ms: f32) -> Option<RampTick> {
        if preset.len() > self.scene.sources().len() {
            log::debug!(
                "[ramp] preset has {} values for {} sources; extra ignored",
                preset.len(),
                self.scene.sources().len()
            );
        }
        let current = self.scene.gains();
        let steps = self.ramp.start(&current, preset, duration_ms).steps();
        if steps == 0 {
            return self.tick();
        }
        None
    }

    /// Advance the live ramp by one frame and push the gains.
    pub fn tick(&mut self) -> Option<RampTick> {
        let tick = self.ramp.tick()?;
        for (i, g) in tick.gains.iter().enumerate() {
            self.set_source_gain(i, *g);
        }
        if tick.finished {
            log::info!("[ramp] preset reached");
        }
        Some(tick)
    }

    // ---------------- Effect sends ----------------

    pub fn effect_loaded(&mut self, effect: usize, data: &B::EffectData) -> Result<()> {
        self.routing.effect_loaded(effect, data)
    }

    pub fn effect_failed(&mut self, effect: usize, reason: &str) {
        self.routing.effect_failed(effect, reason);
    }

    pub fn effect_state(&self, effect: usize) -> Option<EffectState> {
        self.routing.effect_state(effect)
    }

    // ---------------- Rendering ----------------

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Whether the views need repainting; clears the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn frames(&self) -> Vec<ViewFrame> {
        self.views
            .iter()
            .map(|v| view_frame(v, &self.scene))
            .collect()
    }
}

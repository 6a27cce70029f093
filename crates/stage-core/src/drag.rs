use crate::projection::{hit_test, ProjectionView, ViewPlane};
use crate::scene::Scene;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: usize,
        /// Index of the pinned view in the engine's view list.
        view: usize,
        plane: ViewPlane,
        /// Pointer position in the pinned view at the previous event.
        last: Vec2,
    },
}

/// Pointer-driven drag state machine. It only computes new source positions;
/// applying them is the caller's job.
#[derive(Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// `points[i]` is the pointer expressed in the canvas space of `views[i]`.
    /// Views are tried in order and the first hit pins the drag to its view.
    pub fn pointer_down(
        &mut self,
        views: &[ProjectionView],
        points: &[Vec2],
        scene: &Scene,
        radius: f32,
    ) -> Option<(usize, ViewPlane)> {
        for (vi, (view, point)) in views.iter().zip(points).enumerate() {
            let positions = view.project_sources(scene);
            if let Some(source) = hit_test(*point, &positions, radius) {
                self.state = DragState::Dragging {
                    source,
                    view: vi,
                    plane: view.plane,
                    last: *point,
                };
                log::debug!("[drag] grabbed source {} in {} view", source, view.plane.name());
                return Some((source, view.plane));
            }
        }
        self.state = DragState::Idle;
        None
    }

    /// New world position of the grabbed source, or `None` when idle or when
    /// the pinned view has no pointer sample.
    pub fn pointer_move(
        &mut self,
        views: &[ProjectionView],
        points: &[Vec2],
        scene: &Scene,
    ) -> Option<(usize, Vec3)> {
        let DragState::Dragging {
            source,
            view,
            plane,
            last,
        } = self.state
        else {
            return None;
        };
        let (v, point) = (views.get(view)?, *points.get(view)?);
        let current = scene.source(source)?.position;
        let next = current + v.to_world_delta(point - last);
        self.state = DragState::Dragging {
            source,
            view,
            plane,
            last: point,
        };
        Some((source, next))
    }

    /// Pointer up or pointer leaving a canvas. Returns whether a drag ended.
    pub fn release(&mut self) -> bool {
        let was = self.is_dragging();
        if let DragState::Dragging { source, plane, .. } = self.state {
            log::debug!("[drag] released source {} ({} view)", source, plane.name());
        }
        self.state = DragState::Idle;
        was
    }
}

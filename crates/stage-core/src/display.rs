//! What each view draws: plain data handed to the canvas renderer.

use crate::constants::*;
use crate::projection::{ProjectionView, ViewPlane};
use crate::scene::Scene;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct ListenerMarker {
    pub center: Vec2,
    pub radius: f32,
    pub label: &'static str,
    pub label_at: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceMarker {
    pub index: usize,
    pub center: Vec2,
    /// Grows with the source gain.
    pub radius: f32,
    pub title: String,
    /// Position relative to the listener, `x, y, z` with two decimals.
    pub coords: String,
    pub title_at: Vec2,
    pub coords_at: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewFrame {
    pub plane: ViewPlane,
    pub width: f32,
    pub height: f32,
    pub listener: ListenerMarker,
    pub sources: Vec<SourceMarker>,
}

pub fn marker_radius(gain: f32) -> f32 {
    gain.clamp(0.0, 1.0) * SOURCE_MARKER_GAIN_RADIUS + SOURCE_MARKER_BASE_RADIUS
}

pub fn format_relative(rel: Vec3) -> String {
    // `+ 0.0` folds negative zero so it prints as "0.00"
    format!("{:.2}, {:.2}, {:.2}", rel.x + 0.0, rel.y + 0.0, rel.z + 0.0)
}

pub fn view_frame(view: &ProjectionView, scene: &Scene) -> ViewFrame {
    let origin = scene.listener().position;
    let center = view.center();
    let label_offset = Vec2::new(LABEL_OFFSET_PX, 0.0);
    let sources = scene
        .sources()
        .iter()
        .map(|s| {
            let at = view.to_screen(s.position, origin);
            SourceMarker {
                index: s.index,
                center: at,
                radius: marker_radius(s.gain),
                title: format!("{}:", s.label),
                coords: format_relative(s.position - origin),
                title_at: at + label_offset,
                coords_at: at + label_offset + Vec2::new(0.0, LABEL_LINE_HEIGHT_PX),
            }
        })
        .collect();
    ViewFrame {
        plane: view.plane,
        width: view.width,
        height: view.height,
        listener: ListenerMarker {
            center,
            radius: LISTENER_MARKER_RADIUS,
            label: "Listener",
            label_at: center + label_offset,
        },
        sources,
    }
}

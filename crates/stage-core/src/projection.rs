//! World ↔ screen mapping for the two 2D views.
//!
//! Both views share the horizontal axis (world X → screen X). The vertical
//! screen axis shows world Z in the top view and world Y (flipped, screen Y
//! grows downward) in the front view. A view writes only the two world
//! coordinates it shows.

use crate::scene::Scene;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

pub type ScreenPositions = SmallVec<[Vec2; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewPlane {
    Top,
    Front,
}

impl ViewPlane {
    /// Hit-testing order: when both views claim a pointer, the earlier wins.
    pub const ALL: [ViewPlane; 2] = [ViewPlane::Top, ViewPlane::Front];

    pub fn name(self) -> &'static str {
        match self {
            ViewPlane::Top => "top",
            ViewPlane::Front => "front",
        }
    }

    /// World axis shown vertically and the sign mapping it onto screen Y.
    #[inline]
    fn vertical(self) -> (Vec3, f32) {
        match self {
            ViewPlane::Top => (Vec3::Z, 1.0),
            ViewPlane::Front => (Vec3::Y, -1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionView {
    pub plane: ViewPlane,
    /// Screen pixels per world unit.
    pub scale: f32,
    pub width: f32,
    pub height: f32,
}

impl ProjectionView {
    pub fn new(plane: ViewPlane, scale: f32, width: f32, height: f32) -> Self {
        Self {
            plane,
            scale,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Project `world` onto the canvas, with `origin` (the listener) drawn at
    /// the canvas center.
    #[inline]
    pub fn to_screen(&self, world: Vec3, origin: Vec3) -> Vec2 {
        let rel = world - origin;
        let (axis, sign) = self.plane.vertical();
        self.center() + Vec2::new(rel.x, sign * rel.dot(axis)) * self.scale
    }

    /// World-space offset for a pointer movement of `screen_delta` pixels.
    /// The coordinate this view does not show is always zero.
    #[inline]
    pub fn to_world_delta(&self, screen_delta: Vec2) -> Vec3 {
        let (axis, sign) = self.plane.vertical();
        (Vec3::X * screen_delta.x + axis * (sign * screen_delta.y)) / self.scale
    }

    /// Screen positions of every source in channel order.
    pub fn project_sources(&self, scene: &Scene) -> ScreenPositions {
        let origin = scene.listener().position;
        scene
            .sources()
            .iter()
            .map(|s| self.to_screen(s.position, origin))
            .collect()
    }
}

/// First position strictly closer than `radius` to `point`.
#[inline]
pub fn hit_test(point: Vec2, positions: &[Vec2], radius: f32) -> Option<usize> {
    positions
        .iter()
        .position(|p| p.distance(point) < radius)
}

use crate::dom;
use glam::Vec2;
use stage_core::{ViewFrame, ViewPlane};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const LISTENER_COLOR: &str = "red";
const SOURCE_COLOR: &str = "rgb(0,200,0)";

/// A view's canvas and its 2D context.
pub struct ViewCanvas {
    pub plane: ViewPlane,
    pub canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl ViewCanvas {
    pub fn from_id(document: &web::Document, id: &str, plane: ViewPlane) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = dom::element_by_id(document, id)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("#{} has no 2d context", id))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { plane, canvas, ctx })
    }

    /// Backing-store size in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn draw(&self, frame: &ViewFrame) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

        let l = &frame.listener;
        fill_circle(ctx, LISTENER_COLOR, l.center, l.radius);
        _ = ctx.fill_text(l.label, l.label_at.x as f64, l.label_at.y as f64);

        for m in &frame.sources {
            fill_circle(ctx, SOURCE_COLOR, m.center, m.radius);
            _ = ctx.fill_text(&m.title, m.title_at.x as f64, m.title_at.y as f64);
            _ = ctx.fill_text(&m.coords, m.coords_at.x as f64, m.coords_at.y as f64);
        }
    }
}

#[allow(deprecated)]
fn fill_circle(ctx: &web::CanvasRenderingContext2d, color: &str, center: Vec2, radius: f32) {
    ctx.set_fill_style(&JsValue::from_str(color));
    ctx.begin_path();
    _ = ctx.arc(
        center.x as f64,
        center.y as f64,
        radius as f64,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    ctx.fill();
}

/// Repaint every view whose frame is available.
pub fn draw_all(views: &[ViewCanvas], frames: &[ViewFrame]) {
    for frame in frames {
        if let Some(v) = views.iter().find(|v| v.plane == frame.plane) {
            v.draw(frame);
        }
    }
}

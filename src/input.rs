use glam::Vec2;
use web_sys as web;

/// Pointer position in the canvas' backing-store pixels. Works for any
/// canvas, not only the one that received the event.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        let sx = (x_css / w) * canvas.width() as f32;
        let sy = (y_css / h) * canvas.height() as f32;
        Vec2::new(sx, sy)
    } else {
        Vec2::new(x_css, y_css)
    }
}

/// One pointer sample per view canvas, in view order.
pub fn pointer_samples(ev: &web::MouseEvent, canvases: &[web::HtmlCanvasElement]) -> Vec<Vec2> {
    canvases.iter().map(|c| pointer_canvas_px(ev, c)).collect()
}

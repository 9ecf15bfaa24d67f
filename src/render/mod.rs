//! Canvas painter for the minigame
//!
//! Repaints the whole field every frame from the current state. Sprites
//! blit once their images decode; until then they fall back to filled
//! rectangles so the loop never waits on an asset.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Window};

use crate::sim::{GameState, Lane, Rect};
use crate::tuning::Tuning;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    car_img: HtmlImageElement,
    obstacle_img: HtmlImageElement,
    field_w: f32,
    field_h: f32,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement, tuning: &Tuning) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;

        // Decode in the background; draw() falls back until ready
        let car_img = HtmlImageElement::new()?;
        car_img.set_src(&tuning.car_src);
        let obstacle_img = HtmlImageElement::new()?;
        obstacle_img.set_src(&tuning.obstacle_src);

        Ok(Self {
            canvas,
            ctx,
            car_img,
            obstacle_img,
            field_w: 0.0,
            field_h: 0.0,
        })
    }

    /// Match the backing store to the displayed size at the current device
    /// pixel ratio. Draw coordinates stay in CSS pixels.
    pub fn fit_to_display(&mut self, window: &Window) -> Result<(), JsValue> {
        let dpr = window.device_pixel_ratio();
        let client_w = self.canvas.client_width();
        let client_h = self.canvas.client_height();
        self.canvas.set_width((client_w as f64 * dpr) as u32);
        self.canvas.set_height((client_h as f64 * dpr) as u32);
        // Resizing resets the context transform, so scale afterwards
        self.ctx.scale(dpr, dpr)?;
        self.field_w = client_w as f32;
        self.field_h = client_h as f32;
        Ok(())
    }

    pub fn field_size(&self) -> (f32, f32) {
        (self.field_w, self.field_h)
    }

    /// Full repaint: road, lane contrast, divider, obstacles, car.
    pub fn draw(&self, state: &GameState) {
        let w = self.field_w as f64;
        let h = self.field_h as f64;

        self.ctx.set_fill_style_str("#0f172a");
        self.ctx.fill_rect(0.0, 0.0, w, h);

        // Faint contrast between the two lanes
        self.ctx.set_fill_style_str("rgba(148, 163, 184, 0.06)");
        let right = Lane::Right.origin_x(self.field_w) as f64;
        self.ctx.fill_rect(right, 0.0, w - right, h);

        self.dashed_divider(w, h);

        for obstacle in &state.obstacles {
            self.blit_or_rect(&self.obstacle_img, &obstacle.rect, "#f87171");
        }
        self.blit_or_rect(&self.car_img, &state.player.rect, "#38bdf8");
    }

    fn dashed_divider(&self, w: f64, h: f64) {
        let dash = js_sys::Array::of2(&JsValue::from_f64(14.0), &JsValue::from_f64(18.0));
        if self.ctx.set_line_dash(&dash).is_err() {
            return;
        }
        self.ctx.set_stroke_style_str("rgba(226, 232, 240, 0.35)");
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.move_to(w * 0.5, 0.0);
        self.ctx.line_to(w * 0.5, h);
        self.ctx.stroke();
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }

    fn blit_or_rect(&self, img: &HtmlImageElement, rect: &Rect, fallback: &str) {
        let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
        let (dw, dh) = (rect.size.x as f64, rect.size.y as f64);
        if img.complete() && img.natural_width() > 0 {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, dw, dh);
        } else {
            self.ctx.set_fill_style_str(fallback);
            self.ctx.fill_rect(x, y, dw, dh);
        }
    }
}

//! Grand-prix egg: a lap around the viewport perimeter

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

/// Position and heading on the lap circuit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapPoint {
    pub pos: Vec2,
    /// Travel direction in radians: 0 points right, angles grow clockwise
    /// in screen coordinates
    pub heading: f32,
}

/// Point on a closed clockwise circuit of the field rectangle at a fixed
/// inset. `t` wraps, so `t = 0` and `t = 1` are the same point and the
/// path is continuous across laps.
pub fn lap_point(field_w: f32, field_h: f32, inset: f32, t: f32) -> LapPoint {
    let rw = (field_w - 2.0 * inset).max(0.0);
    let rh = (field_h - 2.0 * inset).max(0.0);
    let perimeter = 2.0 * (rw + rh);
    if perimeter <= 0.0 {
        return LapPoint {
            pos: Vec2::new(field_w * 0.5, field_h * 0.5),
            heading: 0.0,
        };
    }

    let mut d = t.rem_euclid(1.0) * perimeter;
    if d < rw {
        // Top edge, rolling right
        return LapPoint { pos: Vec2::new(inset + d, inset), heading: 0.0 };
    }
    d -= rw;
    if d < rh {
        // Right edge, heading down
        return LapPoint {
            pos: Vec2::new(inset + rw, inset + d),
            heading: FRAC_PI_2,
        };
    }
    d -= rh;
    if d < rw {
        // Bottom edge, heading back left
        return LapPoint {
            pos: Vec2::new(inset + rw - d, inset + rh),
            heading: PI,
        };
    }
    d -= rw;
    // Left edge, climbing home
    LapPoint {
        pos: Vec2::new(inset, inset + rh - d),
        heading: PI + FRAC_PI_2,
    }
}

#[cfg(target_arch = "wasm32")]
pub use launch::launch;

#[cfg(target_arch = "wasm32")]
mod launch {
    use wasm_bindgen::JsValue;
    use web_sys::Document;

    use crate::fx::Sprite;

    const INSET: f32 = 36.0;
    const DURATION_MS: f32 = 5_000.0;

    /// One ceremonial lap of the viewport.
    pub fn launch(document: &Document) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let field_w = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let field_h = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;

        let sprites = vec![Sprite { glyph: "\u{1F3CE}\u{FE0F}".to_string(), font_px: 36.0 }];

        crate::fx::spawn_overlay(document, sprites, DURATION_MS, move |_, t| {
            let point = super::lap_point(field_w, field_h, INSET, t);
            (point.pos, point.heading)
        })
    }
}

//! Winter egg: drifting snowfall with a skier cutting the diagonal

use std::f32::consts::TAU;

use glam::Vec2;

use super::{EDGE_MARGIN, ease_in_out};
use crate::{clamp01, lerp};

/// Sway parameters for one snowflake, drawn once at spawn
#[derive(Debug, Clone)]
pub struct Flake {
    pub origin_x: f32,
    pub amp: f32,
    pub freq: f32,
    pub phase: f32,
    /// Offset into the descent loop so flakes fall out of lockstep
    pub offset: f32,
}

impl Flake {
    /// Position at flake-local progress `t`: one full descent from above
    /// the top edge to below the bottom one, swaying about the origin.
    pub fn pos(&self, field_h: f32, t: f32) -> Vec2 {
        let y = t * (field_h + 2.0 * EDGE_MARGIN) - EDGE_MARGIN;
        let x = self.origin_x + self.amp * (TAU * self.freq * t + self.phase).sin();
        Vec2::new(x, y)
    }

    /// Shift the shared clock by this flake's offset, wrapping so the
    /// descent repeats until the effect ends.
    pub fn local_t(&self, global_t: f32) -> f32 {
        (global_t + self.offset).fract()
    }
}

/// Eased diagonal traverse, top-left to bottom-right, overshooting both
/// corners by the edge margin.
pub fn skier_pos(field_w: f32, field_h: f32, t: f32) -> Vec2 {
    let e = ease_in_out(clamp01(t));
    Vec2::new(
        lerp(-EDGE_MARGIN, field_w + EDGE_MARGIN, e),
        lerp(-EDGE_MARGIN, field_h + EDGE_MARGIN, e),
    )
}

#[cfg(target_arch = "wasm32")]
pub use launch::launch;

#[cfg(target_arch = "wasm32")]
mod launch {
    use rand::Rng;
    use wasm_bindgen::JsValue;
    use web_sys::Document;

    use super::Flake;
    use crate::fx::Sprite;

    const FLAKE_COUNT: usize = 24;
    const DURATION_MS: f32 = 9_000.0;

    /// Let it snow. Fire-and-forget; the overlay tears itself down.
    pub fn launch(document: &Document) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let field_w = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let field_h = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;

        let mut rng = rand::rng();
        let flakes: Vec<Flake> = (0..FLAKE_COUNT)
            .map(|_| Flake {
                origin_x: rng.random_range(0.0..field_w.max(1.0)),
                amp: rng.random_range(8.0..28.0),
                freq: rng.random_range(1.0..3.0),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                offset: rng.random_range(0.0..1.0),
            })
            .collect();

        let mut sprites: Vec<Sprite> = flakes
            .iter()
            .map(|_| Sprite {
                glyph: "\u{2744}\u{FE0F}".to_string(),
                font_px: rng.random_range(14.0..26.0),
            })
            .collect();
        let skier_index = sprites.len();
        sprites.push(Sprite { glyph: "\u{26F7}\u{FE0F}".to_string(), font_px: 40.0 });

        crate::fx::spawn_overlay(document, sprites, DURATION_MS, move |i, t| {
            if i == skier_index {
                (super::skier_pos(field_w, field_h, t), 0.0)
            } else {
                let flake = &flakes[i];
                (flake.pos(field_h, flake.local_t(t)), 0.0)
            }
        })
    }
}

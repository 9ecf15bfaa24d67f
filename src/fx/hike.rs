//! Hiking egg: a small party walking the width of the viewport

use std::f32::consts::TAU;

use glam::Vec2;

use super::EDGE_MARGIN;
use crate::{clamp01, lerp};

/// Position on the walk at local progress `t`: a straight left-to-right
/// traverse with an `|sin|` bob, so the walker dips back to the baseline
/// every half cycle.
pub fn hiker_pos(field_w: f32, baseline_y: f32, bob_amp: f32, bob_cycles: f32, t: f32) -> Vec2 {
    let x = lerp(-EDGE_MARGIN, field_w + EDGE_MARGIN, t);
    let y = baseline_y - bob_amp * (TAU * bob_cycles * t).sin().abs();
    Vec2::new(x, y)
}

/// Start delay for the `index`-th walker, a fixed fraction of the walk
/// per position in the line.
pub fn stagger(index: usize, step: f32) -> f32 {
    index as f32 * step
}

/// Compress the shared clock so a walker delayed by `delay` still finishes
/// its full traverse; `span` is 1 plus the largest delay in the party.
pub fn local_t(global_t: f32, delay: f32, span: f32) -> f32 {
    clamp01(global_t * span - delay)
}

#[cfg(target_arch = "wasm32")]
pub use launch::launch;

#[cfg(target_arch = "wasm32")]
mod launch {
    use wasm_bindgen::JsValue;
    use web_sys::Document;

    use crate::fx::Sprite;

    const STAGGER_STEP: f32 = 0.12;
    const DURATION_MS: f32 = 8_000.0;
    const BOB_AMP: f32 = 10.0;
    const BOB_CYCLES: f32 = 6.0;

    /// March a walking party across the lower third of the viewport.
    pub fn launch(document: &Document) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let field_w = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let field_h = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
        let baseline_y = field_h * 0.72;

        let glyphs = ["\u{1F6B6}", "\u{1F6B6}\u{200D}\u{2640}\u{FE0F}", "\u{1F415}"];
        let sprites: Vec<Sprite> = glyphs
            .iter()
            .map(|g| Sprite { glyph: (*g).to_string(), font_px: 34.0 })
            .collect();

        let count = sprites.len();
        let span = 1.0 + super::stagger(count - 1, STAGGER_STEP);

        crate::fx::spawn_overlay(document, sprites, DURATION_MS, move |i, t| {
            let delay = super::stagger(i, STAGGER_STEP);
            let local = super::local_t(t, delay, span);
            (super::hiker_pos(field_w, baseline_y, BOB_AMP, BOB_CYCLES, local), 0.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_walk_spans_margin_to_margin() {
        assert_eq!(hiker_pos(800.0, 500.0, 10.0, 6.0, 0.0).x, -EDGE_MARGIN);
        assert_eq!(hiker_pos(800.0, 500.0, 10.0, 6.0, 1.0).x, 800.0 + EDGE_MARGIN);
    }

    #[test]
    fn test_bob_starts_and_ends_on_the_baseline() {
        // Whole cycle count means |sin| is zero at both ends
        assert_eq!(hiker_pos(800.0, 500.0, 10.0, 6.0, 0.0).y, 500.0);
        let end_y = hiker_pos(800.0, 500.0, 10.0, 6.0, 1.0).y;
        assert!((end_y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_stagger_strings_the_party_out() {
        assert_eq!(stagger(0, 0.12), 0.0);
        assert!(stagger(2, 0.12) > stagger(1, 0.12));
    }

    #[test]
    fn test_delayed_walker_still_finishes() {
        let delay = stagger(2, 0.125);
        let span = 1.0 + delay;
        assert_eq!(local_t(0.0, delay, span), 0.0);
        assert_eq!(local_t(1.0, delay, span), 1.0);
        // Walker 2 has not started yet early in the effect
        assert_eq!(local_t(0.1, delay, span), 0.0);
    }

    proptest! {
        #[test]
        fn prop_bob_stays_within_amplitude(
            baseline in 100.0f32..900.0,
            amp in 0.0f32..40.0,
            cycles in 0.5f32..10.0,
            t in 0.0f32..1.0,
        ) {
            let y = hiker_pos(800.0, baseline, amp, cycles, t).y;
            prop_assert!(y <= baseline + 1e-3);
            prop_assert!(y >= baseline - amp - 1e-3);
        }
    }
}

//! Decorative easter-egg animations
//!
//! Each effect is a short-lived overlay of emoji sprites driven by the
//! same self-rescheduling animation-frame pattern as the minigame. The
//! path math is pure and lives beside the effect that uses it; removing
//! the overlay container stops the loop on its next frame.

pub mod gp;
pub mod hike;
pub mod winter;

/// Off-screen spawn/exit margin so sprites enter and leave cleanly (px)
pub const EDGE_MARGIN: f32 = 48.0;

/// Quadratic ease-in-out over [0, 1]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Wall-clock window an effect runs in, with clamped progress
#[derive(Debug, Clone)]
pub struct Timeline {
    start_ms: f32,
    duration_ms: f32,
    now_ms: f32,
}

impl Timeline {
    pub fn new(duration_ms: f32) -> Self {
        Self { start_ms: 0.0, duration_ms, now_ms: 0.0 }
    }

    pub fn start(&mut self, now_ms: f32) {
        self.start_ms = now_ms;
        self.now_ms = now_ms;
    }

    pub fn update(&mut self, now_ms: f32) {
        self.now_ms = now_ms;
    }

    pub fn progress(&self) -> f32 {
        let elapsed = self.now_ms - self.start_ms;
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(target_arch = "wasm32")]
pub use overlay::{Sprite, spawn_overlay};

#[cfg(target_arch = "wasm32")]
mod overlay {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::JsCast;
    use web_sys::{Document, HtmlElement};

    use super::Timeline;

    /// One overlay sprite: a glyph and its font size in px
    pub struct Sprite {
        pub glyph: String,
        pub font_px: f32,
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Run a fixed-duration sprite overlay. `place` maps a sprite index and
    /// the overall progress in [0, 1] to a position and heading (radians).
    ///
    /// The overlay removes itself when the timeline completes; removing it
    /// from the DOM early cancels the effect instead.
    pub fn spawn_overlay(
        document: &Document,
        sprites: Vec<Sprite>,
        duration_ms: f32,
        place: impl Fn(usize, f32) -> (Vec2, f32) + 'static,
    ) -> Result<(), JsValue> {
        let container = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        container.style().set_property("position", "fixed")?;
        container.style().set_property("inset", "0")?;
        container.style().set_property("overflow", "hidden")?;
        container.style().set_property("pointer-events", "none")?;
        container.style().set_property("z-index", "999")?;

        let mut nodes = Vec::with_capacity(sprites.len());
        for sprite in &sprites {
            let el = document.create_element("span")?.dyn_into::<HtmlElement>()?;
            el.set_text_content(Some(&sprite.glyph));
            el.style().set_property("position", "absolute")?;
            el.style().set_property("left", "0")?;
            el.style().set_property("top", "0")?;
            el.style().set_property("font-size", &format!("{}px", sprite.font_px))?;
            el.style().set_property("will-change", "transform")?;
            container.append_child(&el)?;
            nodes.push(el);
        }

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&container)?;

        let mut timeline = Timeline::new(duration_ms);
        let mut started = false;

        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            // Losing the parent means someone tore the overlay down
            if container.parent_node().is_none() {
                f.borrow_mut().take();
                return;
            }

            if !started {
                timeline.start(ts as f32);
                started = true;
            }
            timeline.update(ts as f32);

            let t = timeline.progress();
            for (i, el) in nodes.iter().enumerate() {
                let (pos, heading) = place(i, t);
                let _ = el.style().set_property(
                    "transform",
                    &format!("translate({}px, {}px) rotate({}rad)", pos.x, pos.y, heading),
                );
            }

            if timeline.is_complete() {
                container.remove();
                f.borrow_mut().take();
                return;
            }
            if let Some(w) = web_sys::window() {
                let _ =
                    w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut(f64)>));

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;
        Ok(())
    }
}

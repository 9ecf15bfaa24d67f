//! Gameplay balance knobs
//!
//! Loaded once at bootstrap from an optional inline JSON block; nothing is
//! ever written back.

use serde::{Deserialize, Serialize};

/// Balance knobs for the minigame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawn cadence ===
    /// Interval between the first spawns (ms)
    pub spawn_initial_ms: f64,
    /// Interval multiplier applied after each spawn, in (0, 1]
    pub spawn_decay: f64,
    /// Interval never drops below this (ms)
    pub spawn_floor_ms: f64,

    // === Fall speed ===
    /// Obstacle fall distance on the first frame (px/frame)
    pub base_speed: f32,
    /// Added to the fall speed every frame (px/frame²)
    pub speed_increment: f32,

    // === Sprite sizes ===
    /// Car width (px)
    pub car_w: f32,
    /// Car height (px)
    pub car_h: f32,
    /// Obstacle width range (px)
    pub obstacle_w_min: f32,
    pub obstacle_w_max: f32,
    /// Obstacle height range (px)
    pub obstacle_h_min: f32,
    pub obstacle_h_max: f32,

    // === Assets ===
    /// Car sprite path, relative to the page
    pub car_src: String,
    /// Obstacle sprite path, relative to the page
    pub obstacle_src: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_initial_ms: 1000.0,
            spawn_decay: 0.97,
            spawn_floor_ms: 400.0,

            base_speed: 2.4,
            speed_increment: 0.002,

            car_w: 52.0,
            car_h: 90.0,
            obstacle_w_min: 42.0,
            obstacle_w_max: 96.0,
            obstacle_h_min: 36.0,
            obstacle_h_max: 72.0,

            car_src: "assets/car.png".to_string(),
            obstacle_src: "assets/obstacle.png".to_string(),
        }
    }
}

impl Tuning {
    /// Element id of the optional inline override block
    const ELEMENT_ID: &'static str = "fx-tuning";

    /// Parse tuning JSON; unknown or missing fields keep their defaults.
    /// Malformed input and overrides outside their working ranges fall back
    /// to defaults entirely.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(tuning) if tuning.is_sane() => tuning,
            Ok(_) => {
                log::warn!("Ignoring out-of-range tuning overrides");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring malformed tuning JSON: {err}");
                Self::default()
            }
        }
    }

    /// True when every knob is inside its working range: positive timings
    /// and sizes, decay in (0, 1], ordered obstacle size ranges. All checks
    /// are positive comparisons, so a NaN fails whichever one reads it.
    pub fn is_sane(&self) -> bool {
        self.spawn_initial_ms > 0.0
            && self.spawn_decay > 0.0
            && self.spawn_decay <= 1.0
            && self.spawn_floor_ms > 0.0
            && self.base_speed > 0.0
            && self.speed_increment >= 0.0
            && self.car_w > 0.0
            && self.car_h > 0.0
            && self.obstacle_w_min > 0.0
            && self.obstacle_w_min <= self.obstacle_w_max
            && self.obstacle_h_min > 0.0
            && self.obstacle_h_min <= self.obstacle_h_max
    }

    /// Load tuning from the page's inline `<script type="application/json">`
    /// block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Self {
        let inline = document
            .get_element_by_id(Self::ELEMENT_ID)
            .and_then(|el| el.text_content());

        match inline {
            Some(json) => {
                log::info!("Loading tuning overrides from #{}", Self::ELEMENT_ID);
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let t = Tuning::default();
        assert!(t.is_sane());
        assert!(t.spawn_initial_ms >= t.spawn_floor_ms);
    }

    #[test]
    fn test_partial_json_overrides_only_named_knobs() {
        let t = Tuning::from_json(r#"{ "spawn_floor_ms": 250.0, "base_speed": 3.5 }"#);
        assert_eq!(t.spawn_floor_ms, 250.0);
        assert_eq!(t.base_speed, 3.5);
        let d = Tuning::default();
        assert_eq!(t.spawn_initial_ms, d.spawn_initial_ms);
        assert_eq!(t.car_src, d.car_src);
    }

    #[test]
    fn test_malformed_json_falls_back_to_defaults() {
        let t = Tuning::from_json("{ not json");
        assert_eq!(t.spawn_initial_ms, Tuning::default().spawn_initial_ms);
    }

    #[test]
    fn test_inverted_size_range_falls_back_to_defaults() {
        // Well-formed JSON, unusable values: min above max would make the
        // spawn draw panic if it ever reached the rng
        let t = Tuning::from_json(r#"{ "obstacle_w_min": 96.0, "obstacle_w_max": 42.0 }"#);
        let d = Tuning::default();
        assert_eq!(t.obstacle_w_min, d.obstacle_w_min);
        assert_eq!(t.obstacle_w_max, d.obstacle_w_max);
    }

    #[test]
    fn test_out_of_range_decay_falls_back_to_defaults() {
        let t = Tuning::from_json(r#"{ "spawn_decay": 1.5 }"#);
        assert_eq!(t.spawn_decay, Tuning::default().spawn_decay);
    }
}

//! Folio FX - client-side interactivity for a personal portfolio page
//!
//! Core modules:
//! - `sim`: Deterministic minigame simulation (spawning, collisions, scoring)
//! - `scrollmap`: Scroll-position mapper (timeline marker, section colors)
//! - `carousel`: Slide index and pixel-offset tracking
//! - `fx`: Decorative easter-egg animations (snow, hikers, grand prix lap)
//! - `render`: 2D canvas painter for the minigame
//! - `tuning`: Data-driven game balance

pub mod carousel;
pub mod fx;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod scrollmap;
pub mod sim;
pub mod tuning;

pub use carousel::Carousel;
pub use tuning::Tuning;

/// Page and gameplay layout constants
pub mod consts {
    use crate::scrollmap::Rgb;

    /// Horizontal lane centers as fractions of the field width
    pub const LANE_CENTER_FRACS: [f32; 2] = [0.25, 0.75];
    /// Gap between the car's bottom edge and the bottom of the field
    pub const CAR_BOTTOM_MARGIN: f32 = 24.0;

    /// Marker is flagged idle after this long without a scroll event (ms)
    pub const SCROLL_IDLE_MS: f64 = 150.0;
    /// Fade-in elements reveal once their top passes this fraction of the viewport
    pub const REVEAL_VIEWPORT_FRAC: f32 = 0.85;

    /// Section background gradient endpoints (first section -> last section)
    pub const SECTION_COLOR_START: Rgb = Rgb::new(15, 23, 42);
    pub const SECTION_COLOR_END: Rgb = Rgb::new(30, 58, 74);
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse lerp: where `v` sits between `a` and `b`, clamped to [0, 1].
/// A degenerate span (`a == b`) yields 0 rather than dividing by zero.
#[inline]
pub fn inv_lerp(a: f32, b: f32, v: f32) -> f32 {
    let span = b - a;
    if span == 0.0 {
        return 0.0;
    }
    clamp01((v - a) / span)
}

/// Clamp to [0, 1]
#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inv_lerp_basic() {
        assert_eq!(inv_lerp(100.0, 500.0, 300.0), 0.5);
        assert_eq!(inv_lerp(100.0, 500.0, 100.0), 0.0);
        assert_eq!(inv_lerp(100.0, 500.0, 500.0), 1.0);
    }

    #[test]
    fn test_inv_lerp_clamps_outside_span() {
        assert_eq!(inv_lerp(100.0, 500.0, -50.0), 0.0);
        assert_eq!(inv_lerp(100.0, 500.0, 900.0), 1.0);
    }

    #[test]
    fn test_inv_lerp_zero_span() {
        // Zero-height gap must not divide by zero
        assert_eq!(inv_lerp(250.0, 250.0, 250.0), 0.0);
        assert_eq!(inv_lerp(250.0, 250.0, 400.0), 0.0);
    }
}

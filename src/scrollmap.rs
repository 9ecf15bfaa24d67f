//! Scroll-position mapping for the journey timeline
//!
//! Pure measurement math: section centers and dot anchors go in, marker
//! placement, active-dot choice, and palette values come out. All DOM
//! reads and writes stay in the platform layer.

use std::fmt;

/// 8-bit color with integer-rounded channel lerp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear blend toward `other`, rounded to the nearest
    /// integer. `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = crate::clamp01(t);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }

    /// CSS `rgb(...)` string for inline styles
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Background color for the section at `ordinal` of `count`, blended
/// along the page rather than the scroll position. A single section
/// keeps the start color.
pub fn section_color(ordinal: usize, count: usize, start: Rgb, end: Rgb) -> Rgb {
    if count <= 1 {
        return start;
    }
    let t = ordinal as f32 / (count - 1) as f32;
    start.lerp(end, t)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollMapError {
    Empty,
    LengthMismatch { centers: usize, anchors: usize },
}

impl fmt::Display for ScrollMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollMapError::Empty => write!(f, "section map needs at least one section"),
            ScrollMapError::LengthMismatch { centers, anchors } => write!(
                f,
                "section map has {centers} centers but {anchors} anchors"
            ),
        }
    }
}

impl std::error::Error for ScrollMapError {}

/// Where the viewport center sits between two adjacent section centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub lower: usize,
    pub upper: usize,
    /// Progress from `lower` toward `upper`, in [0, 1]
    pub progress: f64,
}

/// Ordered section centers paired with timeline dot anchors, both in
/// document coordinates.
#[derive(Debug, Clone)]
pub struct SectionMap {
    centers: Vec<f64>,
    anchors: Vec<f64>,
}

impl SectionMap {
    pub fn new(centers: Vec<f64>, anchors: Vec<f64>) -> Result<Self, ScrollMapError> {
        if centers.is_empty() {
            return Err(ScrollMapError::Empty);
        }
        if centers.len() != anchors.len() {
            return Err(ScrollMapError::LengthMismatch {
                centers: centers.len(),
                anchors: anchors.len(),
            });
        }
        Ok(Self { centers, anchors })
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Bracket `viewport_center` between two adjacent section centers.
    ///
    /// Outside the mapped range the nearest end pair is returned with
    /// progress pinned to 0 or 1; a zero-height gap never divides.
    pub fn locate(&self, viewport_center: f64) -> Placement {
        let n = self.centers.len();
        if n == 1 {
            return Placement { lower: 0, upper: 0, progress: 0.0 };
        }

        let passed = self
            .centers
            .iter()
            .take_while(|&&c| c <= viewport_center)
            .count();
        let lower = passed.saturating_sub(1).min(n - 2);
        let upper = lower + 1;

        let (a, b) = (self.centers[lower], self.centers[upper]);
        let span = b - a;
        let progress = if span == 0.0 {
            0.0
        } else {
            ((viewport_center - a) / span).clamp(0.0, 1.0)
        };

        Placement { lower, upper, progress }
    }

    /// Marker y for a placement: the matching anchors blended by the
    /// placement's progress.
    pub fn marker_pos(&self, placement: &Placement) -> f64 {
        let a = self.anchors[placement.lower];
        let b = self.anchors[placement.upper];
        a + (b - a) * placement.progress
    }

    /// Index of the nearest section, for the active-dot highlight
    pub fn active_index(&self, placement: &Placement) -> usize {
        if placement.progress < 0.5 {
            placement.lower
        } else {
            placement.upper
        }
    }
}

/// Direction of the latest scroll movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn as_class(&self) -> &'static str {
        match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
        }
    }
}

/// Last scroll offset and event time; classifies direction and idleness
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    last_y: f64,
    last_event_ms: f64,
    idle_after_ms: f64,
}

impl ScrollTracker {
    pub fn new(idle_after_ms: f64) -> Self {
        Self { last_y: 0.0, last_event_ms: 0.0, idle_after_ms }
    }

    /// Record a scroll offset. Moving to a smaller offset is `Up`;
    /// anything else, including an unchanged offset, is `Down`.
    pub fn observe(&mut self, y: f64, now_ms: f64) -> ScrollDirection {
        let direction = if y < self.last_y {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        self.last_y = y;
        self.last_event_ms = now_ms;
        direction
    }

    /// True once `idle_after_ms` has passed without an observation
    pub fn is_idle(&self, now_ms: f64) -> bool {
        now_ms - self.last_event_ms >= self.idle_after_ms
    }
}

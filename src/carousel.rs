//! Slide index and pixel-offset tracking for the image carousel
//!
//! The track slides by the summed widths of everything before the current
//! slide, so widths may be zero until their images decode and get
//! re-measured.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    NoSlides,
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::NoSlides => write!(f, "carousel needs at least one slide"),
        }
    }
}

impl std::error::Error for CarouselError {}

#[derive(Debug, Clone)]
pub struct Carousel {
    widths: Vec<f64>,
    index: usize,
}

impl Carousel {
    /// Build from per-slide pixel widths. Zero widths are fine (images
    /// not decoded yet); an empty slide list is not.
    pub fn new(widths: Vec<f64>) -> Result<Self, CarouselError> {
        if widths.is_empty() {
            return Err(CarouselError::NoSlides);
        }
        Ok(Self { widths, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Pixel offset of the current slide: the widths of every slide
    /// before it, summed.
    pub fn offset(&self) -> f64 {
        self.widths[..self.index].iter().sum()
    }

    /// Width of the current slide; the viewport is resized to exactly this
    pub fn current_width(&self) -> f64 {
        self.widths[self.index]
    }

    /// Advance one slide, wrapping past the end
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.widths.len();
    }

    /// Step back one slide, wrapping before the start
    pub fn prev(&mut self) {
        self.index = (self.index + self.widths.len() - 1) % self.widths.len();
    }

    /// Replace one slide's width after a late measurement (image `load`)
    pub fn set_width(&mut self, index: usize, width: f64) {
        self.widths[index] = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn carousel() -> Carousel {
        Carousel::new(vec![200.0, 300.0, 250.0, 400.0]).expect("non-empty")
    }

    #[test]
    fn test_rejects_empty_slide_list() {
        assert_eq!(Carousel::new(vec![]).unwrap_err(), CarouselError::NoSlides);
    }

    #[test]
    fn test_offset_sums_preceding_widths() {
        let mut c = carousel();
        assert_eq!(c.offset(), 0.0);
        c.next();
        assert_eq!(c.offset(), 200.0);
        c.next();
        assert_eq!(c.index(), 2);
        assert_eq!(c.offset(), 500.0);
        assert_eq!(c.current_width(), 250.0);
    }

    #[test]
    fn test_wraps_both_directions() {
        let mut c = carousel();
        c.next();
        c.next();
        c.next();
        assert_eq!(c.index(), 3);
        assert_eq!(c.offset(), 750.0);
        c.next();
        assert_eq!(c.index(), 0);
        assert_eq!(c.offset(), 0.0);

        c.prev();
        assert_eq!(c.index(), 3);
        assert_eq!(c.offset(), 750.0);
    }

    #[test]
    fn test_single_slide_wraps_to_itself() {
        let mut c = Carousel::new(vec![640.0]).expect("non-empty");
        c.next();
        assert_eq!(c.index(), 0);
        c.prev();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_late_measurement_updates_offsets() {
        // Widths unknown until the images decode
        let mut c = Carousel::new(vec![0.0, 0.0, 0.0]).expect("non-empty");
        c.next();
        c.next();
        assert_eq!(c.offset(), 0.0);

        c.set_width(0, 280.0);
        c.set_width(1, 320.0);
        assert_eq!(c.offset(), 600.0);
        assert_eq!(c.current_width(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_offset_is_prefix_sum(
            widths in prop::collection::vec(0.0f64..2_000.0, 1..10),
            steps in 0usize..30,
        ) {
            let mut c = Carousel::new(widths.clone()).expect("non-empty");
            for _ in 0..steps {
                c.next();
            }
            let expected: f64 = widths[..steps % widths.len()].iter().sum();
            prop_assert_eq!(c.index(), steps % widths.len());
            prop_assert!((c.offset() - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_next_then_prev_is_identity(
            widths in prop::collection::vec(0.0f64..2_000.0, 1..10),
            start in 0usize..10,
        ) {
            let mut c = Carousel::new(widths.clone()).expect("non-empty");
            for _ in 0..start {
                c.next();
            }
            let before = c.index();
            c.next();
            c.prev();
            prop_assert_eq!(c.index(), before);
        }
    }
}

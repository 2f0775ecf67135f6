//! Scroll container geometry
//!
//! Slides are stacked vertically; the viewport is a window over that strip.
//! All measurements are in layout units (the terminal front end maps cells
//! to units).

use std::time::Instant;

use crate::scroll::{ScrollAnimator, ScrollConfig};

#[derive(Debug, Clone)]
pub struct Viewport {
    width: f64,
    height: f64,
    /// Height of each slide
    heights: Vec<f64>,
    /// Top offset of each slide within the strip
    offsets: Vec<f64>,
    /// Every slide is exactly one viewport tall
    full_viewport: bool,
    scroller: ScrollAnimator,
}

impl Viewport {
    /// Viewport over `slide_count` full-viewport slides
    pub fn new(width: f64, height: f64, slide_count: usize, scroll: ScrollConfig) -> Self {
        let mut viewport = Self {
            width,
            height,
            heights: vec![height; slide_count],
            offsets: Vec::new(),
            full_viewport: true,
            scroller: ScrollAnimator::new(scroll),
        };
        viewport.relayout();
        viewport
    }

    /// Viewport over slides of arbitrary heights
    pub fn with_slide_heights(
        width: f64,
        height: f64,
        heights: Vec<f64>,
        scroll: ScrollConfig,
    ) -> Self {
        let mut viewport = Self {
            width,
            height,
            heights,
            offsets: Vec::new(),
            full_viewport: false,
            scroller: ScrollAnimator::new(scroll),
        };
        viewport.relayout();
        viewport
    }

    fn relayout(&mut self) {
        let mut top = 0.0;
        self.offsets = self
            .heights
            .iter()
            .map(|h| {
                let offset = top;
                top += h;
                offset
            })
            .collect();
    }

    /// Change the viewport size; full-viewport slides follow the new height
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        if self.full_viewport {
            self.heights.iter_mut().for_each(|h| *h = height);
            self.relayout();
        }
        self.scroller.cancel();
        let clamped = self.scroller.current_scroll().min(self.max_scroll());
        self.scroller.set_scroll(clamped);
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.heights.len()
    }

    pub fn slide_height(&self, index: usize) -> Option<f64> {
        self.heights.get(index).copied()
    }

    /// Current scroll offset of the viewport top
    #[inline]
    pub fn scroll_top(&self) -> f64 {
        self.scroller.current_scroll()
    }

    pub fn content_height(&self) -> f64 {
        self.heights.iter().sum()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - self.height).max(0.0)
    }

    /// Offset of a slide's top edge within the strip
    pub fn slide_offset(&self, index: usize) -> Option<f64> {
        self.offsets.get(index).copied()
    }

    /// Slide top edge relative to the viewport top (negative when above)
    pub fn slide_top(&self, index: usize) -> Option<f64> {
        self.slide_offset(index).map(|offset| offset - self.scroll_top())
    }

    /// Fraction of the slide currently inside the viewport, in [0, 1]
    pub fn intersection_ratio(&self, index: usize) -> f64 {
        let (Some(top), Some(height)) = (self.slide_top(index), self.slide_height(index)) else {
            return 0.0;
        };
        if height <= 0.0 {
            return 0.0;
        }
        let visible = (top + height).min(self.height) - top.max(0.0);
        (visible / height).clamp(0.0, 1.0)
    }

    /// Smoothly align the slide's top edge with the viewport top
    pub fn scroll_into_view(&mut self, index: usize, now: Instant) -> bool {
        let Some(offset) = self.slide_offset(index) else {
            return false;
        };
        let max = self.max_scroll();
        self.scroller.scroll_to(offset, max, now);
        true
    }

    /// Host scrolling that applies when an event is not prevented
    pub fn native_scroll(&mut self, delta: f64) {
        let max = self.max_scroll();
        self.scroller.scroll_by(delta, max);
    }

    /// Jump without animation
    pub fn set_scroll_top(&mut self, scroll: f64) {
        self.scroller.set_scroll(scroll.clamp(0.0, self.max_scroll()));
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroller.needs_update()
    }

    /// Advance the scroll animation; returns true if the position moved
    pub fn update(&mut self, now: Instant) -> bool {
        let before = self.scroller.current_scroll();
        let max = self.max_scroll();
        let after = self.scroller.update(max, now);
        (after - before).abs() > f64::EPSILON
    }
}

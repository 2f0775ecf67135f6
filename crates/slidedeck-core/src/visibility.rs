//! Tracks which slides are in view, independently of how navigation got there

use tracing::debug;

use crate::nav::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered(usize),
    Left(usize),
}

/// Per-slide markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideVisibility {
    /// Slide is in view
    pub active: bool,
    /// `animate` blocks of the slide are revealed
    pub animate_in_view: bool,
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    mark_animate: bool,
    slides: Vec<SlideVisibility>,
}

impl VisibilityObserver {
    pub fn new(slide_count: usize, threshold: f64, mark_animate: bool) -> Self {
        Self {
            threshold,
            mark_animate,
            slides: vec![SlideVisibility::default(); slide_count],
        }
    }

    pub fn slide(&self, index: usize) -> SlideVisibility {
        self.slides.get(index).copied().unwrap_or_default()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slide(index).active
    }

    /// Whether `animate` blocks on the slide should be shown
    pub fn is_animate_in_view(&self, index: usize) -> bool {
        self.slide(index).animate_in_view
    }

    /// Recompute intersections and report slides that crossed the threshold
    ///
    /// Markers are updated before returning; reactions to the changes (dot
    /// sync, stat animation) belong to the caller.
    pub fn observe(&mut self, viewport: &Viewport) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        for (idx, slide) in self.slides.iter_mut().enumerate() {
            let in_view = viewport.intersection_ratio(idx) >= self.threshold;
            if in_view == slide.active {
                continue;
            }

            if in_view {
                slide.active = true;
                slide.animate_in_view = self.mark_animate;
                changes.push(VisibilityChange::Entered(idx));
            } else {
                slide.active = false;
                slide.animate_in_view = false;
                changes.push(VisibilityChange::Left(idx));
            }
            debug!("Slide {} visibility changed: in view = {}", idx, in_view);
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::ScrollConfig;

    fn viewport(slides: usize) -> Viewport {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        Viewport::new(1000.0, 500.0, slides, config)
    }

    #[test]
    fn test_first_pass_reports_initial_slide() {
        let viewport = viewport(3);
        let mut observer = VisibilityObserver::new(3, 0.55, true);
        assert_eq!(observer.observe(&viewport), vec![VisibilityChange::Entered(0)]);
        assert!(observer.is_active(0));
        assert!(observer.is_animate_in_view(0));
        assert!(observer.observe(&viewport).is_empty());
    }

    #[test]
    fn test_threshold_crossing() {
        let mut viewport = viewport(3);
        let mut observer = VisibilityObserver::new(3, 0.55, true);
        observer.observe(&viewport);

        // slide 0 at 0.6, slide 1 at 0.4: nothing changes
        viewport.set_scroll_top(200.0);
        assert!(observer.observe(&viewport).is_empty());

        // slide 0 at 0.4, slide 1 at 0.6
        viewport.set_scroll_top(300.0);
        assert_eq!(
            observer.observe(&viewport),
            vec![VisibilityChange::Left(0), VisibilityChange::Entered(1)]
        );
        assert!(!observer.is_active(0));
        assert!(!observer.is_animate_in_view(0));
        assert!(observer.is_active(1));
    }

    #[test]
    fn test_reentry_reports_again() {
        let mut viewport = viewport(2);
        let mut observer = VisibilityObserver::new(2, 0.55, true);
        observer.observe(&viewport);
        viewport.set_scroll_top(500.0);
        observer.observe(&viewport);
        viewport.set_scroll_top(0.0);
        assert_eq!(
            observer.observe(&viewport),
            vec![VisibilityChange::Entered(0), VisibilityChange::Left(1)]
        );
    }

    #[test]
    fn test_animate_marking_can_be_disabled() {
        let viewport = viewport(1);
        let mut observer = VisibilityObserver::new(1, 0.55, false);
        observer.observe(&viewport);
        assert!(observer.is_active(0));
        assert!(!observer.is_animate_in_view(0));
    }

    #[test]
    fn test_out_of_range_slide_is_inactive() {
        let observer = VisibilityObserver::new(1, 0.55, true);
        assert_eq!(observer.slide(5), SlideVisibility::default());
    }
}

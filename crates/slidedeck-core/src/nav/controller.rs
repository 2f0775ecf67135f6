use std::time::{Duration, Instant};

use tracing::debug;

use super::dots::NavDots;
use super::state::NavigationState;
use super::viewport::Viewport;
use crate::config::NavigationConfig;

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
}

impl NavKey {
    fn is_forward(self) -> bool {
        matches!(self, NavKey::ArrowDown | NavKey::PageDown)
    }
}

/// What the controller did with an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavOutcome {
    /// The host must not run its native behavior for the event
    pub default_prevented: bool,
    /// Slide navigated to, if any
    pub target: Option<usize>,
}

impl NavOutcome {
    fn passthrough() -> Self {
        Self::default()
    }

    fn prevented() -> Self {
        Self {
            default_prevented: true,
            target: None,
        }
    }
}

/// Turns wheel, touch and key input into a single current-slide state
#[derive(Debug, Clone)]
pub struct NavigationController {
    config: NavigationConfig,
    state: NavigationState,
    dots: NavDots,
    viewport: Viewport,
}

impl NavigationController {
    pub fn new(config: NavigationConfig, viewport: Viewport) -> Self {
        let dots = NavDots::new(viewport.slide_count());
        Self {
            config,
            state: NavigationState::new(),
            dots,
            viewport,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn dots(&self) -> &NavDots {
        &self.dots
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.viewport.slide_count()
    }

    fn last_index(&self) -> usize {
        self.slide_count().saturating_sub(1)
    }

    /// Smoothly scroll to `index` and sync the dots
    ///
    /// An index that resolves to no slide is ignored.
    pub fn scroll_to_slide(&mut self, index: usize, now: Instant) -> bool {
        if !self.viewport.scroll_into_view(index, now) {
            debug!("Ignoring navigation to missing slide {}", index);
            return false;
        }
        debug!("Navigating to slide {}", index);
        self.state.current_index = index;
        self.dots.set_active(index);
        true
    }

    /// Slide whose top edge is nearest the viewport top
    ///
    /// Ties resolve to the lowest index.
    pub fn current_slide_index(&self) -> usize {
        let mut closest = 0;
        let mut min_dist = f64::INFINITY;
        for idx in 0..self.slide_count() {
            let Some(top) = self.viewport.slide_top(idx) else {
                continue;
            };
            let dist = top.abs();
            if dist < min_dist {
                min_dist = dist;
                closest = idx;
            }
        }
        closest
    }

    /// Sync the active dot without navigating
    pub fn sync_dot(&mut self, index: usize) {
        self.dots.set_active(index);
    }

    fn step(&mut self, forward: bool, now: Instant) -> Option<usize> {
        let current = self.current_slide_index();
        let target = if forward {
            (current + 1).min(self.last_index())
        } else {
            current.saturating_sub(1)
        };
        self.scroll_to_slide(target, now).then_some(target)
    }

    /// Wheel input; hijacked only on wide viewports
    pub fn handle_wheel(&mut self, delta_y: f64, now: Instant) -> NavOutcome {
        if self.viewport.width() <= self.config.wheel_breakpoint {
            return NavOutcome::passthrough();
        }

        if self.state.is_throttled(now) {
            debug!("Wheel event dropped inside debounce window");
            return NavOutcome::prevented();
        }
        self.state
            .throttle(now, Duration::from_millis(self.config.debounce_ms));

        NavOutcome {
            default_prevented: true,
            target: self.step(delta_y > 0.0, now),
        }
    }

    pub fn handle_touch_start(&mut self, y: f64) -> NavOutcome {
        if self.config.enable_custom_touch_swipe {
            self.state.touch_start_y = Some(y);
        }
        NavOutcome::passthrough()
    }

    /// Swipe up (start below end) advances, swipe down retreats
    pub fn handle_touch_end(&mut self, y: f64, now: Instant) -> NavOutcome {
        if !self.config.enable_custom_touch_swipe {
            return NavOutcome::passthrough();
        }
        let Some(start) = self.state.touch_start_y.take() else {
            return NavOutcome::passthrough();
        };

        let diff = start - y;
        if diff.abs() <= self.config.swipe_threshold {
            return NavOutcome::passthrough();
        }

        NavOutcome {
            default_prevented: false,
            target: self.step(diff > 0.0, now),
        }
    }

    pub fn handle_key(&mut self, key: NavKey, now: Instant) -> NavOutcome {
        NavOutcome {
            default_prevented: self.config.suppress_default_arrow_key_scroll,
            target: self.step(key.is_forward(), now),
        }
    }

    /// Advance the scroll animation and expire the debounce window
    pub fn update(&mut self, now: Instant) -> bool {
        self.state.expire_throttle(now);
        self.viewport.update(now)
    }
}

use std::time::{Duration, Instant};

/// Mutable navigation state owned by the controller
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Index of the slide last navigated to
    pub current_index: usize,
    /// End of the wheel debounce window, if one is open
    throttled_until: Option<Instant>,
    /// Y coordinate recorded at touch start
    pub touch_start_y: Option<f64>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only inside an open debounce window
    pub fn is_throttled(&self, now: Instant) -> bool {
        self.throttled_until.is_some_and(|until| now < until)
    }

    /// Open a debounce window of `window` starting at `now`
    pub fn throttle(&mut self, now: Instant, window: Duration) {
        self.throttled_until = Some(now + window);
    }

    /// Drop an expired window
    pub fn expire_throttle(&mut self, now: Instant) {
        if !self.is_throttled(now) {
            self.throttled_until = None;
        }
    }

    pub fn has_throttle(&self) -> bool {
        self.throttled_until.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_window() {
        let mut state = NavigationState::new();
        let t0 = Instant::now();
        assert!(!state.is_throttled(t0));

        state.throttle(t0, Duration::from_millis(600));
        assert!(state.is_throttled(t0));
        assert!(state.is_throttled(t0 + Duration::from_millis(599)));
        assert!(!state.is_throttled(t0 + Duration::from_millis(600)));

        state.expire_throttle(t0 + Duration::from_millis(100));
        assert!(state.has_throttle());
        state.expire_throttle(t0 + Duration::from_millis(700));
        assert!(!state.has_throttle());
    }
}

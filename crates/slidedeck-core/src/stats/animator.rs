use std::time::{Duration, Instant};

use tracing::debug;

use super::format::{parse_target, StatFormat};
use crate::config::StatsConfig;
use crate::deck::{BlockKind, Deck};
use crate::scroll::timing::progress;
use crate::scroll::{EasingType, EasingTypeExt};

#[derive(Debug, Clone)]
struct CountAnimation {
    start: Instant,
    target: f64,
    format: StatFormat,
}

/// One numeric display widget
#[derive(Debug, Clone)]
pub struct StatWidget {
    pub slide: usize,
    pub block: usize,
    original: String,
    display: String,
    /// Set once the count-up has started; never cleared
    counted: bool,
    animation: Option<CountAnimation>,
}

impl StatWidget {
    pub fn new(slide: usize, block: usize, text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            slide,
            block,
            display: original.clone(),
            original,
            counted: false,
            animation: None,
        }
    }

    /// Text currently shown
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_counted(&self) -> bool {
        self.counted
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

/// Count-up animation for stat widgets
#[derive(Debug, Clone)]
pub struct StatsAnimator {
    widgets: Vec<StatWidget>,
    duration: Duration,
    easing: EasingType,
}

impl StatsAnimator {
    pub fn new(config: &StatsConfig, widgets: Vec<StatWidget>) -> Self {
        Self {
            widgets,
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing,
        }
    }

    /// Collect every stat block of the deck
    pub fn from_deck(config: &StatsConfig, deck: &Deck) -> Self {
        let widgets = deck
            .slides
            .iter()
            .flat_map(|slide| {
                slide
                    .blocks
                    .iter()
                    .enumerate()
                    .filter_map(move |(block_idx, block)| match &block.kind {
                        BlockKind::Stat { value, .. } => {
                            Some(StatWidget::new(slide.index, block_idx, value.clone()))
                        }
                        _ => None,
                    })
            })
            .collect();
        Self::new(config, widgets)
    }

    pub fn widgets(&self) -> &[StatWidget] {
        &self.widgets
    }

    pub fn widget(&self, slide: usize, block: usize) -> Option<&StatWidget> {
        self.widgets
            .iter()
            .find(|w| w.slide == slide && w.block == block)
    }

    /// Start counting every not-yet-counted widget on `slide`
    ///
    /// Returns how many animations were started. Widgets without a numeric
    /// value stay static.
    pub fn animate_stats(&mut self, slide: usize, now: Instant) -> usize {
        let mut started = 0;
        for widget in self.widgets.iter_mut().filter(|w| w.slide == slide) {
            if widget.counted {
                continue;
            }
            let Some(target) = parse_target(&widget.original) else {
                continue;
            };

            widget.counted = true;
            widget.animation = Some(CountAnimation {
                start: now,
                target,
                format: StatFormat::infer(&widget.original),
            });
            started += 1;
            debug!(
                "Counting stat '{}' on slide {} up to {}",
                widget.original, slide, target
            );
        }
        started
    }

    pub fn is_animating(&self) -> bool {
        self.widgets.iter().any(StatWidget::is_animating)
    }

    /// Render one frame of every running animation
    ///
    /// Returns true if any displayed text changed.
    pub fn update(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for widget in &mut self.widgets {
            let Some(anim) = &widget.animation else {
                continue;
            };

            let t = progress(anim.start, self.duration, now);
            let text = if t >= 1.0 {
                widget.animation = None;
                widget.original.clone()
            } else {
                let value = (self.easing.apply(t) * anim.target).floor().max(0.0) as u64;
                anim.format.render(value)
            };

            if text != widget.display {
                widget.display = text;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator(values: &[&str]) -> StatsAnimator {
        let widgets = values
            .iter()
            .enumerate()
            .map(|(i, v)| StatWidget::new(0, i, *v))
            .collect();
        StatsAnimator::new(&StatsConfig::default(), widgets)
    }

    fn at(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn test_counts_up_with_quartic_ease() {
        let mut stats = animator(&["94%"]);
        let t0 = Instant::now();
        assert_eq!(stats.animate_stats(0, t0), 1);

        stats.update(t0);
        assert_eq!(stats.widgets()[0].display(), "0%");

        // progress 0.5 -> eased 0.9375 -> floor(88.125)
        stats.update(at(t0, 1000));
        assert_eq!(stats.widgets()[0].display(), "88%");

        stats.update(at(t0, 2000));
        assert_eq!(stats.widgets()[0].display(), "94%");
        assert!(!stats.is_animating());
    }

    #[test]
    fn test_suffix_formats_preserved_mid_animation() {
        let mut stats = animator(&["$20B+", "300k", "1200"]);
        let t0 = Instant::now();
        assert_eq!(stats.animate_stats(0, t0), 3);

        stats.update(at(t0, 1000));
        let shown: Vec<&str> = stats.widgets().iter().map(|w| w.display()).collect();
        assert_eq!(shown, vec!["$18B+", "281k", "1125"]);
    }

    #[test]
    fn test_final_text_is_exact_original() {
        let mut stats = animator(&["2.5k"]);
        let t0 = Instant::now();
        stats.animate_stats(0, t0);
        stats.update(at(t0, 1999));
        assert_eq!(stats.widgets()[0].display(), "2k");
        stats.update(at(t0, 2500));
        assert_eq!(stats.widgets()[0].display(), "2.5k");
    }

    #[test]
    fn test_animate_is_idempotent() {
        let mut stats = animator(&["94%"]);
        let t0 = Instant::now();
        assert_eq!(stats.animate_stats(0, t0), 1);
        assert_eq!(stats.animate_stats(0, at(t0, 10)), 0);

        stats.update(at(t0, 2000));
        assert_eq!(stats.animate_stats(0, at(t0, 3000)), 0);
        assert!(!stats.is_animating());
        assert_eq!(stats.widgets()[0].display(), "94%");
        assert!(stats.widgets()[0].is_counted());
    }

    #[test]
    fn test_static_text_is_skipped() {
        let mut stats = animator(&["N/A", "0"]);
        assert_eq!(stats.animate_stats(0, Instant::now()), 0);
        assert!(!stats.widgets()[0].is_counted());
        assert_eq!(stats.widgets()[1].display(), "0");
    }

    #[test]
    fn test_only_requested_slide_animates() {
        let widgets = vec![StatWidget::new(0, 0, "10"), StatWidget::new(1, 0, "20")];
        let mut stats = StatsAnimator::new(&StatsConfig::default(), widgets);
        assert_eq!(stats.animate_stats(1, Instant::now()), 1);
        assert!(!stats.widget(0, 0).unwrap().is_counted());
        assert!(stats.widget(1, 0).unwrap().is_counted());
    }

    #[test]
    fn test_from_deck() {
        let deck = Deck::bundled().unwrap();
        let stats = StatsAnimator::from_deck(&StatsConfig::default(), &deck);
        assert_eq!(stats.widgets().len(), 3);
        assert_eq!(stats.widget(1, 0).unwrap().original(), "94%");
    }
}

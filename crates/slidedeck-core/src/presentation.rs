//! The interactive core as one object
//!
//! `Presentation` plays the part of the page: it owns every controller,
//! receives input events from the host, and runs the host's native scroll
//! behavior for events the controllers did not prevent. Time is always
//! passed in, never read.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::deck::{Deck, SlideRegistry};
use crate::nav::{NavKey, NavOutcome, NavigationController, Viewport};
use crate::password::PasswordField;
use crate::quiz::{AnswerOutcome, QuizController};
use crate::stats::StatsAnimator;
use crate::visibility::{VisibilityChange, VisibilityObserver};

/// Input dispatched by the host runtime
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Key(NavKey),
    /// Nav dot button pressed
    DotClicked(usize),
    /// Start control activated
    StartActivated,
    /// Quiz option clicked; `question` is the deck-wide ordinal
    OptionSelected { question: usize, option: usize },
    /// New full value of the password field
    PasswordInput(String),
    Resize { width: f64, height: f64 },
}

pub struct Presentation {
    deck: Deck,
    registry: SlideRegistry,
    nav: NavigationController,
    observer: VisibilityObserver,
    stats: StatsAnimator,
    quiz: QuizController,
    /// Present only if the deck has a password block
    password: Option<PasswordField>,
    native_scroll_step: f64,
    /// Touch start for native drag scrolling
    native_touch_start: Option<f64>,
}

impl Presentation {
    pub fn new(deck: Deck, config: &AppConfig, width: f64, height: f64, now: Instant) -> Self {
        let registry = SlideRegistry::from_deck(&deck);
        let viewport = Viewport::new(width, height, registry.len(), config.ui.scroll.clone());
        let nav = NavigationController::new(config.navigation.clone(), viewport);
        let observer = VisibilityObserver::new(
            registry.len(),
            config.navigation.visibility_threshold,
            config.navigation.legacy_animate_class_support,
        );
        let stats = StatsAnimator::from_deck(&config.stats, &deck);
        let quiz = QuizController::from_deck(&deck);
        let password = registry
            .iter()
            .any(|s| s.has_password)
            .then(|| PasswordField::new(deck.strings.password.clone()));

        info!(
            "Presenting '{}' ({} slides, {} quiz questions, password meter: {})",
            deck.title,
            registry.len(),
            quiz.total(),
            password.is_some()
        );

        let mut presentation = Self {
            deck,
            registry,
            nav,
            observer,
            stats,
            quiz,
            password,
            native_scroll_step: config.ui.scroll.native_scroll_step,
            native_touch_start: None,
        };
        // Initial observation reports the slide visible at load
        presentation.observe(now);
        presentation
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn viewport(&self) -> &Viewport {
        self.nav.viewport()
    }

    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    pub fn stats(&self) -> &StatsAnimator {
        &self.stats
    }

    pub fn quiz(&self) -> &QuizController {
        &self.quiz
    }

    pub fn password(&self) -> Option<&PasswordField> {
        self.password.as_ref()
    }

    pub fn current_slide_index(&self) -> usize {
        self.nav.current_slide_index()
    }

    pub fn scroll_to_slide(&mut self, index: usize, now: Instant) -> bool {
        self.nav.scroll_to_slide(index, now)
    }

    /// Handle one input event
    pub fn dispatch(&mut self, event: InputEvent, now: Instant) -> NavOutcome {
        match event {
            InputEvent::Wheel { delta_y } => {
                let outcome = self.nav.handle_wheel(delta_y, now);
                if !outcome.default_prevented {
                    self.nav.viewport_mut().native_scroll(delta_y);
                }
                outcome
            }
            InputEvent::TouchStart { y } => {
                self.native_touch_start = Some(y);
                self.nav.handle_touch_start(y)
            }
            InputEvent::TouchEnd { y } => {
                let start = self.native_touch_start.take();
                let outcome = self.nav.handle_touch_end(y, now);
                if !self.nav.config().enable_custom_touch_swipe {
                    if let Some(start) = start {
                        self.nav.viewport_mut().native_scroll(start - y);
                    }
                }
                outcome
            }
            InputEvent::Key(key) => {
                let outcome = self.nav.handle_key(key, now);
                if !outcome.default_prevented {
                    let delta = self.native_key_delta(key);
                    self.nav.viewport_mut().native_scroll(delta);
                }
                outcome
            }
            InputEvent::DotClicked(index) => self.navigate(index, now),
            InputEvent::StartActivated => {
                if self.registry.iter().any(|s| s.has_start) {
                    self.navigate(1, now)
                } else {
                    NavOutcome::default()
                }
            }
            InputEvent::OptionSelected { question, option } => {
                self.select_option(question, option);
                NavOutcome::default()
            }
            InputEvent::PasswordInput(value) => {
                if let Some(field) = self.password.as_mut() {
                    field.set_value(value);
                }
                NavOutcome::default()
            }
            InputEvent::Resize { width, height } => {
                let index = self.nav.current_slide_index();
                self.nav.viewport_mut().resize(width, height);
                if let Some(offset) = self.nav.viewport().slide_offset(index) {
                    self.nav.viewport_mut().set_scroll_top(offset);
                }
                NavOutcome::default()
            }
        }
    }

    fn navigate(&mut self, index: usize, now: Instant) -> NavOutcome {
        NavOutcome {
            default_prevented: true,
            target: self.nav.scroll_to_slide(index, now).then_some(index),
        }
    }

    pub fn select_option(&mut self, question: usize, option: usize) -> Option<AnswerOutcome> {
        self.quiz.select(question, option)
    }

    fn native_key_delta(&self, key: NavKey) -> f64 {
        let page = self.nav.viewport().height();
        match key {
            NavKey::ArrowDown => self.native_scroll_step,
            NavKey::ArrowUp => -self.native_scroll_step,
            NavKey::PageDown => page,
            NavKey::PageUp => -page,
        }
    }

    fn observe(&mut self, now: Instant) -> bool {
        let changes = self.observer.observe(self.nav.viewport());
        let sync_dots = self.nav.config().sync_dots_on_visibility;
        let mut changed = !changes.is_empty();

        for change in changes {
            let VisibilityChange::Entered(index) = change else {
                continue;
            };
            if sync_dots {
                self.nav.sync_dot(index);
            }
            if self.registry.get(index).is_some_and(|s| s.has_stats()) {
                let started = self.stats.animate_stats(index, now);
                if started > 0 {
                    debug!("Started {} stat animations on slide {}", started, index);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Advance one frame: scroll, visibility, stat counters
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let scrolled = self.nav.update(now);
        let observed = self.observe(now);
        let counted = self.stats.update(now);
        scrolled || observed || counted
    }

    /// Whether the host should keep ticking at animation rate
    pub fn needs_frame(&self) -> bool {
        self.nav.viewport().is_scrolling() || self.stats.is_animating()
    }
}

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use slidedeck_core::deck::Deck;
use slidedeck_core::{AppConfig, InputEvent, Presentation};
use tracing::debug;

use crate::theme::Theme;

/// Layout units per mouse wheel notch
pub const WHEEL_DELTA: f64 = 100.0;

/// Width of the nav dots column in cells
const DOTS_WIDTH: u16 = 4;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Help overlay
    Help,
}

/// Clickable screen element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Dot(usize),
    QuizOption { question: usize, option: usize },
    Start,
    Password,
}

/// Screen regions of the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub content: Rect,
    pub dots: Rect,
    pub status: Option<Rect>,
}

impl AppLayout {
    pub fn new(area: Rect, show_status_bar: bool) -> Self {
        let (main, status) = if show_status_bar {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);
            (rows[0], Some(rows[1]))
        } else {
            (area, None)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(DOTS_WIDTH)])
            .split(main);

        Self {
            content: columns[0],
            dots: columns[1],
            status,
        }
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub presentation: Presentation,
    pub theme: Theme,
    pub mode: Mode,
    /// Focused quiz option as (question ordinal, option)
    pub focused_option: Option<(usize, usize)>,
    /// Click targets recorded by the last draw
    pub hit_map: Vec<(Rect, HitTarget)>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    content_area: Rect,
    /// Cell where the left button went down
    pressed_at: Option<(u16, u16)>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, deck: Deck, theme: Theme, area: Rect, now: Instant) -> Self {
        let layout = AppLayout::new(area, config.ui.show_status_bar);
        let (width, height) = cells_to_units(&config, layout.content.width, layout.content.height);
        let presentation = Presentation::new(deck, &config, width, height, now);

        Self {
            config,
            presentation,
            theme,
            mode: Mode::Normal,
            focused_option: None,
            hit_map: Vec::new(),
            should_quit: false,
            status_message: None,
            content_area: layout.content,
            pressed_at: None,
        }
    }

    pub fn layout(&self, area: Rect) -> AppLayout {
        AppLayout::new(area, self.config.ui.show_status_bar)
    }

    pub fn content_area(&self) -> Rect {
        self.content_area
    }

    /// Keep the viewport in step with the slide area
    pub fn sync_viewport(&mut self, content: Rect, now: Instant) {
        if content == self.content_area {
            return;
        }
        self.content_area = content;
        let (width, height) = cells_to_units(&self.config, content.width, content.height);
        debug!("Viewport resized to {}x{} units", width, height);
        self.presentation
            .dispatch(InputEvent::Resize { width, height }, now);
    }

    /// Vertical position of a screen row in layout units
    fn row_to_units(&self, row: u16) -> f64 {
        f64::from(row.saturating_sub(self.content_area.y)) * self.config.ui.cell_height
    }

    pub fn current_slide(&self) -> usize {
        self.presentation.current_slide_index()
    }

    pub fn password_slide(&self) -> Option<usize> {
        self.presentation
            .registry()
            .iter()
            .find(|s| s.has_password)
            .map(|s| s.index)
    }

    /// Whether typed text goes to the password field
    pub fn password_active(&self) -> bool {
        self.presentation.password().is_some() && self.password_slide() == Some(self.current_slide())
    }

    pub fn jump_to(&mut self, slide: usize, now: Instant) {
        self.presentation.scroll_to_slide(slide, now);
    }

    pub fn jump_to_last(&mut self, now: Instant) {
        let last = self.presentation.registry().last_index();
        self.jump_to(last, now);
    }

    pub fn dispatch(&mut self, event: InputEvent, now: Instant) {
        let outcome = self.presentation.dispatch(event, now);
        if let Some(target) = outcome.target {
            debug!("Input moved to slide {}", target);
        }
    }

    /// Selectable options of unanswered questions on the current slide
    fn current_options(&self) -> Vec<(usize, usize)> {
        let slide = self.current_slide();
        self.presentation
            .quiz()
            .questions()
            .iter()
            .enumerate()
            .filter(|(_, q)| q.slide == slide && !q.is_answered())
            .flat_map(|(ordinal, q)| (0..q.option_count()).map(move |opt| (ordinal, opt)))
            .collect()
    }

    pub fn focus_next_option(&mut self) {
        self.cycle_option(true);
    }

    pub fn focus_prev_option(&mut self) {
        self.cycle_option(false);
    }

    fn cycle_option(&mut self, forward: bool) {
        let options = self.current_options();
        if options.is_empty() {
            self.focused_option = None;
            return;
        }
        let len = options.len();
        let next = match self.focused_option.and_then(|f| options.iter().position(|o| *o == f)) {
            Some(pos) if forward => (pos + 1) % len,
            Some(pos) => (pos + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.focused_option = Some(options[next]);
    }

    /// Enter: answer the focused option, else press the start control
    pub fn select(&mut self, now: Instant) {
        if let Some((question, option)) = self.focused_option {
            let slide = self.presentation.registry().slide_of_quiz(question);
            if slide == Some(self.current_slide()) {
                self.dispatch(InputEvent::OptionSelected { question, option }, now);
                return;
            }
        }

        let has_start = self
            .presentation
            .registry()
            .get(self.current_slide())
            .is_some_and(|s| s.has_start);
        if has_start {
            self.dispatch(InputEvent::StartActivated, now);
        } else if !self.current_options().is_empty() {
            self.set_status("Tab to choose an answer");
        } else {
            self.set_status("Nothing to select on this slide");
        }
    }

    pub fn type_char(&mut self, c: char, now: Instant) {
        let Some(field) = self.presentation.password() else {
            return;
        };
        let mut value = field.value().to_string();
        value.push(c);
        self.dispatch(InputEvent::PasswordInput(value), now);
    }

    pub fn backspace(&mut self, now: Instant) {
        let Some(field) = self.presentation.password() else {
            return;
        };
        let mut value = field.value().to_string();
        if value.pop().is_some() {
            self.dispatch(InputEvent::PasswordInput(value), now);
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hit_map
            .iter()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, target)| *target)
    }

    fn activate(&mut self, target: HitTarget, now: Instant) {
        match target {
            HitTarget::Dot(index) => self.dispatch(InputEvent::DotClicked(index), now),
            HitTarget::QuizOption { question, option } => {
                self.focused_option = Some((question, option));
                self.dispatch(InputEvent::OptionSelected { question, option }, now);
            }
            HitTarget::Start => self.dispatch(InputEvent::StartActivated, now),
            HitTarget::Password => {}
        }
    }

    /// Mouse input: wheel notches, and left-button drags acting as touches
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.dispatch(InputEvent::Wheel { delta_y: WHEEL_DELTA }, now);
            }
            MouseEventKind::ScrollUp => {
                self.dispatch(InputEvent::Wheel { delta_y: -WHEEL_DELTA }, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_at = Some((mouse.column, mouse.row));
                let y = self.row_to_units(mouse.row);
                self.dispatch(InputEvent::TouchStart { y }, now);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let y = self.row_to_units(mouse.row);
                self.dispatch(InputEvent::TouchEnd { y }, now);

                let Some((column, row)) = self.pressed_at.take() else {
                    return;
                };
                let pressed = self.hit_test(column, row);
                if pressed.is_some() && pressed == self.hit_test(mouse.column, mouse.row) {
                    if let Some(target) = pressed {
                        self.activate(target, now);
                    }
                }
            }
            _ => {}
        }
    }

    /// Advance animations; returns true when a redraw is due
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.presentation.tick(now);
        if let Some((question, _)) = self.focused_option {
            let slide = self.presentation.registry().slide_of_quiz(question);
            if slide != Some(self.current_slide()) {
                self.focused_option = None;
            }
        }
        changed
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.presentation.needs_frame()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Normal => Mode::Help,
            Mode::Help => Mode::Normal,
        };
    }
}

/// Convert a cell area into viewport units
pub fn cells_to_units(config: &AppConfig, columns: u16, rows: u16) -> (f64, f64) {
    (
        f64::from(columns) * config.ui.cell_width,
        f64::from(rows) * config.ui.cell_height,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    pub(crate) fn test_app() -> App {
        let mut config = AppConfig::default();
        config.ui.scroll.smooth_enabled = false;
        App::new(
            Arc::new(config),
            Deck::bundled().unwrap(),
            Theme::default(),
            Rect::new(0, 0, 120, 31),
            Instant::now(),
        )
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_layout_reserves_dots_and_status() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 31), true);
        assert_eq!(layout.content, Rect::new(0, 0, 116, 30));
        assert_eq!(layout.dots, Rect::new(116, 0, 4, 30));
        assert_eq!(layout.status, Some(Rect::new(0, 30, 120, 1)));
    }

    #[test]
    fn test_viewport_is_sized_in_units() {
        let app = test_app();
        let viewport = app.presentation.viewport();
        assert_eq!(viewport.width(), 1160.0);
        assert_eq!(viewport.height(), 600.0);
    }

    #[test]
    fn test_wheel_moves_one_slide() {
        let mut app = test_app();
        let now = Instant::now();
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 10), now);
        app.tick(now);
        assert_eq!(app.current_slide(), 1);

        // Second notch inside the debounce window is dropped
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 10), now);
        app.tick(now);
        assert_eq!(app.current_slide(), 1);

        let later = now + Duration::from_millis(700);
        app.tick(later);
        app.handle_mouse(mouse(MouseEventKind::ScrollUp, 10, 10), later);
        app.tick(later);
        assert_eq!(app.current_slide(), 0);
    }

    #[test]
    fn test_click_on_dot() {
        let mut app = test_app();
        let now = Instant::now();
        app.hit_map = vec![(Rect::new(117, 12, 2, 1), HitTarget::Dot(3))];

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 118, 12), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 118, 12), now);
        app.tick(now);
        assert_eq!(app.current_slide(), 3);
        assert!(app.presentation.navigation().dots().is_active(3));
    }

    #[test]
    fn test_press_and_release_on_different_targets_is_not_a_click() {
        let mut app = test_app();
        let now = Instant::now();
        app.hit_map = vec![
            (Rect::new(117, 12, 2, 1), HitTarget::Dot(3)),
            (Rect::new(117, 14, 2, 1), HitTarget::Dot(4)),
        ];
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 118, 12), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 118, 14), now);
        app.tick(now);
        assert_eq!(app.current_slide(), 0);
    }

    #[test]
    fn test_select_presses_start() {
        let mut app = test_app();
        let now = Instant::now();
        app.select(now);
        app.tick(now);
        assert_eq!(app.current_slide(), 1);
    }

    #[test]
    fn test_select_without_target_sets_status() {
        let mut app = test_app();
        let now = Instant::now();
        app.jump_to(2, now);
        app.tick(now);
        app.select(now);
        assert_eq!(app.status_message.as_deref(), Some("Nothing to select on this slide"));
        assert_eq!(app.current_slide(), 2);

        let quiz_slide = app.presentation.quiz().question(0).unwrap().slide;
        app.jump_to(quiz_slide, now);
        app.tick(now);
        app.select(now);
        assert_eq!(app.status_message.as_deref(), Some("Tab to choose an answer"));
        assert_eq!(app.presentation.quiz().score(), 0);
    }

    #[test]
    fn test_option_focus_and_answer() {
        let mut app = test_app();
        let now = Instant::now();
        let quiz_slide = app.presentation.quiz().question(0).unwrap().slide;
        app.jump_to(quiz_slide, now);
        app.tick(now);

        app.focus_next_option();
        assert_eq!(app.focused_option, Some((0, 0)));
        app.focus_next_option();
        assert_eq!(app.focused_option, Some((0, 1)));
        app.select(now);
        assert_eq!(app.presentation.quiz().score(), 1);

        // Answered questions drop out of the cycle
        app.focus_next_option();
        assert_eq!(app.focused_option, Some((1, 0)));
        app.focus_prev_option();
        assert_eq!(app.focused_option, Some((2, 1)));
    }

    #[test]
    fn test_focus_cleared_when_leaving_slide() {
        let mut app = test_app();
        let now = Instant::now();
        let quiz_slide = app.presentation.quiz().question(0).unwrap().slide;
        app.jump_to(quiz_slide, now);
        app.tick(now);
        app.focus_next_option();

        app.jump_to(0, now);
        app.tick(now);
        assert_eq!(app.focused_option, None);
    }

    #[test]
    fn test_typing_scores_password() {
        let mut app = test_app();
        let now = Instant::now();
        let slide = app.password_slide().unwrap();
        app.jump_to(slide, now);
        app.tick(now);

        for c in "Abc12345!".chars() {
            app.type_char(c, now);
        }
        assert_eq!(app.presentation.password().unwrap().assessment().score, 90);
        app.backspace(now);
        assert_eq!(app.presentation.password().unwrap().value(), "Abc12345");
    }

    #[test]
    fn test_sync_viewport_resizes() {
        let mut app = test_app();
        let now = Instant::now();
        app.sync_viewport(Rect::new(0, 0, 60, 20), now);
        let viewport = app.presentation.viewport();
        assert_eq!(viewport.width(), 600.0);
        assert_eq!(viewport.height(), 400.0);
    }
}

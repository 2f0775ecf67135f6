use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use slidedeck_core::nav::NavKey;

use crate::app::{App, Mode};
use crate::keymap::Keymap;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Arrow and page keys, routed through the navigation controller
    Navigate(NavKey),
    FirstSlide,
    LastSlide,
    NextOption,
    PrevOption,
    /// Choose the focused quiz option or press the start control
    Select,
    ToggleHelp,
    ExitMode,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c {
        return Action::Quit;
    }

    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    // The password field captures text while its slide is current
    if app.password_active() {
        if let Some(action) = handle_password_input(key) {
            return action;
        }
    }

    keymap.lookup(&key).cloned().unwrap_or(Action::None)
}

fn handle_password_input(key: KeyEvent) -> Option<Action> {
    let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
    match key.code {
        KeyCode::Char(c) if plain => Some(Action::InputChar(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use std::time::Instant;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        let app = test_app();
        let keymap = Keymap::default();

        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app, &keymap), Action::Quit);
        assert_eq!(
            handle_key_event(key(KeyCode::Down), &app, &keymap),
            Action::Navigate(NavKey::ArrowDown)
        );
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app, &keymap), Action::NextOption);
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app, &keymap), Action::None);
    }

    #[test]
    fn test_help_mode_any_key_exits() {
        let mut app = test_app();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(key(KeyCode::Down), &app, &keymap), Action::ExitMode);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &app, &keymap), Action::Quit);
    }

    #[test]
    fn test_password_slide_captures_text() {
        let mut app = test_app();
        let now = Instant::now();
        let slide = app.password_slide().unwrap();
        app.jump_to(slide, now);
        assert!(app.password_active());

        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::InputChar('q')
        );
        let upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(upper, &app, &keymap), Action::InputChar('Q'));
        assert_eq!(handle_key_event(key(KeyCode::Backspace), &app, &keymap), Action::Backspace);
        // Navigation still works
        assert_eq!(
            handle_key_event(key(KeyCode::PageDown), &app, &keymap),
            Action::Navigate(NavKey::PageDown)
        );
    }
}

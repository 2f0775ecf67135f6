use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;

use slidedeck_core::{AppConfig, Deck, InputEvent};
use slidedeck_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{NavDotsWidget, PopupWidget, SlideViewWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Load everything that can fail before taking over the terminal
    let deck_path = config.deck_path();
    let deck = Deck::load_or_bundled(deck_path.as_deref()).with_context(|| match &deck_path {
        Some(path) => format!("loading deck {}", path.display()),
        None => "loading bundled deck".to_string(),
    })?;
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    info!("Starting presenter with {:?} navigation", config.navigation.preset);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(&deck.title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, deck, theme, &keymap);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Presenter closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
    deck: Deck,
    theme: Theme,
    keymap: &Keymap,
) -> Result<()> {
    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    let mut app = App::new(config.clone(), deck, theme, area, Instant::now());

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.scroll.animation_fps);

    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = false;

    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| {
            let layout = app.layout(frame.area());
            app.sync_viewport(layout.content, now);

            let mut hits = SlideViewWidget::render(frame, layout.content, &app);
            hits.extend(NavDotsWidget::render(frame, layout.dots, &app));
            if let Some(status) = layout.status {
                StatusBarWidget::render(frame, status, &app);
            }
            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app);
            }
            app.hit_map = hits;
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, &app, keymap);
                    handle_action(&mut app, action, now);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                // The next draw resizes the viewport
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action, now: Instant) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Navigate(key) => app.dispatch(InputEvent::Key(key), now),
        Action::FirstSlide => app.jump_to(0, now),
        Action::LastSlide => app.jump_to_last(now),
        Action::NextOption => app.focus_next_option(),
        Action::PrevOption => app.focus_prev_option(),
        Action::Select => app.select(now),
        Action::ToggleHelp => app.toggle_help(),
        Action::ExitMode => app.mode = Mode::Normal,
        Action::InputChar(c) => app.type_char(c, now),
        Action::Backspace => app.backspace(now),
        Action::None => {}
    }
}

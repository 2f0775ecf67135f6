use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = status_text(app);
        let help_hint = " q:quit ↑/↓:slides tab:option enter:select ?:help ";

        let used = status_text.width() + help_hint.width();
        let padding_len = usize::from(area.width).saturating_sub(used);

        let mut spans = vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
        ];
        if padding_len > 0 {
            spans.push(Span::styled(
                help_hint,
                Style::default().fg(theme.muted).bg(theme.bg2),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Left side of the bar: a pending message, else mode and position
fn status_text(app: &App) -> String {
    if let Some(msg) = &app.status_message {
        return format!(" {}", msg);
    }

    let mode_str = match app.mode {
        Mode::Help => "HELP",
        Mode::Normal if app.password_active() => "INPUT",
        Mode::Normal => "NORMAL",
    };

    let registry = app.presentation.registry();
    let current = app.current_slide();
    let title = registry.get(current).map_or("", |s| s.title.as_str());
    let mut text = format!(
        " {} | {}/{} | {}",
        mode_str,
        registry.dot_label(current),
        registry.len(),
        title
    );
    if let Some(result) = app.presentation.quiz().result_text() {
        text.push_str(" | ");
        text.push_str(result);
    }
    text
}

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keymap = &app.config.keymap;
        let rows: Vec<(String, &str)> = vec![
            ("↑ ↓ PgUp PgDn".to_string(), "previous / next slide"),
            ("wheel, drag".to_string(), "previous / next slide"),
            (format!("{} {}", keymap.first_slide, keymap.last_slide), "first / last slide"),
            (format!("{} {}", keymap.next_option, keymap.prev_option), "focus quiz option"),
            (keymap.select.clone(), "answer / start"),
            ("click".to_string(), "dots, options, start"),
            ("type".to_string(), "on the password slide"),
            (keymap.help.clone(), "toggle this help"),
            (format!("{} <C-c>", keymap.quit), "quit"),
        ];

        let lines: Vec<Line> = rows
            .into_iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}  ", keys),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(what, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        let area = frame.area();
        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        assert_eq!(
            centered_rect(10, 4, Rect::new(0, 0, 30, 10)),
            Rect::new(10, 3, 10, 4)
        );
    }
}

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::{App, HitTarget};

pub struct NavDotsWidget;

impl NavDotsWidget {
    /// Draw one dot per slide, vertically centred; returns click targets
    pub fn render(frame: &mut Frame, area: Rect, app: &App) -> Vec<(Rect, HitTarget)> {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg0)),
            area,
        );

        let dots = app.presentation.navigation().dots();
        let rows = dot_rows(dots.len(), area.height);
        let mut hits = Vec::with_capacity(rows.len());

        for (index, (offset, active)) in rows.into_iter().zip(dots.flags()).enumerate() {
            let rect = Rect::new(area.x, area.y + offset, area.width, 1);
            let span = if active {
                Span::styled(
                    " ●",
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(" ○", Style::default().fg(app.theme.muted))
            };
            frame.render_widget(Paragraph::new(span), rect);
            hits.push((rect, HitTarget::Dot(index)));
        }

        hits
    }
}

/// Row offset of each dot; two rows apart when they fit, else packed
///
/// Dots that do not fit at all are left out.
fn dot_rows(count: usize, height: u16) -> Vec<u16> {
    let height = usize::from(height);
    let spacing = if count * 2 <= height { 2 } else { 1 };
    let shown = count.min(height);
    let span = if shown == 0 { 0 } else { (shown - 1) * spacing + 1 };
    let start = height.saturating_sub(span) / 2;
    (0..shown).map(|i| (start + i * spacing) as u16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_rows_spaced_and_centred() {
        assert_eq!(dot_rows(3, 11), vec![3, 5, 7]);
        assert_eq!(dot_rows(0, 10), Vec::<u16>::new());
    }

    #[test]
    fn test_dot_rows_packed_when_tight() {
        assert_eq!(dot_rows(4, 5), vec![0, 1, 2, 3]);
        assert_eq!(dot_rows(6, 3), vec![0, 1, 2]);
    }
}

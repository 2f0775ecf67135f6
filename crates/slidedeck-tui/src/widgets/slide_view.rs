use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use slidedeck_core::deck::{Block as DeckBlock, BlockKind};
use slidedeck_core::quiz::OptionMark;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, HitTarget};

/// Horizontal margin on each side of a slide, in cells
const MARGIN: u16 = 4;
/// Widest the password meter bar gets
const METER_WIDTH: usize = 40;

/// Rendered text of one slide plus the lines that are clickable
#[derive(Default)]
pub struct SlideContent {
    pub lines: Vec<Line<'static>>,
    /// (line index, target)
    pub hits: Vec<(usize, HitTarget)>,
}

impl SlideContent {
    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn push_target(&mut self, line: Line<'static>, target: HitTarget) {
        self.hits.push((self.lines.len(), target));
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }
}

pub struct SlideViewWidget;

impl SlideViewWidget {
    /// Draw the visible part of the slide strip; returns click targets
    pub fn render(frame: &mut Frame, area: Rect, app: &App) -> Vec<(Rect, HitTarget)> {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg0)),
            area,
        );

        let mut hits = Vec::new();
        if area.width == 0 || area.height == 0 {
            return hits;
        }

        let rows = i32::from(area.height);
        let cell_height = app.config.ui.cell_height;
        let viewport = app.presentation.viewport();

        for entry in app.presentation.registry().iter() {
            let Some(top) = viewport.slide_top(entry.index) else {
                continue;
            };
            let row_top = (top / cell_height).round() as i32;
            if row_top >= rows || row_top + rows <= 0 {
                continue;
            }

            let content = slide_lines(app, entry.index, area.width);
            let pad = (rows - content.lines.len() as i32).max(0) / 2;
            let mut lines: Vec<Line<'static>> = vec![Line::default(); pad as usize];
            lines.extend(content.lines);

            let visible_top = row_top.max(0);
            let visible_bottom = (row_top + rows).min(rows);
            let rect = Rect::new(
                area.x,
                area.y + visible_top as u16,
                area.width,
                (visible_bottom - visible_top) as u16,
            );
            let skip = (-row_top).max(0) as u16;
            frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), rect);

            for (line, target) in content.hits {
                let screen = row_top + pad + line as i32;
                if screen >= visible_top && screen < visible_bottom {
                    hits.push((
                        Rect::new(area.x, area.y + screen as u16, area.width, 1),
                        target,
                    ));
                }
            }
        }

        hits
    }
}

/// Lay out one slide for a slide area `width` cells wide
pub fn slide_lines(app: &App, slide_index: usize, width: u16) -> SlideContent {
    let mut content = SlideContent::default();
    let Some(slide) = app.presentation.deck().slides.get(slide_index) else {
        return content;
    };
    let text_width = usize::from(width.saturating_sub(MARGIN * 2)).max(10);
    let theme = &app.theme;

    if !slide.title.is_empty() {
        let style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        for line in wrap_text(&slide.title, text_width) {
            content.push(Line::from(Span::styled(line, style)).alignment(Alignment::Center));
        }
        content.blank();
    }

    for (block_index, block) in slide.blocks.iter().enumerate() {
        push_block(&mut content, app, slide_index, block_index, block, text_width);
    }

    // Trailing spacer from the last block
    if content.lines.last().is_some_and(|l| l.spans.is_empty()) {
        content.lines.pop();
    }
    content
}

fn push_block(
    content: &mut SlideContent,
    app: &App,
    slide: usize,
    block_index: usize,
    block: &DeckBlock,
    width: usize,
) {
    let theme = &app.theme;
    let hidden = block.animate && !app.presentation.observer().is_animate_in_view(slide);
    let dim = |style: Style| {
        if hidden {
            Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
        } else {
            style
        }
    };
    let margin = " ".repeat(usize::from(MARGIN));

    match &block.kind {
        BlockKind::Heading { text } => {
            let style = dim(Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD));
            for line in wrap_text(text, width) {
                content.push(Line::from(Span::styled(line, style)).alignment(Alignment::Center));
            }
        }
        BlockKind::Text { text } => {
            let style = dim(Style::default().fg(theme.fg0));
            for line in wrap_text(text, width) {
                content.push(Line::from(vec![
                    Span::raw(margin.clone()),
                    Span::styled(line, style),
                ]));
            }
        }
        BlockKind::Bullet { text } => {
            let style = dim(Style::default().fg(theme.fg0));
            for (i, line) in wrap_text(text, width.saturating_sub(2).max(1)).into_iter().enumerate() {
                let bullet = if i == 0 { "• " } else { "  " };
                content.push(Line::from(vec![
                    Span::raw(margin.clone()),
                    Span::styled(bullet, dim(Style::default().fg(theme.accent))),
                    Span::styled(line, style),
                ]));
            }
            // Consecutive bullets stay together
            return;
        }
        BlockKind::Stat { value, label } => {
            let shown = app
                .presentation
                .stats()
                .widget(slide, block_index)
                .map_or(value.as_str(), |w| w.display());
            let value_style = dim(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
            content.push(
                Line::from(Span::styled(shown.to_string(), value_style)).alignment(Alignment::Center),
            );
            for line in wrap_text(label, width) {
                content.push(
                    Line::from(Span::styled(line, dim(Style::default().fg(theme.muted))))
                        .alignment(Alignment::Center),
                );
            }
        }
        BlockKind::Quiz { prompt, options, .. } => {
            let quiz = app.presentation.quiz();
            let Some(ordinal) = quiz.ordinal_at(slide, block_index) else {
                return;
            };
            let Some(question) = quiz.question(ordinal) else {
                return;
            };

            let prompt_style = Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD);
            for line in wrap_text(prompt, width) {
                content.push(Line::from(vec![
                    Span::raw(margin.clone()),
                    Span::styled(line, prompt_style),
                ]));
            }

            for (option_index, option) in options.iter().enumerate() {
                let focused = app.focused_option == Some((ordinal, option_index));
                let mark = question.mark(option_index);
                let (marker, mut style) = match mark {
                    Some(OptionMark::Correct) => (
                        "(✓) ",
                        Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                    ),
                    Some(OptionMark::Incorrect) => (
                        "(✗) ",
                        Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                    ),
                    None if question.is_answered() => ("( ) ", Style::default().fg(theme.muted)),
                    None => ("( ) ", Style::default().fg(theme.fg0)),
                };
                if focused && !question.is_answered() {
                    style = style.bg(theme.selection);
                }
                let pointer = if focused { "▸ " } else { "  " };
                let target = HitTarget::QuizOption {
                    question: ordinal,
                    option: option_index,
                };

                let wrapped = wrap_text(&option.text, width.saturating_sub(6).max(1));
                for (i, line) in wrapped.into_iter().enumerate() {
                    let (pointer, marker) = if i == 0 { (pointer, marker) } else { ("  ", "    ") };
                    content.push_target(
                        Line::from(vec![
                            Span::raw(margin.clone()),
                            Span::styled(pointer, Style::default().fg(theme.accent)),
                            Span::styled(format!("{}{}", marker, line), style),
                        ]),
                        target,
                    );
                }
            }

            if let Some(feedback) = question.feedback() {
                let correct = question
                    .chosen()
                    .is_some_and(|(_, mark)| mark == OptionMark::Correct);
                let color = if correct { theme.success } else { theme.error };
                for line in wrap_text(&feedback.message, width) {
                    content.push(Line::from(vec![
                        Span::raw(margin.clone()),
                        Span::styled(line, Style::default().fg(color)),
                    ]));
                }
                if let Some(hint) = &feedback.hint {
                    let style = Style::default()
                        .fg(theme.muted)
                        .add_modifier(Modifier::ITALIC);
                    for line in wrap_text(&format!("💡 {}", hint), width) {
                        content.push(Line::from(vec![Span::raw(margin.clone()), Span::styled(line, style)]));
                    }
                }
            }
        }
        BlockKind::QuizResult => {
            if let Some(result) = app.presentation.quiz().result_text() {
                let style = Style::default().fg(theme.info).add_modifier(Modifier::BOLD);
                content.push(
                    Line::from(Span::styled(result.to_string(), style)).alignment(Alignment::Center),
                );
            } else {
                content.blank();
            }
        }
        BlockKind::Password { placeholder } => {
            push_password(content, app, placeholder, width, &margin);
        }
        BlockKind::Start { label } => {
            let label = label
                .as_deref()
                .unwrap_or(&app.presentation.deck().strings.start_label);
            let style = Style::default()
                .fg(theme.bg0)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD);
            content.push_target(
                Line::from(Span::styled(format!("  {}  ", label), style)).alignment(Alignment::Center),
                HitTarget::Start,
            );
        }
    }
    content.blank();
}

fn push_password(
    content: &mut SlideContent,
    app: &App,
    placeholder: &str,
    width: usize,
    margin: &str,
) {
    let theme = &app.theme;
    let Some(field) = app.presentation.password() else {
        return;
    };
    let assessment = field.assessment();
    let field_width = width.min(METER_WIDTH);

    let shown = if field.value().is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(theme.muted))
    } else {
        let masked: String = "•".repeat(field.value().chars().count().min(field_width));
        Span::styled(masked, Style::default().fg(theme.fg1))
    };
    let cursor = if app.password_active() { "▏" } else { " " };
    content.push_target(
        Line::from(vec![
            Span::raw(margin.to_string()),
            Span::styled("▶ ", Style::default().fg(theme.accent)),
            shown,
            Span::styled(cursor, Style::default().fg(theme.accent)),
        ]),
        HitTarget::Password,
    );

    let color = app.theme.token_color(assessment.color);
    let filled = field_width * usize::from(assessment.score) / 100;
    content.push(Line::from(vec![
        Span::raw(margin.to_string()),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(field_width - filled), Style::default().fg(theme.bg2)),
    ]));

    if !assessment.label.is_empty() {
        content.push(Line::from(vec![
            Span::raw(margin.to_string()),
            Span::styled(
                assessment.label.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/100", assessment.score),
                Style::default().fg(theme.muted),
            ),
        ]));
    }
}

/// Greedy word wrap by display width
///
/// Words wider than `width` are split across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_width = current.width();
        let word_width = word.width();

        if !current.is_empty() && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word_width <= width {
            current.push_str(word);
            continue;
        }

        for c in word.chars() {
            let mut buf = [0u8; 4];
            let char_width = c.encode_utf8(&mut buf).width();
            if current.width() + char_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

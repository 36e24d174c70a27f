//! Input pane: the expression being scanned, with the current token highlighted

use super::utils::pane_block;
use crate::parser::ast::Span as SourceSpan;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the input pane
pub struct SourceRenderData<'a> {
    pub input: &'a str,
    pub highlight: Option<SourceSpan>,
    pub is_error: bool,
}

fn char_style(ch: char) -> Style {
    match ch {
        '0'..='9' => Style::default().fg(DEFAULT_THEME.number),
        '+' | '-' => Style::default()
            .fg(DEFAULT_THEME.operator)
            .add_modifier(Modifier::BOLD),
        ' ' | '\t' => Style::default(),
        // Anything else is a character the scanner will reject
        _ => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// Render the input pane
pub fn render_source_pane(frame: &mut Frame, area: Rect, data: SourceRenderData) {
    let block = pane_block(" Input ", false);

    let highlight_style = if data.is_error {
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.secondary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans: Vec<Span> = data
        .input
        .char_indices()
        .map(|(offset, ch)| {
            let highlighted = data
                .highlight
                .is_some_and(|span| offset >= span.start && offset < span.end);
            let style = if highlighted {
                highlight_style
            } else {
                char_style(ch)
            };
            Span::styled(ch.to_string(), style)
        })
        .collect();

    // End of text has an empty span; mark the position past the input
    if let Some(span) = data.highlight {
        if span.is_empty() && span.start >= data.input.len() {
            spans.push(Span::styled("␃", highlight_style));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

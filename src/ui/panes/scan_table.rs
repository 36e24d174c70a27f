//! Scan table pane: every token allocated so far and the parser's cursor

use super::utils::{pane_block, scroll_window, visible_height};
use crate::parser::token::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Data needed to render the scan table pane
pub struct ScanRenderData<'a> {
    pub tokens: &'a [Token],
    pub cursor: usize,
    /// The cursor marker is only meaningful once parsing has started
    pub show_cursor: bool,
}

fn token_row(index: usize, token: &Token, at_cursor: bool) -> ListItem<'static> {
    let text_style = match token.kind {
        TokenKind::IntLiteral => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Plus | TokenKind::Minus => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::EndOfText => Style::default().fg(DEFAULT_THEME.comment),
    };

    let mut spans = vec![
        Span::styled(
            format!("[{:>2}] ", index),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!("{:<10}", token.kind.name()),
            Style::default().fg(DEFAULT_THEME.token_kind),
        ),
        Span::styled(format!("{:<8}", format!("\"{}\"", token.text)), text_style),
        Span::styled(
            format!("@{}..{}", token.span.start, token.span.end),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ];

    let mut row_style = Style::default();
    if at_cursor {
        spans.push(Span::styled(
            "  ◀ cur",
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ));
        row_style = row_style.bg(DEFAULT_THEME.current_line_bg);
    }

    ListItem::new(Line::from(spans)).style(row_style)
}

/// Render the scan table pane
pub fn render_scan_pane(
    frame: &mut Frame,
    area: Rect,
    data: ScanRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(
        " Scan Table (len={}, cur={}) ",
        data.tokens.len(),
        data.cursor
    );
    let block = pane_block(&title, is_focused);

    let mut all_items: Vec<ListItem> = data
        .tokens
        .iter()
        .enumerate()
        .map(|(index, token)| token_row(index, token, data.show_cursor && index == data.cursor))
        .collect();

    if data.tokens.is_empty() {
        all_items.push(
            ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    } else if data.show_cursor && data.cursor >= data.tokens.len() {
        all_items.push(
            ListItem::new("     all tokens consumed  ◀ cur")
                .style(Style::default().fg(DEFAULT_THEME.success)),
        );
    }

    let pin = data
        .show_cursor
        .then_some(data.cursor.min(all_items.len().saturating_sub(1)));
    let window = scroll_window(all_items.len(), visible_height(area), scroll_offset, pin);
    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(window.start)
        .take(window.len())
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

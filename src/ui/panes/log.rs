//! Trace log pane: step labels up to the current position, indented by rule depth

use super::utils::{pane_block, scroll_window, visible_height};
use crate::snapshot::SnapshotManager;
use crate::trace::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

fn step_style(step: &Step) -> Style {
    match step {
        Step::Enter { .. } | Step::Exit { .. } => Style::default().fg(DEFAULT_THEME.primary),
        Step::Accept { accepted: false, .. } => Style::default().fg(DEFAULT_THEME.comment),
        Step::NodeAllocated { .. } | Step::TokenScanned { .. } => {
            Style::default().fg(DEFAULT_THEME.secondary)
        }
        Step::Failed { .. } => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the trace log pane
pub struct LogScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Render the trace log pane
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    history: &SnapshotManager,
    position: usize,
    is_focused: bool,
    scroll_state: &mut LogScrollState,
) {
    let block = pane_block(" Trace ", is_focused);

    let all_items: Vec<ListItem> = history
        .iter()
        .take(position + 1)
        .enumerate()
        .map(|(index, snapshot)| {
            let mut line = Line::from(vec![
                Span::styled(
                    format!("{:>4} ", index + 1),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::raw("  ".repeat(snapshot.depth)),
                Span::styled(snapshot.label(), step_style(&snapshot.step)),
            ]);
            if index == position {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            ListItem::new(line)
        })
        .collect();

    if all_items.is_empty() {
        let empty = List::new(vec![
            ListItem::new("(nothing recorded)").style(Style::default().fg(DEFAULT_THEME.comment)),
        ]);
        frame.render_widget(empty.block(block), area);
        return;
    }

    // Jump to the newest line after a step; otherwise keep the user's scroll
    let pin = (all_items.len() != scroll_state.prev_item_count).then_some(all_items.len() - 1);
    scroll_state.prev_item_count = all_items.len();

    let window = scroll_window(
        all_items.len(),
        visible_height(area),
        &mut scroll_state.offset,
        pin,
    );
    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(window.start)
        .take(window.len())
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

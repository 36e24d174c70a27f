//! Shared helpers for pane rendering
//!
//! All functions here are `pub(super)`: border styling, scroll windows and
//! the parent links recovered from a flat node table.

use crate::parser::ast::{Node, NodeRef};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use rustc_hash::FxHashMap;
use std::ops::Range;

/// Bordered block with the focused/unfocused border colour
pub(super) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows that fit inside a bordered pane, min 1
pub(super) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the window stays inside `total` rows and, when `pin` is
/// given, keeps that row in view. Returns the rows to draw.
pub(super) fn scroll_window(
    total: usize,
    height: usize,
    offset: &mut usize,
    pin: Option<usize>,
) -> Range<usize> {
    if let Some(pin) = pin {
        if pin < *offset {
            *offset = pin;
        } else if pin >= offset.saturating_add(height) {
            *offset = pin + 1 - height;
        }
    }

    if total > height {
        *offset = (*offset).min(total - height);
    } else {
        *offset = 0;
    }

    *offset..total.min(*offset + height)
}

/// Map each attached child to the operator node that holds it
pub(super) fn parent_map(nodes: &[Node]) -> FxHashMap<NodeRef, NodeRef> {
    let mut parents = FxHashMap::default();
    for (index, node) in nodes.iter().enumerate() {
        for child in node.children() {
            parents.insert(child, NodeRef::new(index));
        }
    }
    parents
}

/// Follow parent links up from `node` to the top of its subtree
pub(super) fn subtree_top(node: NodeRef, parents: &FxHashMap<NodeRef, NodeRef>) -> NodeRef {
    let mut top = node;
    // Bounded by the map size so malformed tables cannot loop forever
    for _ in 0..=parents.len() {
        match parents.get(&top) {
            Some(parent) => top = *parent,
            None => break,
        }
    }
    top
}

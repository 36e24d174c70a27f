//! Parse table pane: the node pool, one row per allocated slot
//!
//! Child links are shown as indices (`L=[0] R=[2]`), an unattached right
//! operand as `R=?`, and the parent recovered from the links as `↑[n]`.

use super::utils::{pane_block, parent_map, scroll_window, visible_height};
use crate::parser::ast::{Node, NodeRef};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the parse table pane
pub struct ParseScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the parse table pane
pub struct ParseRenderData<'a> {
    pub nodes: &'a [Node],
    pub focus: Option<NodeRef>,
    /// `false` while still scanning
    pub parsing: bool,
}

fn link(node: NodeRef) -> String {
    format!("[{}]", node.index())
}

/// Render the parse table pane
pub fn render_parse_pane(
    frame: &mut Frame,
    area: Rect,
    data: ParseRenderData,
    is_focused: bool,
    scroll_state: &mut ParseScrollState,
) {
    let title = format!(" Parse Table (len={}) ", data.nodes.len());
    let block = pane_block(&title, is_focused);

    let parents = parent_map(data.nodes);
    let mut all_items = Vec::new();

    if data.nodes.is_empty() {
        let placeholder = if data.parsing {
            "(empty)"
        } else {
            "(waiting for the parser)"
        };
        all_items.push(
            ListItem::new(placeholder).style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    for (index, node) in data.nodes.iter().enumerate() {
        let node_ref = NodeRef::new(index);
        let is_focus = data.focus == Some(node_ref);

        let mut spans = vec![
            Span::styled(
                format!("[{:>2}] ", index),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(
                format!("{:<7}", node.tag()),
                Style::default().fg(DEFAULT_THEME.token_kind),
            ),
        ];

        match node {
            Node::IntLiteral { value } => {
                spans.push(Span::styled(
                    format!("val={}", value),
                    Style::default().fg(DEFAULT_THEME.number),
                ));
            }
            Node::BinaryOp {
                operator,
                left,
                right,
            } => {
                spans.push(Span::styled(
                    format!("op={:<6}", operator.name()),
                    Style::default().fg(DEFAULT_THEME.operator),
                ));
                spans.push(Span::styled(
                    format!("L={} ", link(*left)),
                    Style::default().fg(DEFAULT_THEME.fg),
                ));
                match right {
                    Some(right) => spans.push(Span::styled(
                        format!("R={}", link(*right)),
                        Style::default().fg(DEFAULT_THEME.fg),
                    )),
                    None => spans.push(Span::styled(
                        "R=?",
                        Style::default()
                            .fg(DEFAULT_THEME.pending)
                            .add_modifier(Modifier::ITALIC),
                    )),
                }
            }
        }

        if let Some(parent) = parents.get(&node_ref) {
            spans.push(Span::styled(
                format!("  ↑{}", link(*parent)),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }

        let row_style = if is_focus {
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.focus_node)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        all_items.push(ListItem::new(Line::from(spans)).style(row_style));
    }

    // Follow new allocations, but leave manual scrolling alone otherwise
    let pin = if all_items.len() > scroll_state.prev_item_count {
        Some(all_items.len() - 1)
    } else {
        data.focus.map(NodeRef::index)
    };
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

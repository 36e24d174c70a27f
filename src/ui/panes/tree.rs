//! Tree pane: ASCII drawing of the subtree the current step belongs to
//!
//! ```text
//! [3] MINUS
//! +-- [1] PLUS
//! |   +-- [0] 1
//! |   `-- [2] 2
//! `-- ?
//! ```

use super::utils::{pane_block, parent_map, scroll_window, subtree_top, visible_height};
use crate::parser::ast::{Node, NodeRef};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// One drawn line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Branch characters in front of the label
    pub prefix: String,
    /// `None` for an unattached right operand
    pub node: Option<NodeRef>,
    pub label: String,
}

/// Lay out the subtree rooted at `root`, pre-order
pub fn tree_rows(nodes: &[Node], root: NodeRef) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(nodes, Some(root), "", None, &mut rows);
    rows
}

/// `is_last` is `None` for the root, which gets no branch characters
fn push_rows(
    nodes: &[Node],
    node: Option<NodeRef>,
    prefix: &str,
    is_last: Option<bool>,
    rows: &mut Vec<TreeRow>,
) {
    let (branch, child_prefix) = match is_last {
        None => (String::new(), String::new()),
        Some(true) => (format!("{}`-- ", prefix), format!("{}    ", prefix)),
        Some(false) => (format!("{}+-- ", prefix), format!("{}|   ", prefix)),
    };

    let Some(node) = node else {
        rows.push(TreeRow {
            prefix: branch,
            node: None,
            label: "?".to_string(),
        });
        return;
    };

    match nodes.get(node.index()) {
        Some(Node::IntLiteral { value }) => rows.push(TreeRow {
            prefix: branch,
            node: Some(node),
            label: format!("[{}] {}", node.index(), value),
        }),
        Some(Node::BinaryOp {
            operator,
            left,
            right,
        }) => {
            rows.push(TreeRow {
                prefix: branch,
                node: Some(node),
                label: format!("[{}] {}", node.index(), operator.name()),
            });
            push_rows(nodes, Some(*left), &child_prefix, Some(false), rows);
            push_rows(nodes, *right, &child_prefix, Some(true), rows);
        }
        None => rows.push(TreeRow {
            prefix: branch,
            node: Some(node),
            label: format!("[{}] <dangling>", node.index()),
        }),
    }
}

/// Root to draw for a step: the top of the focused node's subtree, or
/// the newest top-level node when the step has no focus
pub fn display_root(nodes: &[Node], focus: Option<NodeRef>) -> Option<NodeRef> {
    if nodes.is_empty() {
        return None;
    }
    let parents = parent_map(nodes);
    let start = focus.unwrap_or(NodeRef::new(nodes.len() - 1));
    Some(subtree_top(start, &parents))
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    nodes: &[Node],
    focus: Option<NodeRef>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Current Tree ", is_focused);

    let Some(root) = display_root(nodes, focus) else {
        let empty = List::new(vec![
            ListItem::new("(no nodes yet)").style(Style::default().fg(DEFAULT_THEME.comment)),
        ]);
        frame.render_widget(empty.block(block), area);
        return;
    };

    let rows = tree_rows(nodes, root);
    let all_items: Vec<ListItem> = rows
        .into_iter()
        .map(|row| {
            let label_style = match row.node {
                None => Style::default()
                    .fg(DEFAULT_THEME.pending)
                    .add_modifier(Modifier::ITALIC),
                Some(node) if Some(node) == focus => Style::default()
                    .fg(DEFAULT_THEME.focus_node)
                    .add_modifier(Modifier::BOLD),
                Some(_) => Style::default().fg(DEFAULT_THEME.fg),
            };
            ListItem::new(Line::from(vec![
                Span::styled(row.prefix, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(row.label, label_style),
            ]))
        })
        .collect();

    let window = scroll_window(all_items.len(), visible_height(area), scroll_offset, None);
    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(window.start)
        .take(window.len())
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Operator;

    fn partial_chain() -> Vec<Node> {
        vec![
            Node::IntLiteral { value: 1 },
            Node::BinaryOp {
                operator: Operator::Plus,
                left: NodeRef::new(0),
                right: Some(NodeRef::new(2)),
            },
            Node::IntLiteral { value: 2 },
            Node::BinaryOp {
                operator: Operator::Minus,
                left: NodeRef::new(1),
                right: None,
            },
        ]
    }

    #[test]
    fn test_tree_rows_layout() {
        let rows: Vec<String> = tree_rows(&partial_chain(), NodeRef::new(3))
            .into_iter()
            .map(|row| format!("{}{}", row.prefix, row.label))
            .collect();
        assert_eq!(
            rows,
            vec![
                "[3] MINUS",
                "+-- [1] PLUS",
                "|   +-- [0] 1",
                "|   `-- [2] 2",
                "`-- ?",
            ]
        );
    }

    #[test]
    fn test_display_root_climbs_to_top() {
        let nodes = partial_chain();
        assert_eq!(display_root(&nodes, Some(NodeRef::new(2))), Some(NodeRef::new(3)));
        assert_eq!(display_root(&nodes, None), Some(NodeRef::new(3)));
        assert_eq!(display_root(&[], None), None);
    }

    #[test]
    fn test_detached_operand_is_its_own_root() {
        // Right operand allocated but not yet attached to node[1]
        let nodes = vec![
            Node::IntLiteral { value: 5 },
            Node::BinaryOp {
                operator: Operator::Plus,
                left: NodeRef::new(0),
                right: None,
            },
            Node::IntLiteral { value: 6 },
        ];
        assert_eq!(display_root(&nodes, Some(NodeRef::new(2))), Some(NodeRef::new(2)));
        assert_eq!(display_root(&nodes, Some(NodeRef::new(0))), Some(NodeRef::new(1)));
    }
}

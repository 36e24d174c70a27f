//! Node pool (arena) for expression trees
//!
//! Nodes are appended and never removed. The only mutation after allocation
//! is attaching the right operand of a [`Node::BinaryOp`], which the parser
//! does once that operand has itself been allocated.

use super::ast::{Node, NodeRef};
use super::limits::{Pool, PoolExhausted};
use std::fmt;
use std::ops::Index;

/// Fixed-capacity, append-only node store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    nodes: Vec<Node>,
    capacity: usize,
}

impl ParseTable {
    pub fn new(capacity: usize) -> Self {
        ParseTable {
            nodes: Vec::new(),
            capacity,
        }
    }

    /// Allocate the next slot for `node`
    pub fn alloc(&mut self, node: Node) -> Result<NodeRef, PoolExhausted> {
        if self.nodes.len() >= self.capacity {
            return Err(PoolExhausted {
                pool: Pool::ParseTable,
                capacity: self.capacity,
            });
        }
        self.nodes.push(node);
        Ok(NodeRef::new(self.nodes.len() - 1))
    }

    /// Set the right operand of an operator node.
    ///
    /// Only the parser calls this, always with an operator `parent` and a
    /// `child` allocated after it.
    pub(crate) fn attach_right(&mut self, parent: NodeRef, child: NodeRef) {
        debug_assert!(child.index() < self.nodes.len());
        debug_assert!(matches!(
            self.nodes.get(parent.index()),
            Some(Node::BinaryOp { .. })
        ));
        if let Some(Node::BinaryOp { right, .. }) = self.nodes.get_mut(parent.index()) {
            *right = Some(child);
        }
    }

    pub fn get(&self, node: NodeRef) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeRef::new(i), node))
    }
}

impl Index<NodeRef> for ParseTable {
    type Output = Node;

    fn index(&self, node: NodeRef) -> &Node {
        &self.nodes[node.index()]
    }
}

/// A finished parse: the node pool plus the root of the expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    pub table: ParseTable,
    pub root: NodeRef,
}

impl ParseTree {
    pub fn root_node(&self) -> Option<&Node> {
        self.table.get(self.root)
    }

    /// Every node reachable from the root, in pre-order
    pub fn reachable(&self) -> Vec<NodeRef> {
        let mut order = Vec::new();
        let mut pending = vec![self.root];
        while let Some(node) = pending.pop() {
            order.push(node);
            if let Some(n) = self.table.get(node) {
                let children: Vec<NodeRef> = n.children().collect();
                pending.extend(children.into_iter().rev());
            }
        }
        order
    }

    fn write_expr(&self, f: &mut fmt::Formatter<'_>, node: NodeRef, level: usize) -> fmt::Result {
        write!(f, "{}EXPR ", "..".repeat(level))?;
        match self.table.get(node) {
            Some(n @ Node::IntLiteral { .. }) => writeln!(f, "{}", n),
            Some(n @ Node::BinaryOp { left, right, .. }) => {
                writeln!(f, "{}", n)?;
                self.write_expr(f, *left, level + 1)?;
                match right {
                    Some(right) => self.write_expr(f, *right, level + 1),
                    None => writeln!(f, "{}EXPR ?", "..".repeat(level + 1)),
                }
            }
            None => writeln!(f, "<dangling {}>", node),
        }
    }
}

impl fmt::Display for ParseTree {
    /// Indented dump, one node per line, children two dots deeper
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_expr(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Operator;

    fn one_plus_two() -> ParseTree {
        let mut table = ParseTable::new(4);
        let one = table.alloc(Node::IntLiteral { value: 1 }).unwrap();
        let plus = table
            .alloc(Node::BinaryOp {
                operator: Operator::Plus,
                left: one,
                right: None,
            })
            .unwrap();
        let two = table.alloc(Node::IntLiteral { value: 2 }).unwrap();
        table.attach_right(plus, two);
        ParseTree { table, root: plus }
    }

    #[test]
    fn test_alloc_indices_are_sequential() {
        let tree = one_plus_two();
        let refs: Vec<usize> = tree.table.iter().map(|(r, _)| r.index()).collect();
        assert_eq!(refs, vec![0, 1, 2]);
        assert_eq!(
            tree.table[NodeRef::new(1)],
            Node::BinaryOp {
                operator: Operator::Plus,
                left: NodeRef::new(0),
                right: Some(NodeRef::new(2)),
            }
        );
    }

    #[test]
    fn test_alloc_past_capacity() {
        let mut table = ParseTable::new(1);
        table.alloc(Node::IntLiteral { value: 1 }).unwrap();
        let err = table.alloc(Node::IntLiteral { value: 2 }).unwrap_err();
        assert_eq!(err.pool, Pool::ParseTable);
        assert_eq!(table.len(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_attach_right_to_literal_panics() {
        let mut table = ParseTable::new(2);
        let one = table.alloc(Node::IntLiteral { value: 1 }).unwrap();
        let two = table.alloc(Node::IntLiteral { value: 2 }).unwrap();
        table.attach_right(one, two);
    }

    #[test]
    fn test_reachable_preorder() {
        let tree = one_plus_two();
        let order: Vec<usize> = tree.reachable().iter().map(|r| r.index()).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_tree_display() {
        let tree = one_plus_two();
        assert_eq!(
            tree.to_string(),
            "EXPR OPER2 PLUS\n..EXPR INTVAL 1\n..EXPR INTVAL 2\n"
        );
    }

    #[test]
    fn test_tree_display_pending_right() {
        let mut table = ParseTable::new(2);
        let one = table.alloc(Node::IntLiteral { value: 1 }).unwrap();
        let minus = table
            .alloc(Node::BinaryOp {
                operator: Operator::Minus,
                left: one,
                right: None,
            })
            .unwrap();
        let tree = ParseTree { table, root: minus };
        assert_eq!(tree.to_string(), "EXPR OPER2 MINUS\n..EXPR INTVAL 1\n..EXPR ?\n");
    }
}

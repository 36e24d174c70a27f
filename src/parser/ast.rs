// Expression tree definitions for the ntlang parser

use std::fmt;

/// Byte range of a token within the scanned input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Index of a node within a [`ParseTable`](super::parse_table::ParseTable).
///
/// Child links are stored as indices rather than pointers, so a node's
/// identity is simply its position in the table (`node[3].left = node[1]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node[{}]", self.0)
    }
}

/// Binary operators.
///
/// The grammar only ever produces `Plus` and `Minus`; `Mult` and `Div` exist so
/// that hand-built tables can still be evaluated and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Mult,
    Div,
}

impl Operator {
    /// Upper-case name used in tree dumps (`OPER2 PLUS`)
    pub fn name(self) -> &'static str {
        match self {
            Operator::Plus => "PLUS",
            Operator::Minus => "MINUS",
            Operator::Mult => "MULT",
            Operator::Div => "DIV",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Mult => '*',
            Operator::Div => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single expression node stored in the parse table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    IntLiteral {
        value: i32,
    },
    BinaryOp {
        operator: Operator,
        left: NodeRef,
        /// `None` between allocating the operator node and parsing its right operand
        right: Option<NodeRef>,
    },
}

impl Node {
    /// Short type tag used in table dumps (`INTVAL` / `OPER2`)
    pub fn tag(&self) -> &'static str {
        match self {
            Node::IntLiteral { .. } => "INTVAL",
            Node::BinaryOp { .. } => "OPER2",
        }
    }

    /// Child references in left-to-right order, skipping an unattached right child
    pub fn children(&self) -> impl Iterator<Item = NodeRef> {
        let (left, right) = match *self {
            Node::IntLiteral { .. } => (None, None),
            Node::BinaryOp { left, right, .. } => (Some(left), right),
        };
        left.into_iter().chain(right)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::IntLiteral { value } => write!(f, "INTVAL {}", value),
            Node::BinaryOp { operator, .. } => write!(f, "OPER2 {}", operator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_skip_pending_right() {
        let pending = Node::BinaryOp {
            operator: Operator::Plus,
            left: NodeRef::new(0),
            right: None,
        };
        assert_eq!(pending.children().collect::<Vec<_>>(), vec![NodeRef::new(0)]);

        let literal = Node::IntLiteral { value: 7 };
        assert_eq!(literal.children().count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeRef::new(3).to_string(), "node[3]");
        assert_eq!(Node::IntLiteral { value: 42 }.to_string(), "INTVAL 42");
        let op = Node::BinaryOp {
            operator: Operator::Minus,
            left: NodeRef::new(0),
            right: Some(NodeRef::new(2)),
        };
        assert_eq!(op.to_string(), "OPER2 MINUS");
    }
}

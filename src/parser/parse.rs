//! Recursive descent parser
//!
//! ```text
//! program    := expression EndOfText
//! expression := operand ( (Plus | Minus) operand )*
//! operand    := IntLiteral
//! ```
//!
//! The parser reads tokens through the [`ScanTable`] cursor and allocates
//! nodes into a [`ParseTable`]. Operator nodes are allocated before their
//! right operand, so for `1 + 2` the table holds `[0] 1`, `[1] PLUS`,
//! `[2] 2` and the right link of `[1]` is attached once `[2]` exists.
//!
//! Any error aborts the whole parse; no partial tree is returned.

use super::ast::{Node, NodeRef, Operator};
use super::limits::{Limits, PoolExhausted};
use super::parse_table::{ParseTable, ParseTree};
use super::scan_table::ScanTable;
use super::token::{Expected, TokenKind};
use crate::trace::{PoolView, Rule, Step, Tracer};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("bad operand at position {position}: expected TK_INTLIT, found {found}")]
    BadOperand { found: TokenKind, position: usize },

    #[error("expecting TK_EOT at position {position}, found {found}")]
    ExpectedEndOfText { found: TokenKind, position: usize },

    #[error("integer literal {text} at position {position} does not fit in 32 bits")]
    IntegerOutOfRange { text: String, position: usize },

    #[error(transparent)]
    PoolExhausted(#[from] PoolExhausted),
}

/// Parse the tokens in `scan_table`, starting at its cursor
pub fn parse(
    scan_table: &mut ScanTable,
    limits: &Limits,
    tracer: &mut dyn Tracer,
) -> Result<ParseTree, ParseError> {
    let mut parser = Parser::new(scan_table, limits, tracer);
    let root = parser.parse_program()?;
    Ok(parser.finish(root))
}

/// Parser state for one session: the token cursor, the node pool under
/// construction and the tracer being notified
pub struct Parser<'a> {
    scan_table: &'a mut ScanTable,
    parse_table: ParseTable,
    tracer: &'a mut dyn Tracer,
}

impl<'a> Parser<'a> {
    pub fn new(scan_table: &'a mut ScanTable, limits: &Limits, tracer: &'a mut dyn Tracer) -> Self {
        Self {
            scan_table,
            parse_table: ParseTable::new(limits.parse_capacity),
            tracer,
        }
    }

    /// Hand over the node pool once `root` has been produced
    pub fn finish(self, root: NodeRef) -> ParseTree {
        ParseTree {
            table: self.parse_table,
            root,
        }
    }

    /// `program := expression EndOfText`
    pub fn parse_program(&mut self) -> Result<NodeRef, ParseError> {
        self.enter(Rule::Program);
        let root = self.parse_expression()?;

        if !self.accept(TokenKind::EndOfText) {
            return self.fail(ParseError::ExpectedEndOfText {
                found: self.scan_table.peek_kind(),
                position: self.position(),
            });
        }

        self.exit(Rule::Program, root);
        debug!(root = root.index(), nodes = self.parse_table.len(), "parse complete");
        Ok(root)
    }

    /// `expression := operand ( (Plus | Minus) operand )*`, left-associative
    pub fn parse_expression(&mut self) -> Result<NodeRef, ParseError> {
        self.enter(Rule::Expression);
        let mut subtree = self.parse_operand()?;

        loop {
            let operator = match self.scan_table.peek_kind() {
                TokenKind::Plus => Operator::Plus,
                TokenKind::Minus => Operator::Minus,
                _ => break,
            };
            self.accept(Expected::Any);

            let node = self.alloc(Node::BinaryOp {
                operator,
                left: subtree,
                right: None,
            })?;
            let right = self.parse_operand()?;
            self.parse_table.attach_right(node, right);
            trace!(parent = node.index(), child = right.index(), "attach right");
            self.notify(&Step::RightAttached {
                parent: node,
                child: right,
            });

            // The newest operator becomes the left subtree of the next one
            subtree = node;
        }

        self.exit(Rule::Expression, subtree);
        Ok(subtree)
    }

    /// `operand := IntLiteral`
    pub fn parse_operand(&mut self) -> Result<NodeRef, ParseError> {
        self.enter(Rule::Operand);
        let position = self.position();

        if !self.accept(TokenKind::IntLiteral) {
            return self.fail(ParseError::BadOperand {
                found: self.scan_table.peek_kind(),
                position,
            });
        }

        let text = self
            .scan_table
            .previous()
            .map(|tok| tok.text.clone())
            .unwrap_or_default();
        let value = match text.parse::<i32>() {
            Ok(value) => value,
            Err(_) => return self.fail(ParseError::IntegerOutOfRange { text, position }),
        };

        let node = self.alloc(Node::IntLiteral { value })?;
        self.exit(Rule::Operand, node);
        Ok(node)
    }

    /// Consume the current token if it matches, reporting the attempt
    pub fn accept(&mut self, expected: impl Into<Expected>) -> bool {
        let expected = expected.into();
        let from = self.scan_table.cursor();
        let accepted = self.scan_table.accept(expected);
        trace!(%expected, accepted, from, "accept");
        self.notify(&Step::Accept {
            expected,
            accepted,
            from,
            to: self.scan_table.cursor(),
        });
        accepted
    }

    fn alloc(&mut self, node: Node) -> Result<NodeRef, ParseError> {
        let index = match self.parse_table.alloc(node) {
            Ok(index) => index,
            Err(err) => return self.fail(err.into()),
        };
        trace!(node = index.index(), "{}", node);
        self.notify(&Step::NodeAllocated {
            node: index,
            contents: node,
        });
        Ok(index)
    }

    /// Byte offset of the token under the cursor, or the end of the last token
    fn position(&self) -> usize {
        self.scan_table
            .peek()
            .or_else(|| self.scan_table.tokens().last())
            .map_or(0, |tok| tok.span.start)
    }

    fn enter(&mut self, rule: Rule) {
        let cursor = self.scan_table.cursor();
        self.notify(&Step::Enter { rule, cursor });
    }

    fn exit(&mut self, rule: Rule, node: NodeRef) {
        self.notify(&Step::Exit { rule, node });
    }

    fn fail<T>(&mut self, err: ParseError) -> Result<T, ParseError> {
        debug!(error = %err, "parse failed");
        self.notify(&Step::Failed {
            message: err.to_string(),
        });
        Err(err)
    }

    fn notify(&mut self, step: &Step) {
        self.tracer.observe(
            step,
            &PoolView {
                scan_table: &*self.scan_table,
                parse_table: Some(&self.parse_table),
            },
        );
    }
}

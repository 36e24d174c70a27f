//! Observer hook for the scanner and parser
//!
//! After every step the core calls [`Tracer::observe`] with a [`Step`]
//! describing what happened and a read-only [`PoolView`] of both tables.
//! Tracers keep whatever state they need (depth, step counters) themselves;
//! the core never reads anything back, so scanning and parsing behave the
//! same with any tracer attached.
//!
//! - [`NullTracer`]: ignores every step
//! - [`LogTracer`]: forwards steps to `tracing` at debug level
//! - [`Recorder`](crate::snapshot::Recorder): captures a snapshot per step for
//!   the visualizer

use crate::parser::ast::{Node, NodeRef};
use crate::parser::parse_table::ParseTable;
use crate::parser::scan_table::ScanTable;
use crate::parser::token::{Expected, TokenKind};
use std::fmt;
use tracing::debug;

/// Grammar rules, for enter/exit steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Program,
    Expression,
    Operand,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Program => f.write_str("parse_program"),
            Rule::Expression => f.write_str("parse_expression"),
            Rule::Operand => f.write_str("parse_operand"),
        }
    }
}

/// One observable step of a scan or parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ScanStarted {
        len: usize,
    },
    TokenScanned {
        index: usize,
        kind: TokenKind,
        text: String,
    },
    ScanComplete {
        tokens: usize,
    },
    Enter {
        rule: Rule,
        cursor: usize,
    },
    Accept {
        expected: Expected,
        accepted: bool,
        from: usize,
        to: usize,
    },
    NodeAllocated {
        node: NodeRef,
        contents: Node,
    },
    RightAttached {
        parent: NodeRef,
        child: NodeRef,
    },
    Exit {
        rule: Rule,
        node: NodeRef,
    },
    Failed {
        message: String,
    },
}

impl Step {
    /// Node the step is about, if any
    pub fn focus(&self) -> Option<NodeRef> {
        match self {
            Step::NodeAllocated { node, .. } | Step::Exit { node, .. } => Some(*node),
            Step::RightAttached { parent, .. } => Some(*parent),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::ScanStarted { len } => write!(f, "scan input (len={})", len),
            Step::TokenScanned { index, kind, text } => {
                write!(f, "ALLOC scan_table[{}] = {}(\"{}\")", index, kind, text)
            }
            Step::ScanComplete { tokens } => {
                write!(f, "scan complete: {} tokens in scan_table", tokens)
            }
            Step::Enter { rule, cursor } => write!(f, "ENTER {} [cur={}]", rule, cursor),
            Step::Accept {
                expected,
                accepted,
                from,
                to,
            } => {
                if *accepted {
                    write!(f, "accept {} => YES (cur: {} -> {})", expected, from, to)
                } else {
                    write!(f, "accept {} => NO (cur stays {})", expected, from)
                }
            }
            Step::NodeAllocated { node, contents } => match contents {
                Node::IntLiteral { value } => {
                    write!(f, "ALLOC {} INTVAL {}", node, value)
                }
                Node::BinaryOp { operator, left, .. } => write!(
                    f,
                    "ALLOC {} OPER2 {} (left = {}, right not yet set)",
                    node, operator, left
                ),
            },
            Step::RightAttached { parent, child } => {
                write!(f, "{}.right = {}", parent, child)
            }
            Step::Exit { rule, node } => write!(f, "EXIT {} => {}", rule, node),
            Step::Failed { message } => write!(f, "error: {}", message),
        }
    }
}

/// Read-only view of the pools at the time of a step
#[derive(Debug, Clone, Copy)]
pub struct PoolView<'a> {
    pub scan_table: &'a ScanTable,
    /// `None` while scanning
    pub parse_table: Option<&'a ParseTable>,
}

/// Step observer injected into [`scan`](crate::parser::scanner::scan) and
/// [`parse`](crate::parser::parse::parse)
pub trait Tracer {
    fn observe(&mut self, step: &Step, view: &PoolView<'_>);
}

/// Tracer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn observe(&mut self, _step: &Step, _view: &PoolView<'_>) {}
}

/// Tracer that logs every step with its rule nesting depth
#[derive(Debug, Clone, Default)]
pub struct LogTracer {
    depth: usize,
    steps: usize,
}

impl LogTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Tracer for LogTracer {
    fn observe(&mut self, step: &Step, view: &PoolView<'_>) {
        if let Step::Exit { .. } = step {
            self.depth = self.depth.saturating_sub(1);
        }
        self.steps += 1;
        debug!(
            step = self.steps,
            depth = self.depth,
            tokens = view.scan_table.len(),
            cursor = view.scan_table.cursor(),
            nodes = view.parse_table.map_or(0, ParseTable::len),
            "{}{}",
            "  ".repeat(self.depth),
            step
        );
        if let Step::Enter { .. } = step {
            self.depth += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Operator;

    #[test]
    fn test_step_labels() {
        let step = Step::NodeAllocated {
            node: NodeRef::new(1),
            contents: Node::BinaryOp {
                operator: Operator::Plus,
                left: NodeRef::new(0),
                right: None,
            },
        };
        assert_eq!(
            step.to_string(),
            "ALLOC node[1] OPER2 PLUS (left = node[0], right not yet set)"
        );

        let accept = Step::Accept {
            expected: Expected::Kind(TokenKind::EndOfText),
            accepted: true,
            from: 3,
            to: 4,
        };
        assert_eq!(accept.to_string(), "accept TK_EOT => YES (cur: 3 -> 4)");

        let enter = Step::Enter {
            rule: Rule::Operand,
            cursor: 2,
        };
        assert_eq!(enter.to_string(), "ENTER parse_operand [cur=2]");
    }

    #[test]
    fn test_focus() {
        let attach = Step::RightAttached {
            parent: NodeRef::new(1),
            child: NodeRef::new(2),
        };
        assert_eq!(attach.focus(), Some(NodeRef::new(1)));
        assert_eq!(Step::ScanComplete { tokens: 2 }.focus(), None);
    }

    #[test]
    fn test_log_tracer_depth() {
        let table = ScanTable::new(1);
        let view = PoolView {
            scan_table: &table,
            parse_table: None,
        };
        let mut tracer = LogTracer::new();
        tracer.observe(&Step::Enter { rule: Rule::Program, cursor: 0 }, &view);
        assert_eq!(tracer.depth, 1);
        tracer.observe(
            &Step::Exit {
                rule: Rule::Program,
                node: NodeRef::new(0),
            },
            &view,
        );
        assert_eq!(tracer.depth, 0);
        assert_eq!(tracer.steps(), 2);
    }
}

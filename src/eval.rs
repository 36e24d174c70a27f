//! Evaluation of finished expression trees
//!
//! A post-order fold with checked `i32` arithmetic. All four operators are
//! handled even though the grammar only produces `+` and `-`.

use crate::parser::ast::{Node, NodeRef, Operator};
use crate::parser::parse_table::{ParseTable, ParseTree};
use thiserror::Error;

/// Errors raised while evaluating a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("integer overflow in {operator} at {node}")]
    Overflow { operator: Operator, node: NodeRef },

    #[error("division by zero at {node}")]
    DivisionByZero { node: NodeRef },

    #[error("{node} has no right operand")]
    MissingOperand { node: NodeRef },

    #[error("{node} is outside the parse table")]
    DanglingRef { node: NodeRef },
}

/// Evaluate the tree from its root
pub fn evaluate(tree: &ParseTree) -> Result<i32, EvalError> {
    evaluate_node(&tree.table, tree.root)
}

/// Evaluate the subtree rooted at `node`
pub fn evaluate_node(table: &ParseTable, node: NodeRef) -> Result<i32, EvalError> {
    match table.get(node) {
        None => Err(EvalError::DanglingRef { node }),
        Some(Node::IntLiteral { value }) => Ok(*value),
        Some(Node::BinaryOp {
            operator,
            left,
            right,
        }) => {
            let right = right.ok_or(EvalError::MissingOperand { node })?;
            let lhs = evaluate_node(table, *left)?;
            let rhs = evaluate_node(table, right)?;
            apply(*operator, lhs, rhs, node)
        }
    }
}

fn apply(operator: Operator, lhs: i32, rhs: i32, node: NodeRef) -> Result<i32, EvalError> {
    let result = match operator {
        Operator::Plus => lhs.checked_add(rhs),
        Operator::Minus => lhs.checked_sub(rhs),
        Operator::Mult => lhs.checked_mul(rhs),
        Operator::Div => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero { node });
            }
            lhs.checked_div(rhs)
        }
    };
    result.ok_or(EvalError::Overflow { operator, node })
}

//! Scan, parse and evaluate behind a single call

use crate::eval::{self, EvalError};
use crate::parser::limits::Limits;
use crate::parser::parse::{self, ParseError};
use crate::parser::parse_table::ParseTree;
use crate::parser::scan_table::ScanTable;
use crate::parser::scanner::{self, ScanError};
use crate::trace::Tracer;
use thiserror::Error;

/// Any failure of the scan → parse → evaluate pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// The pools produced by one successful session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub scan_table: ScanTable,
    pub tree: ParseTree,
}

impl Program {
    /// Scan and parse `input`, notifying `tracer` of every step
    pub fn compile(input: &str, limits: &Limits, tracer: &mut dyn Tracer) -> Result<Self, Error> {
        let mut scan_table = scanner::scan(input, limits, tracer)?;
        let tree = parse::parse(&mut scan_table, limits, tracer)?;
        Ok(Program { scan_table, tree })
    }

    pub fn evaluate(&self) -> Result<i32, Error> {
        Ok(eval::evaluate(&self.tree)?)
    }
}

//! ntlang expression scanner and parser
//!
//! This module turns an input string into an expression tree:
//! - [`scanner`]: Tokenization (input text → [`scan_table::ScanTable`])
//! - [`parse`]: Parsing (scan table → [`parse_table::ParseTree`])
//! - [`ast`]: Node and reference definitions
//! - [`limits`]: Input and pool capacity limits
//!
//! # Supported Language
//!
//! Sums and differences of non-negative integers, e.g. `10 + 20 - 30`.
//! Tokens may be separated by spaces or tabs. There are no parentheses,
//! unary minus, identifiers or other operators.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent over a cursor into the scan table. Nodes
//! live in an index-addressed pool; child links are [`ast::NodeRef`]
//! indices rather than pointers.

pub mod ast;
pub mod limits;
pub mod parse;
pub mod parse_table;
pub mod scan_table;
pub mod scanner;
pub mod token;

//! # Introduction
//!
//! ntlang scans and parses integer expressions built from `+` and `-`,
//! storing every token and node in fixed-capacity pools addressed by index.
//! Each scanner and parser step can be observed through a [`trace::Tracer`],
//! which the `ntviz` binary uses to record a snapshot history and replay it
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Scanner → ScanTable → Parser → ParseTable → Evaluator
//!                      └──────── Tracer ────────┘
//! ```
//!
//! 1. [`parser::scanner`] — turns the input into [`parser::token::Token`]s
//!    held in a [`parser::scan_table::ScanTable`].
//! 2. [`parser::parse`] — recursive descent over the scan table, allocating
//!    [`parser::ast::Node`]s in a [`parser::parse_table::ParseTable`].
//! 3. [`eval`] — folds a finished tree to an `i32`.
//! 4. [`trace`] — step events and the observer hook.
//! 5. [`snapshot`] — memory-bounded history of pool states, one per step.
//! 6. [`ui`] — ratatui-based step viewer; not part of the stable library API.
//!
//! ## Grammar
//!
//! ```text
//! program    := expression EOT
//! expression := operand (('+' | '-') operand)*
//! operand    := INTLIT
//! ```

pub mod constants;
pub mod eval;
pub mod logging;
pub mod parser;
pub mod program;
pub mod snapshot;
pub mod trace;
pub mod ui;

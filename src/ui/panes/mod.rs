//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: The input expression with the current token highlighted
//! - [`scan_table`]: Allocated tokens and the parser's cursor
//! - [`parse_table`]: Allocated nodes with their child and parent links
//! - [`tree`]: ASCII tree of the subtree the current step is working on
//! - [`log`]: Step labels recorded so far, indented by rule depth
//! - [`status`]: Status bar with keybindings and step position
//! - `utils`: Shared border, scrolling and link helpers
//!
//! Each pane module exports a `render_*` function taking the frame, its area,
//! the data to draw and, for scrollable panes, its scroll state.

mod utils;

pub mod log;
pub mod parse_table;
pub mod scan_table;
pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use log::{render_log_pane, LogScrollState};
pub use parse_table::{render_parse_pane, ParseRenderData, ParseScrollState};
pub use scan_table::{render_scan_pane, ScanRenderData};
pub use source::{render_source_pane, SourceRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;

//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core logic for each renamer operation,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod analyze;
pub mod rename;

pub use analyze::analyze_operation;
pub use rename::{rename_operation, RewriteOptions};

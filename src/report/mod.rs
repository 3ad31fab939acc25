//! Formatted terminal output for predictions, comparisons and category lists.

pub mod format;

pub use format::*;
